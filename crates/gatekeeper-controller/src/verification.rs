//! Verification controller.
//!
//! Checks scanned cards against the whitelist while the phase is
//! [`Phase::VerificationArmed`] and drives the indicators with the decision.

use gatekeeper_hardware::traits::{Actuator, CardReader, DiagnosticSink};
use gatekeeper_hardware::types::{OutputChannel, OutputLevel};
use tracing::{info, warn};

use crate::context::{Decision, GateContext};
use crate::display::DisplayState;
use crate::phase::{Phase, PhaseEvent};

/// Consumes verification scans.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerificationController {
    /// Also drive the lock actuator on a granted scan.
    drive_lock: bool,
}

impl VerificationController {
    pub fn new(drive_lock: bool) -> Self {
        Self { drive_lock }
    }

    pub fn drives_lock(&self) -> bool {
        self.drive_lock
    }

    /// Run one verification step.
    ///
    /// On a scan the indicators are set for the decision, verification is
    /// disarmed, the cooldown is armed at `now_ms` and the matching result
    /// message is requested. The reader is released only when a card was
    /// detected; a failed read changes nothing else.
    pub fn step<R, A, S>(
        &self,
        ctx: &mut GateContext,
        reader: &mut R,
        actuator: &mut A,
        sink: &mut S,
        now_ms: u64,
    ) -> Option<Decision>
    where
        R: CardReader + ?Sized,
        A: Actuator + ?Sized,
        S: DiagnosticSink + ?Sized,
    {
        if ctx.phase() != Phase::VerificationArmed || !reader.is_card_present() {
            return None;
        }

        let scanned = reader.read_identifier();
        reader.release();
        let id = scanned?;

        let decision = if ctx.registry().contains(&id) {
            Decision::Granted
        } else {
            Decision::Denied
        };

        let granted = decision == Decision::Granted;
        ctx.drive(actuator, OutputChannel::AcceptIndicator, OutputLevel::from(granted));
        ctx.drive(actuator, OutputChannel::DenyIndicator, OutputLevel::from(!granted));
        ctx.drive(actuator, OutputChannel::Alarm, OutputLevel::from(!granted));
        if self.drive_lock && granted {
            ctx.drive(actuator, OutputChannel::LockActuator, OutputLevel::On);
        }

        match decision {
            Decision::Granted => {
                info!("Card {} granted", id);
                sink.log("card accepted");
                ctx.request_display(DisplayState::Accepted);
            }
            Decision::Denied => {
                warn!("Card {} denied", id);
                sink.log("card denied");
                ctx.request_display(DisplayState::Denied);
            }
        }

        ctx.set_decision(Some(decision));
        ctx.apply(PhaseEvent::CardVerified);
        ctx.cooldown_mut().arm(now_ms);

        Some(decision)
    }
}
