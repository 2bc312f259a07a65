//! The access controller poll loop.
//!
//! [`AccessController`] owns the peripherals, the shared [`GateContext`] and
//! the four components, and runs them in a fixed order on every
//! [`poll_once`](AccessController::poll_once):
//!
//! 1. registration
//! 2. verification
//! 3. display sequencer
//! 4. peripheral reset
//!
//! A poll never waits. The caller decides how often to poll; the binary uses
//! a `tokio` interval, tests drive a [`ManualClock`] and call `poll_once`
//! directly.
//!
//! [`ManualClock`]: gatekeeper_hardware::mock::ManualClock
//!
//! # Examples
//!
//! ```
//! use gatekeeper_controller::{AccessController, DisplayState, Peripherals, Phase};
//! use gatekeeper_core::{CardId, GateConfig};
//! use gatekeeper_hardware::mock::{ManualClock, MockActuator, MockCardReader, VirtualLcd};
//!
//! let (reader, card) = MockCardReader::new();
//! let clock = ManualClock::new();
//! let peripherals = Peripherals {
//!     reader,
//!     display: VirtualLcd::default(),
//!     actuator: MockActuator::new(),
//!     clock: clock.clone(),
//! };
//! let mut gate = AccessController::new(GateConfig::default(), peripherals).unwrap();
//!
//! gate.poll_once(); // banner
//! clock.advance(1000);
//! gate.poll_once(); // registration prompt
//! assert_eq!(gate.context().phase(), Phase::RegistrationArmed);
//!
//! card.present_card(CardId::new([0xDE, 0xAD, 0xBE, 0xEF, 0x01])).unwrap();
//! let report = gate.poll_once();
//! assert!(report.registration.is_some());
//! assert_eq!(gate.context().phase(), Phase::VerificationBusy);
//! assert_eq!(gate.context().pending_display_request(), None);
//! assert_eq!(gate.sequencer().pending(), DisplayState::Finished);
//! ```

use gatekeeper_core::{AddOutcome, GateConfig};
use gatekeeper_hardware::TracingSink;
use gatekeeper_hardware::traits::{Actuator, CardReader, CharacterDisplay, Clock, DiagnosticSink};
use gatekeeper_hardware::types::{OutputChannel, OutputLevel};
use tracing::info;

use crate::context::{Decision, GateContext};
use crate::display::{DisplaySequencer, DwellTimes, StateEntry};
use crate::registration::RegistrationController;
use crate::reset::PeripheralReset;
use crate::verification::VerificationController;

/// Peripherals handed to an [`AccessController`].
#[derive(Debug)]
pub struct Peripherals<R, D, A, C> {
    pub reader: R,
    pub display: D,
    pub actuator: A,
    pub clock: C,
}

/// What happened during one poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollReport {
    /// Clock reading the poll ran at.
    pub now_ms: u64,

    /// Registry outcome of a consumed registration scan.
    pub registration: Option<AddOutcome>,

    /// Whether the registry report was written.
    pub registry_reported: bool,

    /// Decision of a consumed verification scan.
    pub decision: Option<Decision>,

    /// Display state entered, if the dwell elapsed.
    pub rendered: Option<StateEntry>,

    /// Whether the reset timer cleared the outputs.
    pub outputs_cleared: bool,
}

impl PollReport {
    /// Check if nothing happened during the poll.
    pub fn is_idle(&self) -> bool {
        self.registration.is_none()
            && !self.registry_reported
            && self.decision.is_none()
            && self.rendered.is_none()
            && !self.outputs_cleared
    }
}

/// RFID access controller.
#[derive(Debug)]
pub struct AccessController<R, D, A, C, S = TracingSink> {
    config: GateConfig,
    ctx: GateContext,
    registration: RegistrationController,
    verification: VerificationController,
    sequencer: DisplaySequencer,
    reset: PeripheralReset,
    reader: R,
    display: D,
    actuator: A,
    clock: C,
    sink: S,
}

impl<R, D, A, C> AccessController<R, D, A, C>
where
    R: CardReader,
    D: CharacterDisplay,
    A: Actuator,
    C: Clock,
{
    /// Create a controller with an empty registry.
    ///
    /// All outputs are driven off and the display is cleared; the start
    /// banner appears on the first poll. Diagnostic records go to
    /// [`TracingSink`] until replaced with [`with_sink`](Self::with_sink).
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: GateConfig, peripherals: Peripherals<R, D, A, C>) -> gatekeeper_core::Result<Self> {
        config.validate()?;

        let Peripherals {
            reader,
            mut display,
            mut actuator,
            clock,
        } = peripherals;

        let mut ctx = GateContext::new(config.capacity);
        for channel in OutputChannel::ALL {
            ctx.drive(&mut actuator, channel, OutputLevel::Off);
        }
        display.clear();

        let now_ms = clock.now_ms();
        info!(
            "Access controller ready: capacity {}, cooldown {}ms, lock actuator {}",
            config.capacity,
            config.cooldown_ms,
            if config.drive_lock_actuator { "enabled" } else { "disabled" }
        );

        Ok(Self {
            registration: RegistrationController::new(),
            verification: VerificationController::new(config.drive_lock_actuator),
            sequencer: DisplaySequencer::new(DwellTimes::from(&config), now_ms),
            reset: PeripheralReset::new(config.cooldown_ms, config.drive_lock_actuator),
            config,
            ctx,
            reader,
            display,
            actuator,
            clock,
            sink: TracingSink,
        })
    }
}

impl<R, D, A, C, S> AccessController<R, D, A, C, S>
where
    R: CardReader,
    D: CharacterDisplay,
    A: Actuator,
    C: Clock,
    S: DiagnosticSink,
{
    /// Replace the diagnostic sink.
    pub fn with_sink<T: DiagnosticSink>(self, sink: T) -> AccessController<R, D, A, C, T> {
        AccessController {
            config: self.config,
            ctx: self.ctx,
            registration: self.registration,
            verification: self.verification,
            sequencer: self.sequencer,
            reset: self.reset,
            reader: self.reader,
            display: self.display,
            actuator: self.actuator,
            clock: self.clock,
            sink,
        }
    }

    /// Run one iteration of the control loop.
    pub fn poll_once(&mut self) -> PollReport {
        let now_ms = self.clock.now_ms();

        let registration = self
            .registration
            .step(&mut self.ctx, &mut self.reader, &mut self.sink);
        let registry_reported = self.registration.report(&mut self.ctx, &mut self.sink);

        let decision = self.verification.step(
            &mut self.ctx,
            &mut self.reader,
            &mut self.actuator,
            &mut self.sink,
            now_ms,
        );

        let rendered = self.sequencer.tick(&mut self.ctx, &mut self.display, now_ms);
        let outputs_cleared = self.reset.tick(&mut self.ctx, &mut self.actuator, now_ms);

        PollReport {
            now_ms,
            registration,
            registry_reported,
            decision,
            rendered,
            outputs_cleared,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn context(&self) -> &GateContext {
        &self.ctx
    }

    pub fn sequencer(&self) -> &DisplaySequencer {
        &self.sequencer
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
