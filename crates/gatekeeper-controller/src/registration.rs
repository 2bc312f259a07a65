//! Registration controller.
//!
//! Builds the whitelist from scans while the phase is
//! [`Phase::RegistrationArmed`]. Each accepted scan disarms registration until
//! the display prompts again, so one tap registers one card.

use gatekeeper_core::AddOutcome;
use gatekeeper_hardware::traits::{CardReader, DiagnosticSink};
use tracing::{debug, info};

use crate::context::GateContext;
use crate::display::DisplayState;
use crate::phase::{Phase, PhaseEvent};

/// Consumes registration scans.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistrationController;

impl RegistrationController {
    pub fn new() -> Self {
        Self
    }

    /// Run one registration step.
    ///
    /// Does nothing unless registration is armed and the registry has room.
    /// While it runs the reader is released on every call, whether or not a
    /// card was read. A read failure is treated like an empty field.
    ///
    /// Returns the registry outcome when a scan was consumed.
    pub fn step<R, S>(&self, ctx: &mut GateContext, reader: &mut R, sink: &mut S) -> Option<AddOutcome>
    where
        R: CardReader + ?Sized,
        S: DiagnosticSink + ?Sized,
    {
        if ctx.phase() != Phase::RegistrationArmed || ctx.registry().is_full() {
            return None;
        }

        let scanned = if reader.is_card_present() {
            reader.read_identifier()
        } else {
            None
        };
        reader.release();

        let id = scanned?;
        let outcome = ctx.registry_mut().try_add(id);

        match outcome {
            AddOutcome::Duplicate { index } => {
                info!("Card {} already registered at index {}", id, index);
                sink.log(&format!("already registered: card#{} {}", index + 1, id.to_string_separated()));
                ctx.request_display(DisplayState::AlreadyRegistered);
                ctx.apply(PhaseEvent::CardRegistered);
            }
            AddOutcome::Added { index } => {
                info!("Registered card {} at index {}", id, index);
                sink.log(&format!("card#{} {}", index + 1, id.to_string_separated()));

                if ctx.registry().is_full() {
                    info!("Registry full with {} cards, registration finished", ctx.registry().len());
                    ctx.request_display(DisplayState::Finished);
                    ctx.apply(PhaseEvent::RegistrationCompleted);
                    ctx.schedule_registry_report();
                } else {
                    ctx.request_display(DisplayState::RegisterPrompt);
                    ctx.apply(PhaseEvent::CardRegistered);
                }
            }
            // Unreachable behind the capacity guard; kept as a no-op
            AddOutcome::Full => {
                debug!("Scan of {} ignored, registry full", id);
            }
        }

        Some(outcome)
    }

    /// Emit the registry report once, after registration has completed.
    ///
    /// Returns `true` if the report was written on this call.
    pub fn report<S>(&self, ctx: &mut GateContext, sink: &mut S) -> bool
    where
        S: DiagnosticSink + ?Sized,
    {
        if !ctx.take_registry_report() {
            return false;
        }

        let registry = ctx.registry();
        sink.log(&format!("total no. of cards is: {}", registry.len()));
        for (index, id) in registry.iter().enumerate() {
            sink.log(&format!("card#{} {}", index + 1, id.to_string_separated()));
        }
        true
    }
}
