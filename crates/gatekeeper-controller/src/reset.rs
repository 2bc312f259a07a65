//! Peripheral reset timer.
//!
//! Turns the indicators and the alarm off a fixed cooldown after a decision.
//! The timer keeps running until the display returns to the verification
//! prompt, so while a result message is shown the outputs are cleared again
//! every cooldown; those repeated writes are idle.
//!
//! The prompt only stops the cooldown. The reset timer runs later in the
//! same poll, clears anything still on and then deactivates it, so a
//! cooldown whose deadline falls on the poll that shows the prompt still
//! clears its outputs.

use gatekeeper_hardware::traits::Actuator;
use gatekeeper_hardware::types::{OutputChannel, OutputLevel};
use tracing::debug;

use crate::context::GateContext;

/// Clears decision outputs once the cooldown has elapsed.
#[derive(Debug, Clone, Copy)]
pub struct PeripheralReset {
    cooldown_ms: u64,
    clear_lock: bool,
}

impl PeripheralReset {
    /// Create a reset timer. `clear_lock` adds the lock actuator to the
    /// cleared outputs.
    pub fn new(cooldown_ms: u64, clear_lock: bool) -> Self {
        Self {
            cooldown_ms,
            clear_lock,
        }
    }

    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_ms
    }

    /// Clear the outputs if the cooldown is active and has elapsed, then
    /// restart it at `now_ms`.
    ///
    /// A stopped cooldown is deactivated instead, after clearing any output
    /// that is still on.
    ///
    /// Returns `true` if the outputs were cleared.
    pub fn tick<A: Actuator + ?Sized>(&self, ctx: &mut GateContext, actuator: &mut A, now_ms: u64) -> bool {
        let cooldown = *ctx.cooldown();
        if !cooldown.is_active() {
            return false;
        }

        if cooldown.is_stopping() {
            let pending = self.channels().any(|channel| ctx.outputs().level(channel).is_on());
            if pending {
                self.clear(ctx, actuator);
                debug!("Outputs cleared at {}ms as the cooldown stopped", now_ms);
            }
            ctx.cooldown_mut().deactivate();
            return pending;
        }

        if cooldown.elapsed_ms(now_ms) < self.cooldown_ms {
            return false;
        }

        self.clear(ctx, actuator);
        debug!("Outputs cleared at {}ms", now_ms);
        ctx.cooldown_mut().rearm(now_ms);
        true
    }

    fn channels(&self) -> impl Iterator<Item = OutputChannel> {
        OutputChannel::TRANSIENT
            .into_iter()
            .chain(self.clear_lock.then_some(OutputChannel::LockActuator))
    }

    fn clear<A: Actuator + ?Sized>(&self, ctx: &mut GateContext, actuator: &mut A) {
        for channel in self.channels() {
            ctx.drive(actuator, channel, OutputLevel::Off);
        }
    }
}
