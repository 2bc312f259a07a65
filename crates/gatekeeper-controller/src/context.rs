//! Shared state of one controller instance.
//!
//! Every component step function receives the same [`GateContext`] by
//! mutable reference. It owns the card registry, the phase, the last
//! decision, the mirrored output levels, the cooldown timer state and the
//! pending display request, so no component reaches into another.

use std::fmt;

use gatekeeper_core::CardRegistry;
use gatekeeper_hardware::traits::Actuator;
use gatekeeper_hardware::types::{OutputChannel, OutputLevel};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::display::DisplayState;
use crate::phase::{Phase, PhaseEvent};

/// Outcome of a verification scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Granted,
    Denied,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Granted => write!(f, "granted"),
            Decision::Denied => write!(f, "denied"),
        }
    }
}

/// Last level written to each output channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputState {
    /// Accept indicator.
    pub accept: OutputLevel,

    /// Deny indicator.
    pub deny: OutputLevel,

    /// Alarm buzzer.
    pub alarm: OutputLevel,

    /// Lock actuator, only written when enabled in configuration.
    pub lock: OutputLevel,
}

impl OutputState {
    /// Level last written to `channel`.
    pub fn level(&self, channel: OutputChannel) -> OutputLevel {
        match channel {
            OutputChannel::AcceptIndicator => self.accept,
            OutputChannel::DenyIndicator => self.deny,
            OutputChannel::Alarm => self.alarm,
            OutputChannel::LockActuator => self.lock,
        }
    }

    fn set(&mut self, channel: OutputChannel, level: OutputLevel) {
        match channel {
            OutputChannel::AcceptIndicator => self.accept = level,
            OutputChannel::DenyIndicator => self.deny = level,
            OutputChannel::Alarm => self.alarm = level,
            OutputChannel::LockActuator => self.lock = level,
        }
    }

    /// Check if every channel, the lock included, was last written off.
    pub fn all_off(&self) -> bool {
        OutputChannel::ALL
            .iter()
            .all(|channel| !self.level(*channel).is_on())
    }
}

/// Reference point of the indicator reset timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cooldown {
    active: bool,
    stopping: bool,
    armed_at_ms: u64,
}

impl Cooldown {
    /// Start counting from `now_ms` and mark the cooldown active.
    pub fn arm(&mut self, now_ms: u64) {
        self.active = true;
        self.stopping = false;
        self.armed_at_ms = now_ms;
    }

    /// Restart counting from `now_ms` without changing the active flag.
    pub fn rearm(&mut self, now_ms: u64) {
        self.armed_at_ms = now_ms;
    }

    /// Ask the reset timer to finish on its next tick. It clears whatever
    /// is still on and then deactivates the cooldown.
    pub fn stop(&mut self) {
        if self.active {
            self.stopping = true;
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.stopping = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Check if the cooldown was stopped but not yet deactivated.
    pub fn is_stopping(&self) -> bool {
        self.stopping
    }

    pub fn armed_at_ms(&self) -> u64 {
        self.armed_at_ms
    }

    /// Milliseconds since the last (re)arm.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.armed_at_ms)
    }
}

/// Mutable state shared by the controllers, the display sequencer and the
/// reset timer.
#[derive(Debug, Clone)]
pub struct GateContext {
    registry: CardRegistry,
    phase: Phase,
    decision: Option<Decision>,
    outputs: OutputState,
    cooldown: Cooldown,
    display_request: Option<DisplayState>,
    report_pending: bool,
}

impl GateContext {
    /// Create a context with an empty registry of `capacity` cards.
    pub fn new(capacity: usize) -> Self {
        Self {
            registry: CardRegistry::new(capacity),
            phase: Phase::default(),
            decision: None,
            outputs: OutputState::default(),
            cooldown: Cooldown::default(),
            display_request: None,
            report_pending: false,
        }
    }

    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut CardRegistry {
        &mut self.registry
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Apply a phase event, logging the change.
    pub(crate) fn apply(&mut self, event: PhaseEvent) {
        let next = self.phase.apply(event);
        if next != self.phase {
            debug!("Phase {} -> {} on {:?}", self.phase, next, event);
            self.phase = next;
        } else {
            trace!("Phase {} unchanged on {:?}", self.phase, event);
        }
    }

    /// Outcome of the current verification cycle, if any.
    pub fn decision(&self) -> Option<Decision> {
        self.decision
    }

    pub(crate) fn set_decision(&mut self, decision: Option<Decision>) {
        self.decision = decision;
    }

    pub fn outputs(&self) -> &OutputState {
        &self.outputs
    }

    /// Write `level` to `channel` and mirror it in [`outputs`](Self::outputs).
    pub(crate) fn drive<A: Actuator + ?Sized>(
        &mut self,
        actuator: &mut A,
        channel: OutputChannel,
        level: OutputLevel,
    ) {
        actuator.set_output(channel, level);
        self.outputs.set(channel, level);
    }

    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    pub(crate) fn cooldown_mut(&mut self) -> &mut Cooldown {
        &mut self.cooldown
    }

    /// Ask the display sequencer to show `state` at its next transition.
    ///
    /// A later request in the same iteration replaces an earlier one.
    pub(crate) fn request_display(&mut self, state: DisplayState) {
        self.display_request = Some(state);
    }

    pub(crate) fn take_display_request(&mut self) -> Option<DisplayState> {
        self.display_request.take()
    }

    /// Display state requested but not yet picked up by the sequencer.
    pub fn pending_display_request(&self) -> Option<DisplayState> {
        self.display_request
    }

    pub(crate) fn schedule_registry_report(&mut self) {
        self.report_pending = true;
    }

    /// Consume the one-shot registry report gate.
    pub(crate) fn take_registry_report(&mut self) -> bool {
        std::mem::take(&mut self.report_pending)
    }
}
