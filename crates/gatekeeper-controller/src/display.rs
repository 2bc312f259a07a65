//! Timed display state machine.
//!
//! The sequencer shows one message at a time on the 16×2 status display.
//! Every state has a dwell time; the sequencer only moves on once the dwell
//! of the state it last entered has elapsed, and it checks this without
//! blocking on each poll.
//!
//! # States
//!
//! | State | Line 1 | Line 2 | Entry action | Next |
//! |---|---|---|---|---|
//! | `Start` | `RFID SYSTEM` | `Hi ..` | | `RegisterPrompt` |
//! | `RegisterPrompt` | `REGISTER your` | `RFID CARD no: N` | arm registration | held |
//! | `CheckPrompt` | `ENTER your` | `RFID CARD:` | arm verification, stop cooldown | held |
//! | `Accepted` | `CARD ACCEPTED` | | | `CheckPrompt` |
//! | `Denied` | `CARD DENIED` | | | `CheckPrompt` |
//! | `AlreadyRegistered` | `CARD ALREADY` | `REGISTERED` | arm registration | `RegisterPrompt` |
//! | `Finished` | `FINISHED` | `REGISTRATION` | | `CheckPrompt` |
//!
//! A held state enters itself again every dwell, redrawing the prompt and
//! repeating its entry action, until a controller requests another state.
//! Controller requests replace the pending state before the next dwell
//! expiry; they never cut the current dwell short.
//!
//! Verification is armed only from `CheckPrompt`. `Finished` just announces
//! the end of registration, so a card presented while it is shown waits for
//! the first verification prompt.
//!
//! # Examples
//!
//! ```
//! use gatekeeper_controller::{DisplaySequencer, DisplayState, DwellTimes, GateContext};
//! use gatekeeper_hardware::mock::VirtualLcd;
//!
//! let mut ctx = GateContext::new(1);
//! let mut lcd = VirtualLcd::default();
//! let mut sequencer = DisplaySequencer::new(DwellTimes::default(), 0);
//!
//! // The banner is drawn on the first poll
//! sequencer.tick(&mut ctx, &mut lcd, 0);
//! assert_eq!(sequencer.current(), Some(DisplayState::Start));
//! assert_eq!(lcd.lines_trimmed(), vec!["RFID SYSTEM", "Hi .."]);
//!
//! // Nothing changes before the banner's dwell has elapsed
//! assert!(sequencer.tick(&mut ctx, &mut lcd, 999).is_none());
//!
//! sequencer.tick(&mut ctx, &mut lcd, 1000);
//! assert_eq!(sequencer.current(), Some(DisplayState::RegisterPrompt));
//! assert_eq!(lcd.lines_trimmed(), vec!["REGISTER your", "RFID CARD no: 1"]);
//! ```

use std::collections::VecDeque;
use std::fmt;

use gatekeeper_core::GateConfig;
use gatekeeper_core::constants::*;
use gatekeeper_hardware::traits::CharacterDisplay;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::GateContext;
use crate::phase::PhaseEvent;

/// Maximum number of state entries to keep in history.
///
/// Held prompts re-enter themselves every few hundred milliseconds, so the
/// history covers roughly the last half minute of an idle device and the
/// last few complete scan cycles of a busy one.
const MAX_HISTORY_SIZE: usize = 100;

/// Messages the status display can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    /// Power-on banner.
    Start,

    /// Asks for the next card to register.
    RegisterPrompt,

    /// Asks for a card to verify.
    CheckPrompt,

    /// Last verified card was granted.
    Accepted,

    /// Last verified card was denied.
    Denied,

    /// Last registration scan was a duplicate.
    AlreadyRegistered,

    /// The registry has been filled.
    Finished,
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisplayState::Start => "Start",
            DisplayState::RegisterPrompt => "RegisterPrompt",
            DisplayState::CheckPrompt => "CheckPrompt",
            DisplayState::Accepted => "Accepted",
            DisplayState::Denied => "Denied",
            DisplayState::AlreadyRegistered => "AlreadyRegistered",
            DisplayState::Finished => "Finished",
        };
        write!(f, "{name}")
    }
}

impl DisplayState {
    /// State entered after this one's dwell when no controller intervenes.
    ///
    /// Held states return themselves.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatekeeper_controller::DisplayState;
    ///
    /// assert_eq!(DisplayState::Start.next(), DisplayState::RegisterPrompt);
    /// assert_eq!(DisplayState::Denied.next(), DisplayState::CheckPrompt);
    /// assert_eq!(DisplayState::CheckPrompt.next(), DisplayState::CheckPrompt);
    /// ```
    pub fn next(self) -> DisplayState {
        match self {
            DisplayState::Start => DisplayState::RegisterPrompt,
            DisplayState::RegisterPrompt => DisplayState::RegisterPrompt,
            DisplayState::CheckPrompt => DisplayState::CheckPrompt,
            DisplayState::Accepted => DisplayState::CheckPrompt,
            DisplayState::Denied => DisplayState::CheckPrompt,
            DisplayState::AlreadyRegistered => DisplayState::RegisterPrompt,
            DisplayState::Finished => DisplayState::CheckPrompt,
        }
    }

    /// Check if the state waits for a controller request instead of moving on.
    pub fn is_held(self) -> bool {
        self.next() == self
    }

    /// Text of both display lines. `registered` is the number of cards
    /// already in the registry.
    pub fn lines(self, registered: usize) -> (String, String) {
        let (first, second) = match self {
            DisplayState::Start => (MSG_BANNER, MSG_GREETING),
            DisplayState::RegisterPrompt => {
                return (
                    MSG_REGISTER.to_string(),
                    format!("{MSG_REGISTER_CARD_NO}{}", registered + 1),
                );
            }
            DisplayState::CheckPrompt => (MSG_ENTER, MSG_ENTER_CARD),
            DisplayState::Accepted => (MSG_CARD_ACCEPTED, ""),
            DisplayState::Denied => (MSG_CARD_DENIED, ""),
            DisplayState::AlreadyRegistered => (MSG_ALREADY, MSG_REGISTERED),
            DisplayState::Finished => (MSG_FINISHED, MSG_REGISTRATION),
        };
        (first.to_string(), second.to_string())
    }
}

/// Dwell time of every display state, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DwellTimes {
    pub start_ms: u64,
    pub register_ms: u64,
    pub check_ms: u64,
    pub result_ms: u64,
    pub already_registered_ms: u64,
    pub finished_ms: u64,
}

impl DwellTimes {
    /// Dwell of `state`.
    pub fn of(&self, state: DisplayState) -> u64 {
        match state {
            DisplayState::Start => self.start_ms,
            DisplayState::RegisterPrompt => self.register_ms,
            DisplayState::CheckPrompt => self.check_ms,
            DisplayState::Accepted | DisplayState::Denied => self.result_ms,
            DisplayState::AlreadyRegistered => self.already_registered_ms,
            DisplayState::Finished => self.finished_ms,
        }
    }
}

impl Default for DwellTimes {
    fn default() -> Self {
        Self::from(&GateConfig::default())
    }
}

impl From<&GateConfig> for DwellTimes {
    fn from(config: &GateConfig) -> Self {
        Self {
            start_ms: config.start_dwell_ms,
            register_ms: config.register_dwell_ms,
            check_ms: config.check_dwell_ms,
            result_ms: config.result_dwell_ms,
            already_registered_ms: config.already_registered_dwell_ms,
            finished_ms: config.finished_dwell_ms,
        }
    }
}

/// One rendered state, with the time it was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateEntry {
    /// State shown before this entry; `None` for the first render.
    pub from: Option<DisplayState>,

    /// State entered.
    pub to: DisplayState,

    /// Clock reading at entry.
    pub at_ms: u64,
}

impl StateEntry {
    /// Check if this entry redrew the state that was already shown.
    pub fn is_reentry(&self) -> bool {
        self.from == Some(self.to)
    }
}

/// Display state machine with per-state dwell times.
#[derive(Debug, Clone)]
pub struct DisplaySequencer {
    /// State rendered at the next dwell expiry.
    pending: DisplayState,

    /// State currently on the display.
    current: Option<DisplayState>,

    /// When the current state was entered.
    entered_at_ms: u64,

    /// Dwell of the current state; zero before the first render.
    dwell_ms: u64,

    dwell_times: DwellTimes,

    /// Recent entries (limited to MAX_HISTORY_SIZE).
    history: VecDeque<StateEntry>,
}

impl DisplaySequencer {
    /// Create a sequencer that draws the start banner on its first tick at
    /// or after `now_ms`.
    pub fn new(dwell_times: DwellTimes, now_ms: u64) -> Self {
        Self {
            pending: DisplayState::Start,
            current: None,
            entered_at_ms: now_ms,
            dwell_ms: 0,
            dwell_times,
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    /// State currently on the display, `None` before the first tick.
    pub fn current(&self) -> Option<DisplayState> {
        self.current
    }

    /// State that will be entered when the current dwell expires.
    pub fn pending(&self) -> DisplayState {
        self.pending
    }

    pub fn entered_at_ms(&self) -> u64 {
        self.entered_at_ms
    }

    /// Dwell of the current state.
    pub fn dwell_ms(&self) -> u64 {
        self.dwell_ms
    }

    /// Milliseconds until the current dwell expires (zero once it has).
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(self.entered_at_ms);
        self.dwell_ms.saturating_sub(elapsed)
    }

    /// Recent state entries, oldest first.
    pub fn history(&self) -> &VecDeque<StateEntry> {
        &self.history
    }

    /// Entries that changed the displayed state, skipping held-state redraws.
    pub fn transitions(&self) -> impl Iterator<Item = &StateEntry> {
        self.history.iter().filter(|entry| !entry.is_reentry())
    }

    /// Advance the display if the current dwell has elapsed.
    ///
    /// A display request left in `ctx` by a controller is picked up first
    /// and replaces the pending state, whether or not the dwell has elapsed.
    /// Returns the entry when a state was rendered this tick.
    pub fn tick<D: CharacterDisplay + ?Sized>(
        &mut self,
        ctx: &mut GateContext,
        display: &mut D,
        now_ms: u64,
    ) -> Option<StateEntry> {
        if let Some(requested) = ctx.take_display_request() {
            debug!("Display request {} replaces pending {}", requested, self.pending);
            self.pending = requested;
        }

        if now_ms.saturating_sub(self.entered_at_ms) < self.dwell_ms {
            return None;
        }

        let state = self.pending;
        render(state, ctx, display);
        enter(state, ctx);

        let entry = StateEntry {
            from: self.current,
            to: state,
            at_ms: now_ms,
        };
        if !entry.is_reentry() {
            debug!("Display {:?} -> {} at {}ms", self.current, state, now_ms);
        }

        self.current = Some(state);
        self.pending = state.next();
        self.dwell_ms = self.dwell_times.of(state);
        self.entered_at_ms = now_ms;
        self.add_to_history(entry);

        Some(entry)
    }

    /// Add an entry to history, maintaining size limit.
    fn add_to_history(&mut self, entry: StateEntry) {
        self.history.push_back(entry);
        if self.history.len() > MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
    }
}

fn render<D: CharacterDisplay + ?Sized>(state: DisplayState, ctx: &GateContext, display: &mut D) {
    let (first, second) = state.lines(ctx.registry().len());

    display.clear();
    display.print(&first);
    if !second.is_empty() {
        display.set_cursor(0, 1);
        display.print(&second);
    }
}

fn enter(state: DisplayState, ctx: &mut GateContext) {
    match state {
        DisplayState::RegisterPrompt | DisplayState::AlreadyRegistered => {
            ctx.apply(PhaseEvent::RegistrationPromptShown);
        }
        DisplayState::CheckPrompt => {
            ctx.apply(PhaseEvent::CheckPromptShown);
            ctx.cooldown_mut().stop();
            ctx.set_decision(None);
        }
        DisplayState::Start
        | DisplayState::Accepted
        | DisplayState::Denied
        | DisplayState::Finished => {}
    }
}
