//! Common test utilities for controller integration tests.
//!
//! [`Harness`] wires an [`AccessController`] to mock peripherals and a
//! [`ManualClock`], and advances simulated time in poll-sized steps so that
//! tests read like a timeline:
//!
//! ```ignore
//! let mut h = Harness::new(1);
//! h.run_until(1000);                    // banner, then registration prompt
//! h.present(card('A'));
//! h.step();                             // scan consumed
//! h.run_until_state(DisplayState::CheckPrompt);
//! ```

#![allow(dead_code)]

use gatekeeper_controller::{AccessController, DisplayState, Peripherals, Phase, PollReport};
use gatekeeper_core::{CardId, GateConfig};
use gatekeeper_hardware::mock::{
    ManualClock, MockActuator, MockCardReader, MockCardReaderHandle, RecordingSink, VirtualLcd,
};
use gatekeeper_hardware::traits::Clock;
use gatekeeper_hardware::types::{OutputChannel, OutputLevel};

/// Poll period used by the harness, matching the default configuration.
pub const POLL_MS: u64 = 10;

/// Upper bound on simulated time for the `*_until_*` helpers.
const TIME_LIMIT_MS: u64 = 120_000;

pub type TestGate =
    AccessController<MockCardReader, VirtualLcd, MockActuator, ManualClock, RecordingSink>;

/// Card identifier derived from a single letter, e.g. `card('A')`.
pub fn card(letter: char) -> CardId {
    CardId::new([0xC0, 0xFF, 0xEE, 0x00, letter as u8])
}

pub struct Harness {
    pub gate: TestGate,
    pub card: MockCardReaderHandle,
    pub clock: ManualClock,
    pub reports: Vec<PollReport>,
}

impl Harness {
    /// Controller with default timings and the given capacity, polled once
    /// at t = 0.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(GateConfig::default().with_capacity(capacity))
    }

    pub fn with_config(config: GateConfig) -> Self {
        let (reader, card) = MockCardReader::new();
        let clock = ManualClock::new();
        let peripherals = Peripherals {
            reader,
            display: VirtualLcd::default(),
            actuator: MockActuator::new(),
            clock: clock.clone(),
        };
        let gate = AccessController::new(config, peripherals)
            .expect("valid config")
            .with_sink(RecordingSink::new());

        let mut harness = Self {
            gate,
            card,
            clock,
            reports: Vec::new(),
        };
        harness.poll();
        harness
    }

    pub fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Poll at the current time without advancing the clock.
    pub fn poll(&mut self) -> PollReport {
        let report = self.gate.poll_once();
        self.reports.push(report);
        report
    }

    /// Advance one poll period and poll.
    pub fn step(&mut self) -> PollReport {
        self.clock.advance(POLL_MS);
        self.poll()
    }

    /// Poll every period until the clock reaches `t_ms`.
    pub fn run_until(&mut self, t_ms: u64) {
        while self.now() < t_ms {
            self.step();
        }
    }

    /// Poll until `predicate` holds after a poll, returning that poll's report.
    pub fn run_until_report(&mut self, predicate: impl Fn(&PollReport, &TestGate) -> bool) -> PollReport {
        loop {
            assert!(self.now() < TIME_LIMIT_MS, "condition not reached within {TIME_LIMIT_MS}ms");
            let report = self.step();
            if predicate(&report, &self.gate) {
                return report;
            }
        }
    }

    /// Poll until the display enters `state`.
    pub fn run_until_state(&mut self, state: DisplayState) -> PollReport {
        self.run_until_report(|report, _| report.rendered.is_some_and(|entry| entry.to == state))
    }

    /// Poll until the controller reaches `phase`.
    pub fn run_until_phase(&mut self, phase: Phase) -> PollReport {
        self.run_until_report(|_, gate| gate.context().phase() == phase)
    }

    pub fn present(&self, id: CardId) {
        self.card.present_card(id).expect("reader alive");
    }

    /// Wait for the registration prompt, present `id` and poll once.
    pub fn register(&mut self, id: CardId) -> PollReport {
        if self.gate.context().phase() != Phase::RegistrationArmed {
            self.run_until_phase(Phase::RegistrationArmed);
        }
        self.present(id);
        self.step()
    }

    /// Wait for the verification prompt, present `id` and poll once.
    pub fn verify(&mut self, id: CardId) -> PollReport {
        if self.gate.context().phase() != Phase::VerificationArmed {
            self.run_until_phase(Phase::VerificationArmed);
        }
        self.present(id);
        self.step()
    }

    pub fn level(&self, channel: OutputChannel) -> OutputLevel {
        self.gate.actuator().level(channel)
    }

    pub fn lines(&self) -> Vec<String> {
        self.gate.display().lines_trimmed()
    }

    pub fn current_state(&self) -> Option<DisplayState> {
        self.gate.sequencer().current()
    }
}
