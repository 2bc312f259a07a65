//! End-to-end scenarios of the access controller on simulated time.
//!
//! Every test drives the full poll loop with mock peripherals, polling every
//! 10ms with the default timings:
//!
//! | State | Dwell |
//! |---|---|
//! | Start | 1000ms |
//! | RegisterPrompt | 300ms |
//! | CheckPrompt | 500ms |
//! | Accepted / Denied | 1000ms |
//! | AlreadyRegistered | 1000ms |
//! | Finished | 1500ms |
//!
//! and a 500ms indicator cooldown.

mod common;

use common::{Harness, card};
use gatekeeper_controller::{Decision, DisplayState, DwellTimes, Phase};
use gatekeeper_core::{AddOutcome, GateConfig};
use gatekeeper_hardware::types::{OutputChannel, OutputLevel};

/// Capacity-1 controller that registered card 'A' and reached the
/// verification prompt at t = 2800.
fn registered_a() -> Harness {
    let mut h = Harness::new(1);
    h.run_until(1000);
    h.register(card('A'));
    let report = h.run_until_state(DisplayState::CheckPrompt);
    assert_eq!(report.now_ms, 2800);
    h
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_power_on_shows_banner_then_register_prompt() {
    let mut h = Harness::new(1);

    assert_eq!(h.current_state(), Some(DisplayState::Start));
    assert_eq!(h.lines(), vec!["RFID SYSTEM", "Hi .."]);
    assert_eq!(h.gate.context().phase(), Phase::RegistrationArmed);

    let report = h.run_until_state(DisplayState::RegisterPrompt);
    assert_eq!(report.now_ms, 1000);
    assert_eq!(h.lines(), vec!["REGISTER your", "RFID CARD no: 1"]);
    assert_eq!(h.gate.context().phase(), Phase::RegistrationArmed);
}

#[test]
fn test_card_tapped_during_banner_is_registered() {
    let mut h = Harness::new(1);

    h.present(card('A'));
    let report = h.step();
    assert_eq!(report.now_ms, 10);
    assert_eq!(report.registration, Some(AddOutcome::Added { index: 0 }));
    assert!(report.registry_reported);
    assert_eq!(h.gate.context().phase(), Phase::VerificationBusy);

    // The banner keeps its full dwell, then registration is announced
    assert_eq!(h.current_state(), Some(DisplayState::Start));
    let report = h.run_until_state(DisplayState::Finished);
    assert_eq!(report.now_ms, 1000);

    let report = h.run_until_state(DisplayState::CheckPrompt);
    assert_eq!(report.now_ms, 2500);
    assert!(
        h.gate
            .sequencer()
            .history()
            .iter()
            .all(|entry| entry.to != DisplayState::RegisterPrompt)
    );
}

#[test]
fn test_scenario_register_single_card_then_finish() {
    let mut h = Harness::new(1);
    h.run_until(1000);

    h.present(card('A'));
    let report = h.step();

    assert_eq!(report.now_ms, 1010);
    assert_eq!(report.registration, Some(AddOutcome::Added { index: 0 }));
    assert!(report.registry_reported);
    assert_eq!(h.gate.context().registry().iter().copied().collect::<Vec<_>>(), vec![card('A')]);
    assert_eq!(h.gate.context().phase(), Phase::VerificationBusy);

    let report = h.run_until_state(DisplayState::Finished);
    assert_eq!(report.now_ms, 1300);
    assert_eq!(h.lines(), vec!["FINISHED", "REGISTRATION"]);

    let report = h.run_until_state(DisplayState::CheckPrompt);
    assert_eq!(report.now_ms, 2800);
    assert_eq!(h.lines(), vec!["ENTER your", "RFID CARD:"]);
    assert_eq!(h.gate.context().phase(), Phase::VerificationArmed);
}

#[test]
fn test_scenario_duplicate_waits_for_prompt_then_rejected() {
    let mut h = Harness::new(2);
    h.run_until(1000);

    h.present(card('A'));
    assert_eq!(h.step().registration, Some(AddOutcome::Added { index: 0 }));
    assert_eq!(h.gate.context().phase(), Phase::RegistrationBusy);

    // Presented again before the prompt re-enters: ignored and left in the field
    h.present(card('A'));
    for _ in 0..5 {
        assert_eq!(h.step().registration, None);
    }
    assert_eq!(h.gate.context().registry().len(), 1);

    let report = h.run_until_state(DisplayState::RegisterPrompt);
    assert_eq!(report.now_ms, 1300);
    assert_eq!(h.lines(), vec!["REGISTER your", "RFID CARD no: 2"]);

    let report = h.step();
    assert_eq!(report.registration, Some(AddOutcome::Duplicate { index: 0 }));

    let report = h.run_until_state(DisplayState::AlreadyRegistered);
    assert_eq!(report.now_ms, 1600);
    assert_eq!(h.lines(), vec!["CARD ALREADY", "REGISTERED"]);
    assert_eq!(h.gate.context().registry().len(), 1);
    assert!(h.gate.sink().contains("already registered"));

    // Back to the prompt for the second card
    let report = h.run_until_state(DisplayState::RegisterPrompt);
    assert_eq!(report.now_ms, 2600);
}

#[test]
fn test_registration_fills_registry_and_reports_once() {
    let mut h = Harness::new(3);
    for letter in ['A', 'B', 'C'] {
        h.register(card(letter));
    }

    let registry = h.gate.context().registry();
    assert!(registry.is_full());
    assert_eq!(registry.len(), 3);
    assert_eq!(h.gate.context().phase(), Phase::VerificationBusy);

    h.run_until_state(DisplayState::CheckPrompt);
    let reports = h.reports.iter().filter(|report| report.registry_reported).count();
    assert_eq!(reports, 1);
    assert!(h.gate.sink().contains("total no. of cards is: 3"));
    assert!(h.gate.sink().contains("card#3 C0:FF:EE:00:43"));
}

#[test]
fn test_registration_releases_reader_only_while_armed() {
    let mut h = Harness::new(2);

    // Armed from power-on: released on every poll, banner included
    h.run_until(490);
    assert_eq!(h.gate.reader().release_count(), 50);

    h.present(card('A'));
    h.step();
    assert_eq!(h.gate.reader().release_count(), 51);

    // Busy until the registration prompt re-arms at 1000
    h.run_until(1000);
    assert_eq!(h.gate.reader().release_count(), 51);

    h.step();
    h.step();
    assert_eq!(h.gate.reader().release_count(), 53);
}

// ============================================================================
// Verification
// ============================================================================

#[test]
fn test_scenario_known_card_is_granted() {
    let mut h = registered_a();

    let report = h.verify(card('A'));
    assert_eq!(report.now_ms, 2810);
    assert_eq!(report.decision, Some(Decision::Granted));
    assert_eq!(h.level(OutputChannel::AcceptIndicator), OutputLevel::On);
    assert_eq!(h.level(OutputChannel::DenyIndicator), OutputLevel::Off);
    assert_eq!(h.level(OutputChannel::Alarm), OutputLevel::Off);

    let report = h.run_until_state(DisplayState::Accepted);
    assert_eq!(report.now_ms, 3300);
    assert_eq!(h.lines(), vec!["CARD ACCEPTED", ""]);
    assert_eq!(h.level(OutputChannel::AcceptIndicator), OutputLevel::On);

    let report = h.run_until_report(|report, _| report.outputs_cleared);
    assert_eq!(report.now_ms, 3310);
    assert!(h.gate.actuator().all_off());

    let report = h.run_until_state(DisplayState::CheckPrompt);
    assert_eq!(report.now_ms, 4300);
    assert!(!h.gate.context().cooldown().is_active());
    assert_eq!(h.gate.context().decision(), None);
}

#[test]
fn test_scenario_unknown_card_is_denied() {
    let mut h = registered_a();

    let report = h.verify(card('B'));
    assert_eq!(report.decision, Some(Decision::Denied));
    assert_eq!(h.level(OutputChannel::AcceptIndicator), OutputLevel::Off);
    assert_eq!(h.level(OutputChannel::DenyIndicator), OutputLevel::On);
    assert_eq!(h.level(OutputChannel::Alarm), OutputLevel::On);
    assert!(h.gate.sink().contains("card denied"));

    h.run_until_state(DisplayState::Denied);
    assert_eq!(h.lines(), vec!["CARD DENIED", ""]);

    let report = h.run_until_report(|report, _| report.outputs_cleared);
    assert_eq!(report.now_ms, 3310);
    assert!(h.gate.actuator().all_off());

    h.run_until_state(DisplayState::CheckPrompt);
    assert_eq!(h.gate.context().phase(), Phase::VerificationArmed);
}

#[test]
fn test_one_decision_per_prompt() {
    let mut h = registered_a();
    h.verify(card('B'));

    // Re-presenting during the result message does nothing
    h.present(card('A'));
    h.run_until_state(DisplayState::Denied);
    let decisions = h.reports.iter().filter(|report| report.decision.is_some()).count();
    assert_eq!(decisions, 1);

    // The card left in the field is read at the next prompt
    h.run_until_state(DisplayState::CheckPrompt);
    assert_eq!(h.step().decision, Some(Decision::Granted));
}

#[test]
fn test_scan_during_finished_waits_for_check_prompt() {
    let mut h = Harness::new(1);
    h.run_until(1000);
    h.register(card('A'));
    h.run_until_state(DisplayState::Finished);

    h.present(card('A'));
    h.run_until(2790);
    assert!(h.reports.iter().all(|report| report.decision.is_none()));
    assert_eq!(h.gate.context().phase(), Phase::VerificationBusy);

    h.run_until_state(DisplayState::CheckPrompt);
    let report = h.step();
    assert_eq!(report.now_ms, 2810);
    assert_eq!(report.decision, Some(Decision::Granted));
}

#[test]
fn test_failed_read_takes_no_action() {
    let mut h = registered_a();

    h.card.fail_next_read().unwrap();
    let report = h.verify(card('A'));

    assert_eq!(report.decision, None);
    assert_eq!(h.gate.context().phase(), Phase::VerificationArmed);
    assert!(h.gate.actuator().all_off());
    assert!(!h.gate.context().cooldown().is_active());

    // The failed card was halted; tapping again is read normally
    assert_eq!(h.step().decision, None);
    h.present(card('A'));
    assert_eq!(h.step().decision, Some(Decision::Granted));
}

#[test]
fn test_lock_actuator_follows_grant_when_enabled() {
    let config = GateConfig {
        drive_lock_actuator: true,
        ..GateConfig::default()
    };
    let mut h = Harness::with_config(config);
    h.run_until(1000);
    h.register(card('A'));

    h.verify(card('A'));
    assert_eq!(h.level(OutputChannel::LockActuator), OutputLevel::On);

    h.run_until_report(|report, _| report.outputs_cleared);
    assert_eq!(h.level(OutputChannel::LockActuator), OutputLevel::Off);

    h.verify(card('B'));
    assert_eq!(h.level(OutputChannel::LockActuator), OutputLevel::Off);
}

#[test]
fn test_lock_actuator_untouched_by_default() {
    let mut h = registered_a();
    h.verify(card('A'));

    assert_eq!(h.level(OutputChannel::LockActuator), OutputLevel::Off);
    let lock_writes = h
        .gate
        .actuator()
        .writes()
        .iter()
        .filter(|(channel, level)| *channel == OutputChannel::LockActuator && level.is_on())
        .count();
    assert_eq!(lock_writes, 0);
}

// ============================================================================
// Timing
// ============================================================================

#[test]
fn test_dwell_is_respected_across_a_session() {
    let mut h = Harness::new(2);
    h.run_until(1000);
    h.register(card('A'));
    h.register(card('A'));
    h.register(card('B'));
    h.verify(card('A'));
    h.verify(card('Z'));
    h.run_until_state(DisplayState::CheckPrompt);

    let dwell = DwellTimes::default();
    let history: Vec<_> = h.gate.sequencer().history().iter().copied().collect();
    assert_eq!(history.len(), 10);

    for pair in history.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        assert_eq!(next.from, Some(prev.to));
        // Polls land on every 10ms and all dwells are multiples of 10ms, so
        // each transition happens exactly at its deadline
        assert_eq!(next.at_ms - prev.at_ms, dwell.of(prev.to), "{prev:?} -> {next:?}");
    }
}

#[test]
fn test_coarse_polling_transitions_at_first_poll_after_deadline() {
    let mut h = Harness::new(1);

    h.clock.set(730);
    assert!(h.poll().rendered.is_none());
    h.clock.set(1045);
    let report = h.poll();
    assert_eq!(report.rendered.map(|entry| entry.to), Some(DisplayState::RegisterPrompt));
    assert_eq!(h.gate.sequencer().entered_at_ms(), 1045);

    // The next dwell counts from the late entry
    h.clock.set(1344);
    assert!(h.poll().rendered.is_none());
    h.clock.set(1345);
    assert!(h.poll().rendered.is_some());
}

#[test]
fn test_outputs_cleared_repeatedly_until_check_prompt() {
    let mut h = registered_a();
    h.verify(card('B'));
    h.run_until_state(DisplayState::CheckPrompt);

    let clears: Vec<u64> = h
        .reports
        .iter()
        .filter(|report| report.outputs_cleared)
        .map(|report| report.now_ms)
        .collect();
    assert_eq!(clears, vec![3310, 3810]);
    assert!(h.gate.actuator().all_off());

    // Cooldown stopped at the prompt
    h.run_until(6000);
    assert_eq!(h.reports.iter().filter(|report| report.outputs_cleared).count(), 2);
}

#[test]
fn test_cooldown_ending_with_result_message_still_clears() {
    let config = GateConfig {
        cooldown_ms: 1000,
        ..GateConfig::default()
    };
    let mut h = Harness::with_config(config);
    h.run_until(1000);
    h.register(card('A'));
    h.run_until_state(DisplayState::CheckPrompt);

    // Decided on the poll that would redraw the prompt, so the result
    // message and the cooldown both start at 3300 and end at 4300
    h.run_until(3290);
    h.present(card('B'));
    let report = h.step();
    assert_eq!(report.decision, Some(Decision::Denied));
    assert_eq!(report.rendered.map(|entry| entry.to), Some(DisplayState::Denied));

    let report = h.run_until_report(|report, _| report.outputs_cleared);
    assert_eq!(report.now_ms, 4300);
    assert_eq!(report.rendered.map(|entry| entry.to), Some(DisplayState::CheckPrompt));
    assert_eq!(h.level(OutputChannel::DenyIndicator), OutputLevel::Off);
    assert_eq!(h.level(OutputChannel::Alarm), OutputLevel::Off);
    assert!(!h.gate.context().cooldown().is_active());
}
