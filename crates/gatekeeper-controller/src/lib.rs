//! State machines of the Gatekeeper access controller.
//!
//! The controller first builds a whitelist of cards in a one-time
//! registration phase, then grants or denies every later scan against it.
//! Four components share one [`GateContext`] and run in a fixed order on
//! every poll of the [`AccessController`]:
//!
//! - [`RegistrationController`] appends new cards until the registry is full
//! - [`VerificationController`] decides scans and drives the indicators
//! - [`DisplaySequencer`] shows timed messages and re-arms the controllers
//! - [`PeripheralReset`] clears the indicators after a cooldown

pub mod context;
pub mod controller;
pub mod display;
pub mod phase;
pub mod registration;
pub mod reset;
pub mod verification;

pub use context::{Cooldown, Decision, GateContext, OutputState};
pub use controller::{AccessController, Peripherals, PollReport};
pub use display::{DisplaySequencer, DisplayState, DwellTimes, StateEntry};
pub use phase::{Phase, PhaseEvent};
pub use registration::RegistrationController;
pub use reset::PeripheralReset;
pub use verification::VerificationController;
