//! Peripheral abstraction layer for the Gatekeeper access controller.
//!
//! This crate provides the capability traits through which the controller
//! drives its peripherals (card reader, character display, digital outputs,
//! diagnostic log and clock), together with mock implementations that let
//! the controller run without physical hardware.
//!
//! # Design Philosophy
//!
//! - **Non-blocking**: every call returns immediately. The controller is a
//!   single poll loop and simulates waiting by comparing timestamps.
//! - **Infallible at the seam**: a failed card read is reported as "no
//!   identifier", and display or output writes are assumed to succeed, so
//!   the controller has no error path to handle mid-iteration.
//! - **Swappable**: drivers and mocks implement the same traits, and the
//!   controller is generic over them.
//!
//! # Example
//!
//! ```
//! use gatekeeper_core::CardId;
//! use gatekeeper_hardware::mock::{MockActuator, MockCardReader};
//! use gatekeeper_hardware::traits::{Actuator, CardReader};
//! use gatekeeper_hardware::types::{OutputChannel, OutputLevel};
//!
//! let (mut reader, handle) = MockCardReader::new();
//! let mut outputs = MockActuator::new();
//!
//! handle.present_card(CardId::new([1, 2, 3, 4, 5])).unwrap();
//! if reader.is_card_present() && reader.read_identifier().is_some() {
//!     outputs.set_output(OutputChannel::AcceptIndicator, OutputLevel::On);
//! }
//! reader.release();
//!
//! assert_eq!(outputs.level(OutputChannel::AcceptIndicator), OutputLevel::On);
//! ```

pub mod clock;
pub mod error;
pub mod mock;
pub mod sink;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use clock::MonotonicClock;
pub use error::{HardwareError, Result};
pub use sink::TracingSink;
pub use traits::{Actuator, CardReader, CharacterDisplay, Clock, DiagnosticSink};
pub use types::{OutputChannel, OutputLevel};
