//! Core types for the Gatekeeper access controller.
//!
//! This crate holds everything the controller state machines share but that
//! does not touch hardware: the card identifier type, the fixed-capacity card
//! registry, the configuration surface, and the error type.

pub mod config;
pub mod constants;
pub mod error;
pub mod registry;
pub mod types;

pub use config::GateConfig;
pub use error::{Error, Result};
pub use registry::{AddOutcome, CardRegistry};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
