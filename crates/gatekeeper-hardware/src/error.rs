//! Error types for peripheral plumbing.
//!
//! The capability traits themselves are infallible: a failed card read is
//! reported as "no identifier" and display or actuator writes are assumed to
//! succeed. These errors cover what surrounds the peripherals, such as a
//! mock handle whose device has been dropped.

/// Result type alias for hardware operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// The device behind a handle has been dropped.
    #[error("{device} is no longer attached")]
    Disconnected { device: &'static str },

    /// A card identifier given to an emulated device could not be parsed.
    #[error("Malformed card identifier: {0}")]
    MalformedIdentifier(#[from] gatekeeper_core::Error),
}

impl HardwareError {
    pub fn disconnected(device: &'static str) -> Self {
        Self::Disconnected { device }
    }
}
