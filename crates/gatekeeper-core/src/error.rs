use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Card errors
    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("Invalid card length: expected {expected} bytes, got {actual}")]
    InvalidCardLength { expected: usize, actual: usize },

    // Configuration errors
    #[error("Invalid capacity {capacity}: must be between {min} and {max}")]
    InvalidCapacity {
        capacity: usize,
        min: usize,
        max: usize,
    },

    #[error("Invalid duration for {field}: must be greater than zero")]
    InvalidDuration { field: &'static str },

    #[error("Cooldown of {cooldown_ms}ms is longer than the {result_dwell_ms}ms result message")]
    CooldownExceedsResultDwell { cooldown_ms: u64, result_dwell_ms: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
