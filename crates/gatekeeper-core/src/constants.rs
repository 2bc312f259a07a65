//! Core constants for the Gatekeeper controller.
//!
//! This module centralizes the fixed values of the reference device: the card
//! identifier length, the registry capacity bounds, the default dwell and
//! cooldown timings, and the text shown on the 16×2 status display.
//!
//! # Usage
//!
//! ```
//! use gatekeeper_core::constants::*;
//! use std::time::Duration;
//!
//! assert_eq!(CARD_ID_LENGTH, 5);
//!
//! let cooldown = Duration::from_millis(DEFAULT_COOLDOWN_MS);
//! assert_eq!(cooldown.as_millis(), 500);
//! ```
//!
//! Every timing constant here is only a default; the values actually used at
//! runtime come from [`GateConfig`](crate::GateConfig).

// ============================================================================
// Card Identifiers
// ============================================================================

/// Length of a card identifier in bytes.
///
/// The reader returns a 4-byte UID followed by its BCC check byte, and the
/// controller treats all 5 bytes as the identifier.
pub const CARD_ID_LENGTH: usize = 5;

// ============================================================================
// Registry Capacity
// ============================================================================

/// Smallest registry capacity accepted by configuration validation.
pub const MIN_CAPACITY: usize = 1;

/// Largest registry capacity accepted by configuration validation.
///
/// # Value: 50 cards
///
/// The display prompt renders the card number after a 14-character label on
/// a 16-column line, so the number must stay within two digits.
pub const MAX_CAPACITY: usize = 50;

/// Default registry capacity of the reference device.
pub const DEFAULT_CAPACITY: usize = 1;

// ============================================================================
// Display Dwell Times (milliseconds)
// ============================================================================

/// Dwell of the start banner before the first registration prompt.
pub const DEFAULT_START_DWELL_MS: u64 = 1000;

/// Re-render period of the registration prompt.
pub const DEFAULT_REGISTER_DWELL_MS: u64 = 300;

/// Re-render period of the "present card" prompt.
pub const DEFAULT_CHECK_DWELL_MS: u64 = 500;

/// Dwell of the accepted/denied result messages.
pub const DEFAULT_RESULT_DWELL_MS: u64 = 1000;

/// Dwell of the "already registered" message.
pub const DEFAULT_ALREADY_REGISTERED_DWELL_MS: u64 = 1000;

/// Dwell of the "registration finished" message.
pub const DEFAULT_FINISHED_DWELL_MS: u64 = 1500;

// ============================================================================
// Peripheral Timing (milliseconds)
// ============================================================================

/// Delay between a grant/deny decision and clearing the indicator outputs.
pub const DEFAULT_COOLDOWN_MS: u64 = 500;

/// Interval between two iterations of the poll loop in the emulator binary.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

// ============================================================================
// Display Geometry
// ============================================================================

/// Number of rows on the status display.
pub const DISPLAY_ROWS: u8 = 2;

/// Number of columns on the status display.
pub const DISPLAY_COLUMNS: u8 = 16;

// ============================================================================
// Display Messages
// ============================================================================

/// Start banner, first line.
pub const MSG_BANNER: &str = "RFID SYSTEM";

/// Start banner, second line.
pub const MSG_GREETING: &str = "Hi ..";

/// Registration prompt, first line.
pub const MSG_REGISTER: &str = "REGISTER your";

/// Registration prompt, second line label. The card number follows it.
pub const MSG_REGISTER_CARD_NO: &str = "RFID CARD no: ";

/// Verification prompt, first line.
pub const MSG_ENTER: &str = "ENTER your";

/// Verification prompt, second line.
pub const MSG_ENTER_CARD: &str = "RFID CARD:";

/// Shown after a granted verification.
pub const MSG_CARD_ACCEPTED: &str = "CARD ACCEPTED";

/// Shown after a denied verification.
pub const MSG_CARD_DENIED: &str = "CARD DENIED";

/// Duplicate registration, first line.
pub const MSG_ALREADY: &str = "CARD ALREADY";

/// Duplicate registration, second line.
pub const MSG_REGISTERED: &str = "REGISTERED";

/// Registration complete, first line.
pub const MSG_FINISHED: &str = "FINISHED";

/// Registration complete, second line.
pub const MSG_REGISTRATION: &str = "REGISTRATION";
