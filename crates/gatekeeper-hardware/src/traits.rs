//! Peripheral capability traits.
//!
//! This module defines the narrow interfaces through which the controller
//! talks to its peripherals: the contactless card reader, the character
//! display, the digital outputs, the diagnostic log and the millisecond
//! clock. Real drivers and the mocks in [`crate::mock`] implement the same
//! traits, so the controller state machines can run against either.
//!
//! Every method runs to completion without waiting. The controller calls
//! them from a single poll loop and never expects them to block, so the
//! traits are synchronous and take `&mut self` wherever a call touches the
//! bus.

use gatekeeper_core::CardId;

use crate::types::{OutputChannel, OutputLevel};

/// Contactless card reader.
///
/// # Examples
///
/// ```
/// use gatekeeper_hardware::traits::CardReader;
/// use gatekeeper_core::CardId;
///
/// fn poll_card<R: CardReader>(reader: &mut R) -> Option<CardId> {
///     if !reader.is_card_present() {
///         return None;
///     }
///     let id = reader.read_identifier();
///     reader.release();
///     id
/// }
/// ```
pub trait CardReader {
    /// Check whether an active card is in the reader field.
    ///
    /// A card that has been [`release`](Self::release)d stays silent until it
    /// leaves the field and is presented again.
    fn is_card_present(&mut self) -> bool;

    /// Read the identifier of the card in the field.
    ///
    /// Returns `None` on a read failure, even when a card is present.
    fn read_identifier(&mut self) -> Option<CardId>;

    /// Halt the selected card so that it is not read again on the next poll.
    fn release(&mut self);
}

/// Character display with a cursor (HD44780 style).
pub trait CharacterDisplay {
    /// Clear all cells and move the cursor to the origin.
    fn clear(&mut self);

    /// Move the cursor to `col`, `row` (both 0-based).
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Write `text` at the cursor and advance it.
    fn print(&mut self, text: &str);
}

/// Digital outputs (indicators, buzzer, lock).
pub trait Actuator {
    /// Drive `channel` to `level`.
    fn set_output(&mut self, channel: OutputChannel, level: OutputLevel);
}

/// Write-only diagnostic text log.
///
/// Records are never read back by the controller and delivery failures are
/// ignored by implementations.
pub trait DiagnosticSink {
    fn log(&mut self, text: &str);
}

/// Monotonic millisecond counter.
pub trait Clock {
    /// Milliseconds elapsed since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;
}
