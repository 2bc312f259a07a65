//! Mock card reader implementation for testing and development.
//!
//! This module provides a simulated contactless reader that can be controlled
//! programmatically for testing without requiring physical hardware.

use gatekeeper_core::CardId;
use tokio::sync::mpsc;

use crate::{Result, traits::CardReader};

/// Mock card reader for testing and development.
///
/// The reader models a single card field. Presenting a card puts it in the
/// field as active; [`release`](CardReader::release) halts it, after which
/// it is silent until presented again or replaced. Events from the handle
/// are applied at the start of every reader call, so the reader never blocks.
///
/// # Examples
///
/// ```
/// use gatekeeper_core::CardId;
/// use gatekeeper_hardware::mock::MockCardReader;
/// use gatekeeper_hardware::traits::CardReader;
///
/// let (mut reader, handle) = MockCardReader::new();
/// let id = CardId::new([0x04, 0xAB, 0xCD, 0xEF, 0x01]);
///
/// handle.present_card(id).unwrap();
/// assert!(reader.is_card_present());
/// assert_eq!(reader.read_identifier(), Some(id));
///
/// reader.release();
/// assert!(!reader.is_card_present());
/// ```
#[derive(Debug)]
pub struct MockCardReader {
    /// Channel receiver for field events
    event_rx: mpsc::UnboundedReceiver<FieldEvent>,

    /// Card currently in the field
    field: Option<FieldCard>,

    /// Number of upcoming reads that fail
    pending_failures: u32,

    /// Number of `release()` calls so far
    releases: usize,
}

impl MockCardReader {
    /// Create a new mock reader.
    ///
    /// Returns a tuple of (MockCardReader, MockCardReaderHandle) where the
    /// handle can be used to simulate card presentations.
    pub fn new() -> (Self, MockCardReaderHandle) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let reader = Self {
            event_rx,
            field: None,
            pending_failures: 0,
            releases: 0,
        };

        (reader, MockCardReaderHandle { event_tx })
    }

    /// Number of times the controller released the reader.
    pub fn release_count(&self) -> usize {
        self.releases
    }

    /// Identifier of the card in the field, active or halted.
    pub fn card_in_field(&mut self) -> Option<CardId> {
        self.drain_events();
        self.field.map(|card| card.id)
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                FieldEvent::Presented(id) => {
                    self.field = Some(FieldCard { id, halted: false });
                }
                FieldEvent::Removed => self.field = None,
                FieldEvent::FailNextRead => self.pending_failures += 1,
            }
        }
    }

    fn active_card(&self) -> Option<CardId> {
        self.field.filter(|card| !card.halted).map(|card| card.id)
    }
}

impl CardReader for MockCardReader {
    fn is_card_present(&mut self) -> bool {
        self.drain_events();
        self.active_card().is_some()
    }

    fn read_identifier(&mut self) -> Option<CardId> {
        self.drain_events();
        let id = self.active_card()?;

        if self.pending_failures > 0 {
            self.pending_failures -= 1;
            return None;
        }

        Some(id)
    }

    fn release(&mut self) {
        self.drain_events();
        self.releases += 1;
        if let Some(card) = self.field.as_mut() {
            card.halted = true;
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FieldCard {
    id: CardId,
    halted: bool,
}

/// Internal event type for the mock reader.
#[derive(Debug, Clone, Copy)]
enum FieldEvent {
    Presented(CardId),
    Removed,
    FailNextRead,
}

/// Handle for controlling a mock card reader.
///
/// Handles are cheap to clone; all clones drive the same reader.
#[derive(Debug, Clone)]
pub struct MockCardReaderHandle {
    /// Channel sender for field events
    event_tx: mpsc::UnboundedSender<FieldEvent>,
}

impl MockCardReaderHandle {
    /// Bring a card into the reader field.
    ///
    /// Presenting a card again, including one that was halted, makes it
    /// active again, as if it had been taken away and tapped once more.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader has been dropped.
    pub fn present_card(&self, id: CardId) -> Result<()> {
        self.send(FieldEvent::Presented(id))
    }

    /// Parse a hex identifier such as `DE:AD:BE:EF:01` and present it.
    ///
    /// # Errors
    ///
    /// Returns `HardwareError::MalformedIdentifier` if `text` is not a card
    /// identifier, or an error if the reader has been dropped.
    pub fn present_hex(&self, text: &str) -> Result<CardId> {
        let id: CardId = text.parse()?;
        self.present_card(id)?;
        Ok(id)
    }

    /// Take the card out of the reader field.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader has been dropped.
    pub fn remove_card(&self) -> Result<()> {
        self.send(FieldEvent::Removed)
    }

    /// Make the next identifier read fail while the card stays present.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader has been dropped.
    pub fn fail_next_read(&self) -> Result<()> {
        self.send(FieldEvent::FailNextRead)
    }

    fn send(&self, event: FieldEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .map_err(|_| crate::HardwareError::disconnected("card reader"))
    }
}
