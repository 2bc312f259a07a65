//! Fixed-capacity, append-only card registry.
//!
//! The registry is the whitelist built during the registration phase. It
//! keeps identifiers in insertion order, never holds the same identifier
//! twice, and refuses further additions once its capacity is reached. There
//! is no removal: the registry only grows until the process ends.
//!
//! # Examples
//!
//! ```
//! use gatekeeper_core::{AddOutcome, CardId, CardRegistry};
//!
//! let mut registry = CardRegistry::new(2);
//! let a = CardId::new([1, 2, 3, 4, 5]);
//! let b = CardId::new([6, 7, 8, 9, 10]);
//!
//! assert_eq!(registry.try_add(a), AddOutcome::Added { index: 0 });
//! assert_eq!(registry.try_add(a), AddOutcome::Duplicate { index: 0 });
//! assert_eq!(registry.try_add(b), AddOutcome::Added { index: 1 });
//! assert_eq!(registry.try_add(a), AddOutcome::Full);
//!
//! assert!(registry.is_full());
//! assert!(registry.contains(&b));
//! ```

use crate::types::CardId;

/// Result of [`CardRegistry::try_add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The identifier was appended at `index`.
    Added { index: usize },

    /// The identifier is already stored at `index`; nothing changed.
    Duplicate { index: usize },

    /// The registry is at capacity; nothing changed.
    Full,
}

/// Ordered whitelist of card identifiers with a fixed capacity.
#[derive(Debug, Clone)]
pub struct CardRegistry {
    cards: Vec<CardId>,
    capacity: usize,
}

impl CardRegistry {
    /// Create an empty registry that accepts at most `capacity` cards.
    pub fn new(capacity: usize) -> Self {
        Self {
            cards: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Check whether `id` byte-equals a stored identifier.
    pub fn contains(&self, id: &CardId) -> bool {
        self.position(id).is_some()
    }

    /// Index of `id` in insertion order, if stored.
    pub fn position(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|stored| stored == id)
    }

    /// Append `id` unless the registry is full or already holds it.
    ///
    /// The full check comes first, so a duplicate presented to a full
    /// registry reports [`AddOutcome::Full`].
    pub fn try_add(&mut self, id: CardId) -> AddOutcome {
        if self.is_full() {
            return AddOutcome::Full;
        }

        if let Some(index) = self.position(&id) {
            return AddOutcome::Duplicate { index };
        }

        self.cards.push(id);
        AddOutcome::Added {
            index: self.cards.len() - 1,
        }
    }

    /// Identifier stored at `index`.
    pub fn get(&self, index: usize) -> Option<&CardId> {
        self.cards.get(index)
    }

    /// Number of stored identifiers.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Maximum number of identifiers this registry accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.capacity
    }

    /// Iterate stored identifiers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CardId> {
        self.cards.iter()
    }
}
