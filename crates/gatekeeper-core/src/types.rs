use crate::{Result, constants::CARD_ID_LENGTH, error::Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// Contactless card identifier (5 bytes).
///
/// # Security
/// This type implements constant-time comparison so that membership checks
/// take the same time regardless of where two identifiers differ.
///
/// # Examples
///
/// ```
/// use gatekeeper_core::CardId;
///
/// let id: CardId = "DE:AD:BE:EF:42".parse().unwrap();
/// assert_eq!(id.as_bytes(), &[0xDE, 0xAD, 0xBE, 0xEF, 0x42]);
/// assert_eq!(id.to_string(), "DEADBEEF42");
/// ```
#[derive(Debug, Clone, Copy, Eq, Serialize, Deserialize)]
pub struct CardId([u8; CARD_ID_LENGTH]);

impl CardId {
    /// Create a card identifier from its raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; CARD_ID_LENGTH]) -> Self {
        CardId(bytes)
    }

    /// Create a card identifier from a byte slice.
    ///
    /// # Errors
    /// Returns `Error::InvalidCardLength` if the slice is not exactly
    /// [`CARD_ID_LENGTH`] bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; CARD_ID_LENGTH] =
            bytes.try_into().map_err(|_| Error::InvalidCardLength {
                expected: CARD_ID_LENGTH,
                actual: bytes.len(),
            })?;
        Ok(CardId(array))
    }

    /// Get the raw identifier bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; CARD_ID_LENGTH] {
        &self.0
    }

    /// Format the identifier as colon-separated hex pairs (`DE:AD:BE:EF:42`).
    #[must_use]
    pub fn to_string_separated(&self) -> String {
        self.0
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(":")
    }
}

impl From<[u8; CARD_ID_LENGTH]> for CardId {
    fn from(bytes: [u8; CARD_ID_LENGTH]) -> Self {
        CardId(bytes)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for CardId {
    type Err = Error;

    /// Parse an identifier from hex digits.
    ///
    /// Digits may be separated by `:`, `-` or whitespace; anything else is
    /// rejected.
    fn from_str(s: &str) -> Result<Self> {
        let digits: String = s
            .chars()
            .filter(|c| !matches!(c, ':' | '-') && !c.is_whitespace())
            .collect();

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidCardFormat(format!(
                "Card identifier must be hex digits, got {s:?}"
            )));
        }

        if digits.len() != CARD_ID_LENGTH * 2 {
            return Err(Error::InvalidCardFormat(format!(
                "Card identifier must be {} hex digits, got {}",
                CARD_ID_LENGTH * 2,
                digits.len()
            )));
        }

        let mut bytes = [0u8; CARD_ID_LENGTH];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &digits[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|e| Error::InvalidCardFormat(format!("{pair}: {e}")))?;
        }

        Ok(CardId(bytes))
    }
}

/// Constant-time comparison implementation for CardId
impl PartialEq for CardId {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl std::hash::Hash for CardId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
