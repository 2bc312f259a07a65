//! Controller phase and its transition table.
//!
//! A single [`Phase`] value decides which controller may consume a scan. It
//! replaces a pair of independent lock flags: registration is either armed
//! or busy, verification is either armed or busy, and the two halves never
//! overlap.
//!
//! # Transitions
//!
//! | From | Event | To |
//! |---|---|---|
//! | `RegistrationBusy` | `RegistrationPromptShown` | `RegistrationArmed` |
//! | `RegistrationArmed` | `RegistrationPromptShown` | `RegistrationArmed` |
//! | `RegistrationArmed` | `CardRegistered` | `RegistrationBusy` |
//! | `RegistrationArmed` | `RegistrationCompleted` | `VerificationBusy` |
//! | `VerificationBusy` | `CheckPromptShown` | `VerificationArmed` |
//! | `VerificationArmed` | `CheckPromptShown` | `VerificationArmed` |
//! | `VerificationArmed` | `CardVerified` | `VerificationBusy` |
//!
//! Any other pair leaves the phase unchanged. In particular nothing leads
//! from a verification phase back to registration.
//!
//! The controller powers on in `RegistrationArmed`, so a card tapped while
//! the start banner is shown is registered.
//!
//! # Examples
//!
//! ```
//! use gatekeeper_controller::{Phase, PhaseEvent};
//!
//! let phase = Phase::default();
//! assert_eq!(phase, Phase::RegistrationArmed);
//!
//! let phase = phase.apply(PhaseEvent::CardRegistered);
//! assert_eq!(phase, Phase::RegistrationBusy);
//!
//! let phase = phase.apply(PhaseEvent::RegistrationPromptShown);
//! assert!(phase.is_armed());
//!
//! let phase = phase.apply(PhaseEvent::RegistrationCompleted);
//! assert_eq!(phase, Phase::VerificationBusy);
//! assert!(phase.is_verification());
//!
//! // Registration cannot be re-armed once finished
//! assert_eq!(phase.apply(PhaseEvent::RegistrationPromptShown), Phase::VerificationBusy);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which controller accepts scans, and whether it is currently accepting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Registration accepts the next scan. This is the power-on phase.
    #[default]
    RegistrationArmed,

    /// Registration is waiting for the display to prompt again.
    RegistrationBusy,

    /// Verification accepts the next scan.
    VerificationArmed,

    /// Verification is waiting for the display to prompt again.
    VerificationBusy,
}

/// Events that drive the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseEvent {
    /// The display entered the registration prompt or the duplicate message.
    RegistrationPromptShown,

    /// A scan was registered or rejected as duplicate, registry not yet full.
    CardRegistered,

    /// The scan that filled the registry was registered.
    RegistrationCompleted,

    /// The display entered the verification prompt.
    CheckPromptShown,

    /// A scan was granted or denied.
    CardVerified,
}

impl Phase {
    /// Phase reached by applying `event`, or `None` when the event does not
    /// apply in this phase.
    pub fn next(self, event: PhaseEvent) -> Option<Phase> {
        use Phase::*;
        use PhaseEvent::*;

        match (self, event) {
            (RegistrationBusy | RegistrationArmed, RegistrationPromptShown) => {
                Some(RegistrationArmed)
            }
            (RegistrationArmed, CardRegistered) => Some(RegistrationBusy),
            (RegistrationArmed, RegistrationCompleted) => Some(VerificationBusy),
            (VerificationBusy | VerificationArmed, CheckPromptShown) => Some(VerificationArmed),
            (VerificationArmed, CardVerified) => Some(VerificationBusy),
            _ => None,
        }
    }

    /// Apply `event`, keeping the current phase if it does not apply.
    pub fn apply(self, event: PhaseEvent) -> Phase {
        self.next(event).unwrap_or(self)
    }

    /// Check if the whitelist is still being built.
    pub fn is_registration(self) -> bool {
        matches!(self, Phase::RegistrationArmed | Phase::RegistrationBusy)
    }

    /// Check if scans are checked against the whitelist.
    pub fn is_verification(self) -> bool {
        matches!(self, Phase::VerificationArmed | Phase::VerificationBusy)
    }

    /// Check if the phase's controller accepts a scan right now.
    pub fn is_armed(self) -> bool {
        matches!(self, Phase::RegistrationArmed | Phase::VerificationArmed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::RegistrationArmed => "RegistrationArmed",
            Phase::RegistrationBusy => "RegistrationBusy",
            Phase::VerificationArmed => "VerificationArmed",
            Phase::VerificationBusy => "VerificationBusy",
        };
        write!(f, "{name}")
    }
}
