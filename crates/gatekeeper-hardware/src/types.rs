//! Common types shared across peripheral implementations.
//!
//! This module defines the actuator channels driven by the controller and
//! the two-level output state written to them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Digital output channels of the door controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputChannel {
    /// Green "accepted" indicator LED.
    AcceptIndicator,

    /// Red "denied" indicator LED.
    DenyIndicator,

    /// Buzzer sounded on a denied card.
    Alarm,

    /// Door lock actuator. Reserved; only driven when enabled in configuration.
    LockActuator,
}

impl OutputChannel {
    /// All channels, in wiring order.
    pub const ALL: [OutputChannel; 4] = [
        OutputChannel::AcceptIndicator,
        OutputChannel::DenyIndicator,
        OutputChannel::Alarm,
        OutputChannel::LockActuator,
    ];

    /// Channels that are switched on by a decision and cleared after the cooldown.
    pub const TRANSIENT: [OutputChannel; 3] = [
        OutputChannel::AcceptIndicator,
        OutputChannel::DenyIndicator,
        OutputChannel::Alarm,
    ];
}

impl fmt::Display for OutputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AcceptIndicator => "accept",
            Self::DenyIndicator => "deny",
            Self::Alarm => "alarm",
            Self::LockActuator => "lock",
        };
        write!(f, "{name}")
    }
}

/// Logic level written to an output channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputLevel {
    #[default]
    Off,
    On,
}

impl OutputLevel {
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for OutputLevel {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl fmt::Display for OutputLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "OFF"),
            Self::On => write!(f, "ON"),
        }
    }
}
