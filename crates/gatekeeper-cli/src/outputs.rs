//! Emulated output bank.

use gatekeeper_hardware::traits::Actuator;
use gatekeeper_hardware::types::{OutputChannel, OutputLevel};
use tracing::info;

/// Output bank that logs level changes.
///
/// The controller rewrites outputs that are already off while a result
/// message is shown; only actual changes are logged.
#[derive(Debug, Default)]
pub struct LoggingActuator {
    levels: [OutputLevel; OutputChannel::ALL.len()],
}

impl LoggingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, channel: OutputChannel) -> OutputLevel {
        self.levels[slot(channel)]
    }
}

impl Actuator for LoggingActuator {
    fn set_output(&mut self, channel: OutputChannel, level: OutputLevel) {
        let current = &mut self.levels[slot(channel)];
        if *current != level {
            info!("{} -> {}", channel, level);
            *current = level;
        }
    }
}

fn slot(channel: OutputChannel) -> usize {
    match channel {
        OutputChannel::AcceptIndicator => 0,
        OutputChannel::DenyIndicator => 1,
        OutputChannel::Alarm => 2,
        OutputChannel::LockActuator => 3,
    }
}
