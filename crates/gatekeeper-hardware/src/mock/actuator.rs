//! Mock actuator bank that records every output write.

use std::collections::HashMap;

use crate::traits::Actuator;
use crate::types::{OutputChannel, OutputLevel};

/// Records the current level of each channel and the full write history.
///
/// # Examples
///
/// ```
/// use gatekeeper_hardware::mock::MockActuator;
/// use gatekeeper_hardware::traits::Actuator;
/// use gatekeeper_hardware::types::{OutputChannel, OutputLevel};
///
/// let mut outputs = MockActuator::new();
/// outputs.set_output(OutputChannel::Alarm, OutputLevel::On);
///
/// assert_eq!(outputs.level(OutputChannel::Alarm), OutputLevel::On);
/// assert_eq!(outputs.level(OutputChannel::AcceptIndicator), OutputLevel::Off);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockActuator {
    levels: HashMap<OutputChannel, OutputLevel>,
    writes: Vec<(OutputChannel, OutputLevel)>,
}

impl MockActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level of `channel`; channels never written read as `Off`.
    pub fn level(&self, channel: OutputChannel) -> OutputLevel {
        self.levels.get(&channel).copied().unwrap_or_default()
    }

    /// Check whether every channel is currently off.
    pub fn all_off(&self) -> bool {
        OutputChannel::ALL
            .iter()
            .all(|channel| !self.level(*channel).is_on())
    }

    /// Every write in call order.
    pub fn writes(&self) -> &[(OutputChannel, OutputLevel)] {
        &self.writes
    }
}

impl Actuator for MockActuator {
    fn set_output(&mut self, channel: OutputChannel, level: OutputLevel) {
        self.levels.insert(channel, level);
        self.writes.push((channel, level));
    }
}
