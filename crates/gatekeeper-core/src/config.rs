//! Controller configuration.
//!
//! [`GateConfig`] is the whole configuration surface of the controller: the
//! registry capacity, the dwell time of every display state, the indicator
//! cooldown and the poll interval used by the emulator binary. Every field
//! has a default matching the reference device, so an empty TOML document is
//! a valid configuration.
//!
//! # Examples
//!
//! ```
//! use gatekeeper_core::GateConfig;
//!
//! let config = GateConfig::from_toml_str(
//!     r#"
//!     capacity = 3
//!     cooldown_ms = 750
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.capacity, 3);
//! assert_eq!(config.cooldown_ms, 750);
//! assert_eq!(config.register_dwell_ms, 300);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::{Error, Result};

/// Runtime configuration of the access controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Number of cards accepted during registration.
    pub capacity: usize,

    /// Dwell of the start banner.
    pub start_dwell_ms: u64,

    /// Re-render period of the registration prompt.
    pub register_dwell_ms: u64,

    /// Re-render period of the verification prompt.
    pub check_dwell_ms: u64,

    /// Dwell of the accepted and denied messages.
    pub result_dwell_ms: u64,

    /// Dwell of the duplicate registration message.
    pub already_registered_dwell_ms: u64,

    /// Dwell of the registration finished message.
    pub finished_dwell_ms: u64,

    /// Delay before indicator outputs are cleared after a decision.
    pub cooldown_ms: u64,

    /// Poll loop period used by the emulator binary.
    pub poll_interval_ms: u64,

    /// Also drive the lock actuator on a granted decision.
    pub drive_lock_actuator: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            start_dwell_ms: DEFAULT_START_DWELL_MS,
            register_dwell_ms: DEFAULT_REGISTER_DWELL_MS,
            check_dwell_ms: DEFAULT_CHECK_DWELL_MS,
            result_dwell_ms: DEFAULT_RESULT_DWELL_MS,
            already_registered_dwell_ms: DEFAULT_ALREADY_REGISTERED_DWELL_MS,
            finished_dwell_ms: DEFAULT_FINISHED_DWELL_MS,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            drive_lock_actuator: false,
        }
    }
}

impl GateConfig {
    /// Parse and validate a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The text is not valid TOML or names an unknown field
    /// - The parsed values fail [`validate`](Self::validate)
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GateConfig = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, otherwise the same
    /// errors as [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Set the registry capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Check value bounds.
    ///
    /// States that re-render themselves while held (the two prompts) need a
    /// non-zero dwell, and so do the cooldown and the poll interval. The
    /// cooldown must also elapse while the accepted or denied message is
    /// still shown, since the verification prompt stops it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCapacity`, `Error::InvalidDuration` or
    /// `Error::CooldownExceedsResultDwell` for the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&self.capacity) {
            return Err(Error::InvalidCapacity {
                capacity: self.capacity,
                min: MIN_CAPACITY,
                max: MAX_CAPACITY,
            });
        }

        let non_zero = [
            ("register_dwell_ms", self.register_dwell_ms),
            ("check_dwell_ms", self.check_dwell_ms),
            ("cooldown_ms", self.cooldown_ms),
            ("poll_interval_ms", self.poll_interval_ms),
        ];

        for (field, value) in non_zero {
            if value == 0 {
                return Err(Error::InvalidDuration { field });
            }
        }

        if self.cooldown_ms > self.result_dwell_ms {
            return Err(Error::CooldownExceedsResultDwell {
                cooldown_ms: self.cooldown_ms,
                result_dwell_ms: self.result_dwell_ms,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn test_default_matches_reference_device() {
        let config = GateConfig::default();

        assert_eq!(config.capacity, 1);
        assert_eq!(config.start_dwell_ms, 1000);
        assert_eq!(config.register_dwell_ms, 300);
        assert_eq!(config.check_dwell_ms, 500);
        assert_eq!(config.result_dwell_ms, 1000);
        assert_eq!(config.already_registered_dwell_ms, 1000);
        assert_eq!(config.finished_dwell_ms, 1500);
        assert_eq!(config.cooldown_ms, 500);
        assert!(!config.drive_lock_actuator);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = GateConfig::from_toml_str("").unwrap();
        assert_eq!(config, GateConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_fields() {
        let config = GateConfig::from_toml_str(
            r#"
            capacity = 4
            finished_dwell_ms = 2000
            drive_lock_actuator = true
            "#,
        )
        .unwrap();

        assert_eq!(config.capacity, 4);
        assert_eq!(config.finished_dwell_ms, 2000);
        assert!(config.drive_lock_actuator);
        assert_eq!(config.check_dwell_ms, DEFAULT_CHECK_DWELL_MS);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = GateConfig::from_toml_str("capacty = 2");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[rstest]
    #[case(0)]
    #[case(51)]
    fn test_capacity_out_of_range(#[case] capacity: usize) {
        let config = GateConfig::default().with_capacity(capacity);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidCapacity { .. })
        ));
    }

    #[rstest]
    #[case("register_dwell_ms = 0", "register_dwell_ms")]
    #[case("check_dwell_ms = 0", "check_dwell_ms")]
    #[case("cooldown_ms = 0", "cooldown_ms")]
    #[case("poll_interval_ms = 0", "poll_interval_ms")]
    fn test_zero_durations_rejected(#[case] toml: &str, #[case] expected: &str) {
        match GateConfig::from_toml_str(toml) {
            Err(Error::InvalidDuration { field }) => assert_eq!(field, expected),
            other => panic!("expected InvalidDuration, got {other:?}"),
        }
    }

    #[rstest]
    #[case(1000, true)]
    #[case(1001, false)]
    #[case(2000, false)]
    fn test_cooldown_bounded_by_result_dwell(#[case] cooldown_ms: u64, #[case] valid: bool) {
        let config = GateConfig {
            cooldown_ms,
            ..GateConfig::default()
        };

        match config.validate() {
            Ok(()) => assert!(valid),
            Err(Error::CooldownExceedsResultDwell {
                cooldown_ms: rejected,
                result_dwell_ms,
            }) => {
                assert!(!valid);
                assert_eq!(rejected, cooldown_ms);
                assert_eq!(result_dwell_ms, 1000);
            }
            Err(other) => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_shorter_result_dwell_rejects_default_cooldown() {
        let result = GateConfig::from_toml_str("result_dwell_ms = 400");
        assert!(matches!(
            result,
            Err(Error::CooldownExceedsResultDwell { cooldown_ms: 500, .. })
        ));
    }

    #[test]
    fn test_zero_start_dwell_allowed() {
        let config = GateConfig::from_toml_str("start_dwell_ms = 0").unwrap();
        assert_eq!(config.start_dwell_ms, 0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "capacity = 2").unwrap();
        writeln!(file, "cooldown_ms = 250").unwrap();

        let config = GateConfig::load(file.path()).unwrap();
        assert_eq!(config.capacity, 2);
        assert_eq!(config.cooldown_ms, 250);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let text = include_str!("../../../config/gatekeeper.toml");
        let config = GateConfig::from_toml_str(text).unwrap();
        assert_eq!(config, GateConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let result = GateConfig::load("/nonexistent/gatekeeper.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
