//! Engine configuration.
//!
//! Every field has a default, so the page only needs to pass the values it
//! wants to override: `configure('{"reveal_interval_ms": 15}')`.

use serde::{Deserialize, Serialize};

use crate::error::{NetRunnerError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// localStorage key holding the character record.
    pub storage_key: String,
    /// Delay between two revealed dialogue characters.
    pub reveal_interval_ms: u32,
    /// Delay before a freshly mounted notification switches to `shown`.
    pub notification_enter_ms: u32,
    /// How long a notification stays up before leaving.
    pub notification_display_ms: u32,
    /// Exit transition for notifications, popups and prompts.
    pub transition_ms: u32,
    /// Live notification cap. The oldest is dropped on overflow.
    pub max_notifications: usize,
    pub max_name_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: "netrunner_character".to_string(),
            reveal_interval_ms: 30,
            notification_enter_ms: 10,
            notification_display_ms: 3000,
            transition_ms: 300,
            max_notifications: 5,
            max_name_len: 32,
        }
    }
}

impl Config {
    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(NetRunnerError::Config("storage_key must not be empty".into()));
        }
        if self.reveal_interval_ms == 0 {
            return Err(NetRunnerError::Config("reveal_interval_ms must be positive".into()));
        }
        if self.max_notifications == 0 {
            return Err(NetRunnerError::Config("max_notifications must be positive".into()));
        }
        if self.max_name_len == 0 {
            return Err(NetRunnerError::Config("max_name_len must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{"reveal_interval_ms": 5}"#).unwrap();
        assert_eq!(config.reveal_interval_ms, 5);
        assert_eq!(config.storage_key, "netrunner_character");
        assert_eq!(config.max_notifications, 5);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = Config::from_json(r#"{"reveal_interval_ms": 0}"#).unwrap_err();
        assert!(matches!(err, NetRunnerError::Config(_)));
    }

    #[test]
    fn zero_notification_cap_is_rejected() {
        assert!(Config::from_json(r#"{"max_notifications": 0}"#).is_err());
    }

    #[test]
    fn garbage_is_a_json_error() {
        assert!(matches!(
            Config::from_json("nope"),
            Err(NetRunnerError::Json(_))
        ));
    }
}
