//! Roll server configuration
//!
//! Internet die servers accept a fixed menu of dice counts and die sides;
//! requests outside that menu are rejected locally before any network traffic.

use crate::core::error::{Result, TabulaError};
use serde::{Deserialize, Serialize};

/// Dice counts the server accepts per request
pub const LEGAL_DICE_COUNTS: &[u32] = &[
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20,
];

/// Die sides the server can roll
pub const LEGAL_DIE_SIDES: &[u32] = &[2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 13, 20, 30, 50, 100, 1000];

fn default_timeout_secs() -> u64 {
    30
}

fn default_report_format() -> String {
    "$details$ = $result$".to_string()
}

/// Configuration for the internet roll server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollServerConfig {
    /// Endpoint URL the roll request body is posted to
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Report template; `$details$` and `$result$` are substituted
    #[serde(default = "default_report_format")]
    pub report_format: String,

    /// Optional account password, sent as a `password=` line when set
    #[serde(default)]
    pub password: Option<String>,

    /// Optional registered email, sent as an `email=` line when set
    #[serde(default)]
    pub email: Option<String>,
}

impl RollServerConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: default_timeout_secs(),
            report_format: default_report_format(),
            password: None,
            email: None,
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| TabulaError::Config(e.to_string()))
    }

    /// Whether the server accepts a roll of `n_dice` dice with `n_sides` sides
    pub fn supports(&self, n_dice: u32, n_sides: u32) -> bool {
        LEGAL_DICE_COUNTS.contains(&n_dice) && LEGAL_DIE_SIDES.contains(&n_sides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_defaults() {
        let config = RollServerConfig::parse_toml(r#"url = "https://dice.example.com/roll""#)
            .expect("minimal config should parse");
        assert_eq!(config.url, "https://dice.example.com/roll");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.report_format, "$details$ = $result$");
        assert!(config.password.is_none());
    }

    #[test]
    fn test_parse_toml_full() {
        let config = RollServerConfig::parse_toml(
            r#"
            url = "https://dice.example.com/roll"
            timeout_secs = 5
            report_format = "$details$: $result$"
            password = "hunter2"
            email = "player@example.com"
            "#,
        )
        .expect("full config should parse");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.email.as_deref(), Some("player@example.com"));
    }

    #[test]
    fn test_parse_toml_missing_url_fails() {
        assert!(RollServerConfig::parse_toml("timeout_secs = 5").is_err());
    }

    #[test]
    fn test_supports() {
        let config = RollServerConfig::new("https://dice.example.com/roll");
        assert!(config.supports(2, 6));
        assert!(config.supports(20, 1000));
        assert!(!config.supports(21, 6));
        assert!(!config.supports(2, 7000));
    }
}
