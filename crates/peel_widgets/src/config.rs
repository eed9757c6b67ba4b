//! Peel configuration (peel.toml)
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock behavior: expand past 25% drag, pin between 40% and 70%, spring with
//! a 0.6s response.

use crate::error::{ConfigError, Result};
use peel_animation::SpringConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

/// Top-level configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub peel: PeelConfig,
    #[serde(default)]
    pub list: ListConfig,
}

/// Behavior and styling of a single peelable card
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PeelConfig {
    /// Gesture-end progress that must be exceeded to expand
    pub expand_threshold: f32,
    /// Lower bound of the pinned progress while expanded
    pub pin_min: f32,
    /// Upper bound of the pinned progress while expanded
    pub pin_max: f32,
    /// Progress over which the flap highlight fades in
    pub glow_ramp: f32,
    pub glow_width: f32,
    /// Spring response in seconds
    pub spring_response: f32,
    /// Spring damping fraction (1.0 = critical)
    pub spring_damping: f32,
    pub card_corner_radius: f32,
    pub panel_corner_radius: f32,
    /// Vertical inset of the delete panel behind the card
    pub panel_inset: f32,
    pub delete_button_width: f32,
    pub shadow_opacity: f32,
    pub tint_opacity: f32,
}

impl Default for PeelConfig {
    fn default() -> Self {
        Self {
            expand_threshold: 0.25,
            pin_min: 0.4,
            pin_max: 0.7,
            glow_ramp: 0.05,
            glow_width: 60.0,
            spring_response: 0.6,
            spring_damping: 0.7,
            card_corner_radius: 10.0,
            panel_corner_radius: 15.0,
            panel_inset: 8.0,
            delete_button_width: 84.0,
            shadow_opacity: 0.3,
            tint_opacity: 0.25,
        }
    }
}

impl PeelConfig {
    pub fn pin_range(&self) -> RangeInclusive<f32> {
        self.pin_min..=self.pin_max
    }

    pub fn spring(&self) -> SpringConfig {
        SpringConfig::from_response(self.spring_response, self.spring_damping)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.expand_threshold > 0.0 && self.expand_threshold < 1.0) {
            return Err(invalid(
                "peel.expand_threshold",
                format!("{} is not inside (0, 1)", self.expand_threshold),
            ));
        }
        if !(0.0..=1.0).contains(&self.pin_min) || !(0.0..=1.0).contains(&self.pin_max) {
            return Err(invalid(
                "peel.pin_min/pin_max",
                format!("{}..={} is not inside [0, 1]", self.pin_min, self.pin_max),
            ));
        }
        if self.pin_min > self.pin_max {
            return Err(invalid(
                "peel.pin_min/pin_max",
                format!("{} is greater than {}", self.pin_min, self.pin_max),
            ));
        }
        if !(self.spring_response > 0.0) {
            return Err(invalid("peel.spring_response", "must be positive".into()));
        }
        if !(self.spring_damping > 0.0) {
            return Err(invalid("peel.spring_damping", "must be positive".into()));
        }
        if self.glow_ramp < 0.0 {
            return Err(invalid("peel.glow_ramp", "must not be negative".into()));
        }
        Ok(())
    }
}

/// Vertical list layout
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ListConfig {
    pub spacing: f32,
    pub padding: f32,
    pub card_height: f32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            spacing: 15.0,
            padding: 15.0,
            card_height: 130.0,
        }
    }
}

impl ListConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.card_height > 0.0) {
            return Err(invalid("list.card_height", "must be positive".into()));
        }
        if self.spacing < 0.0 || self.padding < 0.0 {
            return Err(invalid(
                "list.spacing/padding",
                "must not be negative".into(),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

impl Config {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.peel.validate()?;
        self.list.validate()
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.peel.expand_threshold, 0.25);
        assert_eq!(config.peel.pin_range(), 0.4..=0.7);
        assert_eq!(config.list.card_height, 130.0);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml_str(
            r#"
            [peel]
            expand_threshold = 0.3

            [list]
            spacing = 20.0
            "#,
        )
        .unwrap();

        assert_eq!(config.peel.expand_threshold, 0.3);
        assert_eq!(config.peel.pin_max, 0.7);
        assert_eq!(config.list.spacing, 20.0);
        assert_eq!(config.list.padding, 15.0);
    }

    #[test]
    fn test_rejects_inverted_pin_range() {
        let err = Config::from_toml_str("[peel]\npin_min = 0.8\npin_max = 0.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field, .. } if field == "peel.pin_min/pin_max"));
    }

    #[test]
    fn test_rejects_threshold_out_of_range() {
        assert!(Config::from_toml_str("[peel]\nexpand_threshold = 1.5\n").is_err());
        assert!(Config::from_toml_str("[peel]\nexpand_threshold = 0.0\n").is_err());
    }

    #[test]
    fn test_rejects_non_positive_spring() {
        assert!(Config::from_toml_str("[peel]\nspring_response = 0.0\n").is_err());
        assert!(Config::from_toml_str("[peel]\nspring_damping = -1.0\n").is_err());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = Config::from_toml_str("[peel\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_defaults_render_and_reparse() {
        let text = Config::default().to_toml().unwrap();
        assert!(text.contains("expand_threshold"));
        assert_eq!(Config::from_toml_str(&text).unwrap(), Config::default());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/peel.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/peel.toml"));
    }
}
