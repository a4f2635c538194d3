//! Parser for modorder.toml configuration files.
//!
//! modorder.toml is an optional overlay that points to the checkstyle.xml file
//! and can switch individual rules off without editing it. Example:
//!
//! ```toml
//! [checkstyle]
//! config = "config/checkstyle/checkstyle.xml"
//!
//! [rules]
//! ModifierOrder = "check"
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModorderConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Whether a configured rule runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleMode {
    /// Check and report violations.
    #[default]
    Check,
    /// Skip the rule entirely.
    Disabled,
}

impl<'de> Deserialize<'de> for RuleMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "check" | "on" => Ok(RuleMode::Check),
            "disabled" | "disable" | "off" => Ok(RuleMode::Disabled),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid rule mode: {s}. Expected check or disabled"
            ))),
        }
    }
}

/// Checkstyle-related configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CheckstyleReference {
    /// Path to checkstyle.xml config file.
    pub config: Option<String>,
}

/// Root modorder.toml configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ModorderConfig {
    /// Reference to checkstyle.xml.
    #[serde(default)]
    pub checkstyle: CheckstyleReference,

    /// Per-rule mode overrides.
    #[serde(default)]
    pub rules: HashMap<String, RuleMode>,
}

impl ModorderConfig {
    /// Parse a modorder.toml file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModorderConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse modorder.toml content.
    pub fn parse(content: &str) -> Result<Self, ModorderConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Get the mode for a specific rule, defaulting to [`RuleMode::Check`].
    pub fn rule_mode(&self, rule_name: &str) -> RuleMode {
        self.rules.get(rule_name).copied().unwrap_or_default()
    }

    /// Check if a rule is enabled.
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rule_mode(rule_name) != RuleMode::Disabled
    }
}
