//! Merged configuration from checkstyle.xml and modorder.toml.
//!
//! checkstyle.xml defines *what* rules run and their parameters.
//! modorder.toml can point at checkstyle.xml and switch rules off.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    CheckstyleConfig, CheckstyleError, Module, ModorderConfig, ModorderConfigError, RuleMode,
};

const MODORDER_CANDIDATES: &[&str] = &["modorder.toml", ".modorder.toml", "config/modorder.toml"];

const CHECKSTYLE_CANDIDATES: &[&str] = &[
    "checkstyle.xml",
    "config/checkstyle/checkstyle.xml",
    "config/checkstyle.xml",
    ".checkstyle.xml",
];

/// Error during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Checkstyle config error in {}: {source}", .path.display())]
    Checkstyle {
        path: PathBuf,
        #[source]
        source: CheckstyleError,
    },
    #[error("modorder.toml error in {}: {source}", .path.display())]
    Modorder {
        path: PathBuf,
        #[source]
        source: ModorderConfigError,
    },
    #[error("Checkstyle config not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("No configuration found")]
    NoConfig,
}

/// A configured rule with its properties and mode.
#[derive(Debug, Clone)]
pub struct ConfiguredRule {
    /// The rule name (checkstyle module name).
    pub name: String,
    /// Properties from checkstyle.xml.
    pub properties: HashMap<String, String>,
    /// Whether the rule runs (from modorder.toml).
    pub mode: RuleMode,
    /// Severity from the module, falling back to the Checker's.
    pub severity: Option<String>,
}

impl ConfiguredRule {
    /// Get a property value by name.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Get properties as a reference map (for FromConfig).
    pub fn properties_ref(&self) -> HashMap<&str, &str> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    /// Check if this rule is enabled.
    pub fn is_enabled(&self) -> bool {
        self.mode != RuleMode::Disabled
    }
}

/// Merged configuration combining checkstyle.xml and modorder.toml.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// All rules configured under TreeWalker.
    pub rules: Vec<ConfiguredRule>,
    /// Checker-level modules such as suppression filters.
    pub file_modules: Vec<Module>,
    /// The checkstyle.xml this configuration was loaded from.
    pub checkstyle_path: Option<PathBuf>,
}

impl MergedConfig {
    /// Create a merged config from checkstyle.xml and optional modorder.toml.
    pub fn new(checkstyle: &CheckstyleConfig, overlay: Option<&ModorderConfig>) -> Self {
        let default_severity = checkstyle.property("severity");

        let rules = checkstyle
            .rules()
            .into_iter()
            .map(|module| ConfiguredRule {
                name: module.name.clone(),
                properties: module
                    .properties
                    .iter()
                    .map(|p| (p.name.clone(), p.value.clone()))
                    .collect(),
                mode: overlay.map_or(RuleMode::Check, |o| o.rule_mode(&module.name)),
                severity: module
                    .property("severity")
                    .or(default_severity)
                    .map(str::to_string),
            })
            .collect();

        Self {
            rules,
            file_modules: checkstyle.file_modules().into_iter().cloned().collect(),
            checkstyle_path: None,
        }
    }

    /// Get enabled rules (not disabled).
    pub fn enabled_rules(&self) -> impl Iterator<Item = &ConfiguredRule> {
        self.rules.iter().filter(|r| r.is_enabled())
    }

    /// Get a specific rule by name.
    pub fn get_rule(&self, name: &str) -> Option<&ConfiguredRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Check if a rule is enabled.
    pub fn is_rule_enabled(&self, name: &str) -> bool {
        self.get_rule(name).is_some_and(ConfiguredRule::is_enabled)
    }

    /// Checker-level modules with the given name.
    pub fn file_modules_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Module> {
        self.file_modules.iter().filter(move |m| m.name == name)
    }
}

/// Builder for loading configuration from files.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    base_dir: PathBuf,
    checkstyle_path: Option<PathBuf>,
    modorder_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader that discovers files relative to the working directory.
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            checkstyle_path: None,
            modorder_path: None,
        }
    }

    /// Discover config files relative to `dir` instead.
    #[must_use]
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the checkstyle.xml path explicitly.
    #[must_use]
    pub fn checkstyle(mut self, path: impl AsRef<Path>) -> Self {
        self.checkstyle_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the modorder.toml path explicitly.
    #[must_use]
    pub fn modorder(mut self, path: impl AsRef<Path>) -> Self {
        self.modorder_path = Some(path.as_ref().to_path_buf());
        self
    }

    fn find(&self, candidates: &[&str]) -> Option<PathBuf> {
        candidates
            .iter()
            .map(|candidate| self.base_dir.join(candidate))
            .find(|path| path.is_file())
    }

    /// Load and merge the configuration.
    ///
    /// The checkstyle.xml path is taken from, in order: the explicit path,
    /// modorder.toml's `[checkstyle] config`, then the usual locations.
    pub fn load(self) -> Result<MergedConfig, ConfigError> {
        let modorder_path = self
            .modorder_path
            .clone()
            .or_else(|| self.find(MODORDER_CANDIDATES));

        let overlay = match modorder_path {
            Some(path) => {
                let overlay = ModorderConfig::from_file(&path)
                    .map_err(|source| ConfigError::Modorder {
                        path: path.clone(),
                        source,
                    })?;
                tracing::info!(path = %path.display(), "loaded modorder.toml");
                Some(overlay)
            }
            None => None,
        };

        let checkstyle_path = self
            .checkstyle_path
            .clone()
            .or_else(|| {
                overlay
                    .as_ref()
                    .and_then(|o| o.checkstyle.config.as_ref())
                    .map(|config| self.base_dir.join(config))
            })
            .or_else(|| self.find(CHECKSTYLE_CANDIDATES))
            .ok_or(ConfigError::NoConfig)?;

        if !checkstyle_path.is_file() {
            return Err(ConfigError::NotFound(checkstyle_path));
        }

        let checkstyle = CheckstyleConfig::from_file(&checkstyle_path).map_err(|source| {
            ConfigError::Checkstyle {
                path: checkstyle_path.clone(),
                source,
            }
        })?;
        tracing::info!(path = %checkstyle_path.display(), "loaded checkstyle config");

        let mut merged = MergedConfig::new(&checkstyle, overlay.as_ref());
        merged.checkstyle_path = Some(checkstyle_path);
        Ok(merged)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
