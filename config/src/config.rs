//! Feature-flag configuration.
//!
//! Callers keep the active feature flags in a small YAML (or JSON) file and
//! may override individual flags on the command line.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! features:
//!   organizations:alert-rule-ui-component: true
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ui_schema_core::FeatureSet;

use crate::error::{ConfigError, Result};
use crate::loader::DocumentFormat;

/// Configuration format version written by [`FeatureConfig::save`].
pub const CONFIG_VERSION: &str = "1.0";

/// Feature flags supplied to the validator.
///
/// # Examples
///
/// ```
/// use ui_schema_config::FeatureConfig;
/// use ui_schema_core::ALERT_RULE_UI_COMPONENT;
///
/// let config = FeatureConfig::from_yaml_str(
///     "version: \"1.0\"\nfeatures:\n  organizations:alert-rule-ui-component: true\n",
/// )
/// .unwrap();
/// assert!(config.features.is_active(ALERT_RULE_UI_COMPONENT));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Configuration format version (e.g., `"1.0"`).
    #[serde(default = "default_version")]
    pub version: String,
    /// Flag name to active state; absent flags are inactive.
    #[serde(default)]
    pub features: FeatureSet,
}

fn default_version() -> String {
    CONFIG_VERSION.to_string()
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            features: FeatureSet::new(),
        }
    }
}

impl FeatureConfig {
    /// Loads configuration from a YAML or JSON file, chosen by extension.
    ///
    /// Files without a `.json` extension are read as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// a parse error if its contents are malformed, or
    /// [`InvalidConfig`](ConfigError::InvalidConfig) for an unsupported
    /// version.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = match DocumentFormat::from_path(path) {
            Some(DocumentFormat::Json) => serde_json::from_reader(reader)?,
            _ => serde_yaml::from_reader(reader)?,
        };
        config.check_version()?;
        debug!(
            path = %path.display(),
            flags = config.features.len(),
            "loaded feature configuration"
        );
        Ok(config)
    }

    /// Parses configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`YamlError`](ConfigError::YamlError) on malformed input or
    /// [`InvalidConfig`](ConfigError::InvalidConfig) for an unsupported
    /// version.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.check_version()?;
        Ok(config)
    }

    /// Saves the configuration, as JSON for `.json` paths and YAML otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be
    /// written, or a serialization error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        match DocumentFormat::from_path(path) {
            Some(DocumentFormat::Json) => serde_json::to_writer_pretty(writer, self)?,
            _ => serde_yaml::to_writer(writer, self)?,
        }
        Ok(())
    }

    /// Applies command-line overrides on top of the file's flags.
    pub fn with_overrides(mut self, overrides: &FeatureSet) -> Self {
        self.features.merge(overrides);
        self
    }

    fn check_version(&self) -> Result<()> {
        let major = self.version.split('.').next().unwrap_or_default();
        if major != "1" {
            return Err(ConfigError::InvalidConfig(format!(
                "unsupported configuration version '{}'",
                self.version
            )));
        }
        Ok(())
    }
}

/// Parses a `--feature` argument: `name`, `name=true` or `name=false`.
///
/// # Errors
///
/// Returns [`InvalidInput`](ConfigError::InvalidInput) for an empty name or
/// a value other than `true` / `false`.
///
/// # Examples
///
/// ```
/// use ui_schema_config::parse_feature_override;
///
/// assert_eq!(parse_feature_override("a").unwrap(), ("a".to_string(), true));
/// assert_eq!(parse_feature_override("a=false").unwrap(), ("a".to_string(), false));
/// assert!(parse_feature_override("a=maybe").is_err());
/// ```
pub fn parse_feature_override(raw: &str) -> Result<(String, bool)> {
    let (name, value) = match raw.split_once('=') {
        Some((name, value)) => (name.trim(), Some(value.trim())),
        None => (raw.trim(), None),
    };

    if name.is_empty() {
        return Err(ConfigError::InvalidInput(format!(
            "feature override '{raw}' has no flag name"
        )));
    }

    let active = match value {
        None | Some("true") => true,
        Some("false") => false,
        Some(other) => {
            return Err(ConfigError::InvalidInput(format!(
                "feature override '{raw}' must be 'true' or 'false', got '{other}'"
            )));
        }
    };

    Ok((name.to_string(), active))
}
