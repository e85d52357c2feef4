//! Configuration management for attrbean.
//!
//! Parses `attrbean.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Programmatic settings can be applied during load via [`Overrides`].
//!
//! ```toml
//! [processor]
//! attribute = "bean"
//! prefix = "th"
//! precedence = 1500
//! data_map_expansion = true
//! text_content = true
//! keep_empty = ["alt"]
//! ```

use std::path::{Path, PathBuf};

use attrbean_core::RESERVED_CONTENT_KEYS;
use serde::Deserialize;

/// Settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override the marker attribute name.
    pub attribute: Option<String>,
    /// Override the dialect prefix.
    pub prefix: Option<String>,
    /// Override the processor precedence.
    pub precedence: Option<i32>,
    /// Override `data` map expansion.
    pub data_map_expansion: Option<bool>,
    /// Override `text`/`utext` content replacement.
    pub text_content: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "attrbean.toml";

/// Marker attribute of the full processor variant.
pub const DEFAULT_ATTRIBUTE: &str = "bean";

/// Precedence of the bean processor among other template processors.
pub const DEFAULT_PRECEDENCE: i32 = 1500;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Processor configuration.
    pub processor: ProcessorConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Processor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Marker attribute name, without dialect prefix.
    pub attribute: String,
    /// Dialect prefix (`th` matches `th:bean` and `data-th-bean`).
    pub prefix: Option<String>,
    /// Precedence hint relative to other processors.
    pub precedence: i32,
    /// Expand a map-typed `data` property into `data-*` attributes.
    pub data_map_expansion: bool,
    /// Divert `text`/`utext` to element content.
    pub text_content: bool,
    /// Attributes set to an empty value instead of being removed.
    pub keep_empty: Vec<String>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            attribute: DEFAULT_ATTRIBUTE.to_owned(),
            prefix: None,
            precedence: DEFAULT_PRECEDENCE,
            data_map_expansion: true,
            text_content: true,
            keep_empty: Vec::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require an identifier made of ASCII letters, digits, `-` and `_`.
fn require_identifier(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "{field} may only contain letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `attrbean.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// Overrides are applied after loading and take precedence over file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides to the configuration.
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(attribute) = &overrides.attribute {
            self.processor.attribute.clone_from(attribute);
        }
        if let Some(prefix) = &overrides.prefix {
            self.processor.prefix = Some(prefix.clone());
        }
        if let Some(precedence) = overrides.precedence {
            self.processor.precedence = precedence;
        }
        if let Some(enabled) = overrides.data_map_expansion {
            self.processor.data_map_expansion = enabled;
        }
        if let Some(enabled) = overrides.text_content {
            self.processor.text_content = enabled;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let processor = &self.processor;
        require_identifier(&processor.attribute, "processor.attribute")?;

        if let Some(prefix) = &processor.prefix {
            require_identifier(prefix, "processor.prefix")?;
        }

        if let Some(reserved) = processor
            .keep_empty
            .iter()
            .find(|name| RESERVED_CONTENT_KEYS.contains(&name.as_str()))
        {
            return Err(ConfigError::Validation(format!(
                "processor.keep_empty cannot contain reserved key `{reserved}`"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.processor.attribute, "bean");
        assert_eq!(config.processor.prefix, None);
        assert_eq!(config.processor.precedence, 1500);
        assert!(config.processor.data_map_expansion);
        assert!(config.processor.text_content);
        assert!(config.processor.keep_empty.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.processor, ProcessorConfig::default());
    }

    #[test]
    fn test_parse_processor_config() {
        let toml = r#"
[processor]
attribute = "use"
prefix = "th"
precedence = 200
data_map_expansion = false
text_content = false
keep_empty = ["alt", "value"]
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(
            config.processor,
            ProcessorConfig {
                attribute: "use".to_owned(),
                prefix: Some("th".to_owned()),
                precedence: 200,
                data_map_expansion: false,
                text_content: false,
                keep_empty: vec!["alt".to_owned(), "value".to_owned()],
            }
        );
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("[processor\nattribute = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_empty_attribute_rejected() {
        let err = Config::parse("[processor]\nattribute = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("processor.attribute"));
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        let err = Config::parse("[processor]\nprefix = \"th:\"").unwrap_err();
        assert!(err.to_string().contains("processor.prefix"));
    }

    #[test]
    fn test_reserved_keep_empty_rejected() {
        let err = Config::parse("[processor]\nkeep_empty = [\"alt\", \"text\"]").unwrap_err();
        assert!(err.to_string().contains("`text`"));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        let overrides = Overrides {
            attribute: Some("use".to_owned()),
            text_content: Some(false),
            ..Default::default()
        };

        config.apply_overrides(&overrides);

        assert_eq!(config.processor.attribute, "use");
        assert!(!config.processor.text_content);
        assert!(config.processor.data_map_expansion); // Unchanged
        assert_eq!(config.processor.precedence, 1500); // Unchanged
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[processor]\nprecedence = 10\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.processor.precedence, 10);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_overrides_take_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[processor]\nattribute = \"bean\"\nprecedence = 10\n").unwrap();

        let overrides = Overrides {
            precedence: Some(99),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&overrides)).unwrap();
        assert_eq!(config.processor.precedence, 99);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let overrides = Overrides {
            attribute: Some("bad name".to_owned()),
            ..Default::default()
        };
        let result = Config::load(Some(&path), Some(&overrides));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&config_path, "").unwrap();
        let nested = dir.path().join("templates/partials");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_config(&nested), Some(config_path));
    }

    #[test]
    fn test_discover_none() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a");
        std::fs::create_dir_all(&nested).unwrap();

        // Only finds files inside the temp tree or above it
        if let Some(found) = Config::discover_config(&nested) {
            assert!(!found.starts_with(dir.path()));
        }
    }
}
