//! Parser configuration.
//!
//! Configuration can be built in code or loaded from a TOML file:
//!
//! ```toml
//! flag_prefix = "--"
//! duplicate_commands = "reject"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// What to do when a command name is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later registration replaces the earlier one
    #[default]
    Replace,

    /// The later registration fails and the earlier one is kept
    Reject,
}

/// Settings for an [`ArgParser`](crate::ArgParser).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Marker that identifies a token as a flag
    pub flag_prefix: String,

    /// Behaviour on duplicate command registration
    pub duplicate_commands: DuplicatePolicy,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            flag_prefix: "--".to_string(),
            duplicate_commands: DuplicatePolicy::Replace,
        }
    }
}

impl ParserConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ParserConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flag_prefix.is_empty() {
            return Err(ConfigError::EmptyFlagPrefix);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_gives_defaults() {
        let config = ParserConfig::from_toml_str("").unwrap();
        assert_eq!(config, ParserConfig::default());
        assert_eq!(config.flag_prefix, "--");
        assert_eq!(config.duplicate_commands, DuplicatePolicy::Replace);
    }

    #[test]
    fn parses_all_fields() {
        let config = ParserConfig::from_toml_str(
            r#"
            flag_prefix = "+"
            duplicate_commands = "reject"
            "#,
        )
        .unwrap();

        assert_eq!(config.flag_prefix, "+");
        assert_eq!(config.duplicate_commands, DuplicatePolicy::Reject);
    }

    #[test]
    fn rejects_empty_prefix() {
        let err = ParserConfig::from_toml_str(r#"flag_prefix = """#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyFlagPrefix));
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = ParserConfig::from_toml_str(r#"duplicate_commands = "merge""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "duplicate_commands = \"reject\"").unwrap();

        let config = ParserConfig::load(file.path()).unwrap();
        assert_eq!(config.duplicate_commands, DuplicatePolicy::Reject);
        assert_eq!(config.flag_prefix, "--");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ParserConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
