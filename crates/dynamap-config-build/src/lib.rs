//! Emitter configuration loaded from `dynamap.toml`.
//!
//! Every field has a compiled default, so an empty file (or no file at all)
//! yields a working configuration.

use dynamap_schema::validate::naming::validate_ident;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error as ThisError;

/// Largest accepted indent width for pretty output.
pub const MAX_INDENT: usize = 8;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("invalid config value for '{field}': {message}")]
    Validation { field: String, message: String },
}

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub model: ModelConfig,
    pub output: OutputConfig,
    pub timestamps: TimestampConfig,
}

impl Config {
    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&content, &path.display().to_string())
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Self::parse(toml_str, "<string>")
    }

    fn parse(toml_str: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.default_version.is_empty() {
            return Err(invalid("model.default_version", "must not be empty"));
        }
        if let Some(service) = &self.model.default_service
            && service.is_empty()
        {
            return Err(invalid("model.default_service", "must not be empty"));
        }

        validate_ident(&self.output.custom_type)
            .map_err(|msg| invalid("output.custom_type", &msg))?;

        let module = &self.output.import_module;
        if module.is_empty() || module.contains(['"', '\\', '\n']) {
            return Err(invalid(
                "output.import_module",
                "must be a non-empty module specifier without quotes",
            ));
        }
        if self.output.indent > MAX_INDENT {
            return Err(invalid(
                "output.indent",
                &format!("must be between 0 and {MAX_INDENT}"),
            ));
        }
        if self.timestamps.now_source.trim().is_empty() {
            return Err(invalid("timestamps.now_source", "must not be empty"));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

///
/// ModelConfig
///

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Version stamped on entities that do not declare one.
    pub default_version: String,

    /// Service stamped on entities that do not declare one.
    pub default_service: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default_version: "1".to_string(),
            default_service: None,
        }
    }
}

///
/// OutputConfig
///

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Module the custom attribute type is imported from.
    pub import_module: String,

    /// Name of the opaque custom attribute type constructor.
    pub custom_type: String,

    /// Prefix each entity binding with `export`.
    pub export: bool,

    /// Indent width for pretty output; `0` renders single-line literals.
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            import_module: "electrodb".to_string(),
            custom_type: "CustomAttributeType".to_string(),
            export: true,
            indent: 2,
        }
    }
}

///
/// TimestampConfig
///

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimestampConfig {
    /// Source text of the current-time producer used for default/set.
    pub now_source: String,
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self {
            now_source: "() => Date.now()".to_string(),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = Config::from_toml("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.model.default_version, "1");
        assert_eq!(config.output.import_module, "electrodb");
        assert_eq!(config.output.indent, 2);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = Config::from_toml(
            r#"
            [model]
            default_service = "hr"

            [output]
            indent = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.model.default_service.as_deref(), Some("hr"));
        assert_eq!(config.model.default_version, "1");
        assert_eq!(config.output.indent, 0);
        assert!(config.output.export);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml("[output]\nfoo = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn invalid_values_name_the_field() {
        let err = Config::from_toml("[output]\ncustom_type = \"not valid\"\n").unwrap_err();
        assert!(
            matches!(&err, ConfigError::Validation { field, .. } if field == "output.custom_type"),
            "unexpected error: {err}"
        );

        let err = Config::from_toml("[output]\nindent = 12\n").unwrap_err();
        assert!(matches!(&err, ConfigError::Validation { field, .. } if field == "output.indent"));

        let err = Config::from_toml("[model]\ndefault_version = \"\"\n").unwrap_err();
        assert!(
            matches!(&err, ConfigError::Validation { field, .. } if field == "model.default_version")
        );
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timestamps]\nnow_source = \"() => Date.now() * 1000\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.timestamps.now_source, "() => Date.now() * 1000");
    }

    #[test]
    fn load_reports_missing_files() {
        let err = Config::load(Path::new("/definitely/not/here/dynamap.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
