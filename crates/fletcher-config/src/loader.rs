//! Configuration loader with layered approach.
//!
//! The loader applies configuration documents in layers, later layers
//! overriding earlier ones key by key. Documents are JSON or TOML, selected
//! by file extension.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use fletcher_core::Config;

use crate::error::ConfigError;

/// Layered configuration loader.
///
/// # Example
///
/// ```no_run
/// use fletcher_config::ConfigLoader;
///
/// # fn main() -> Result<(), fletcher_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_file("defaults.toml")?
///     .with_file("server.json")?
///     .load();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    document: Map<String, Value>,
}

impl ConfigLoader {
    /// Creates a loader with an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a configuration file as the next layer.
    ///
    /// The format is chosen by extension: `.json` or `.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, unparseable,
    /// of an unsupported format, or not object-shaped at the top level.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let value = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str::<Value>(&text)?,
            Some("toml") => {
                let table: toml::Table = toml::from_str(&text)?;
                serde_json::to_value(table)?
            }
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let Value::Object(layer) = value else {
            return Err(ConfigError::NotAnObject {
                path: path.to_path_buf(),
            });
        };

        tracing::debug!(path = %path.display(), keys = layer.len(), "applied configuration layer");
        self.document.extend(layer);
        Ok(self)
    }

    /// Applies an in-memory JSON object as the next layer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLayer`] if the value is not an object.
    pub fn with_value(mut self, value: Value) -> Result<Self, ConfigError> {
        let Value::Object(layer) = value else {
            return Err(ConfigError::InvalidLayer);
        };
        self.document.extend(layer);
        Ok(self)
    }

    /// Produces the final configuration from the layered document.
    #[must_use]
    pub fn load(self) -> Config {
        let mut config = Config::new();
        for (key, value) in self.document {
            config.set(key, value);
        }
        config
    }
}

/// Loads a single configuration file.
///
/// # Errors
///
/// Same failure modes as [`ConfigLoader::with_file`].
pub fn load_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    Ok(ConfigLoader::new().with_file(path)?.load())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_load_json_file() {
        let file = temp_file(".json", r#"{"main": "greeter", "serverPort": 9090}"#);
        let config = load_file(file.path()).unwrap();
        assert_eq!(config.main(), Some("greeter"));
        assert_eq!(config.server_port(), Some(9090));
    }

    #[test]
    fn test_load_toml_file() {
        let file = temp_file(".toml", "main = \"greeter\"\nserverPort = 9090\n");
        let config = load_file(file.path()).unwrap();
        assert_eq!(config.main(), Some("greeter"));
        assert_eq!(config.server_port(), Some(9090));
    }

    #[test]
    fn test_later_layer_overrides_earlier() {
        let base = temp_file(".json", r#"{"greet": "hello", "main": "greeter"}"#);
        let site = temp_file(".json", r#"{"greet": "howdy"}"#);
        let config = ConfigLoader::new()
            .with_file(base.path())
            .unwrap()
            .with_file(site.path())
            .unwrap()
            .load();
        assert_eq!(config.get_str("greet"), Some("howdy"));
        assert_eq!(config.main(), Some("greeter"));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = load_file("/nonexistent/server.json").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let file = temp_file(".json", r#"["not", "an", "object"]"#);
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject { .. }));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let file = temp_file(".yaml", "main: greeter\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let file = temp_file(".json", r#"{"main": "#);
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::JsonError(_)));
    }
}
