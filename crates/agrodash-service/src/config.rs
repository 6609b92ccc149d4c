//! Server configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server settings.
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Validate the configuration and return any errors.
    ///
    /// This checks:
    /// - Server bind address is valid (host:port format)
    /// - All three `[database]` keys (`user`, `password`, `dsn`) are present
    ///   and non-empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        errors.extend(self.server.validate());
        errors.extend(self.database.validate());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load and validate configuration from a file.
    ///
    /// This is a convenience method that combines `load()` and `validate()`.
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8050").
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8050".to_string(),
        }
    }
}

impl ServerConfig {
    /// Validate server configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.bind.is_empty() {
            errors.push(ValidationError {
                field: "server.bind".to_string(),
                message: "bind address cannot be empty".to_string(),
            });
            return errors;
        }

        let parts: Vec<&str> = self.bind.rsplitn(2, ':').collect();
        if parts.len() != 2 {
            errors.push(ValidationError {
                field: "server.bind".to_string(),
                message: format!(
                    "invalid bind address '{}': expected format 'host:port'",
                    self.bind
                ),
            });
        } else {
            match parts[0].parse::<u16>() {
                Ok(0) => {
                    errors.push(ValidationError {
                        field: "server.bind".to_string(),
                        message: "port cannot be 0".to_string(),
                    });
                }
                Err(_) => {
                    errors.push(ValidationError {
                        field: "server.bind".to_string(),
                        message: format!("invalid port '{}': must be a number 1-65535", parts[0]),
                    });
                }
                Ok(_) => {}
            }
        }

        errors
    }
}

/// Database connection settings.
///
/// All three keys are required; the monitoring database is provisioned by
/// the field-logging pipeline and the dashboard only ever reads from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Account the dashboard reads as.
    pub user: String,
    /// Credential for the account.
    pub password: String,
    /// Data source name: path to the monitoring database file.
    pub dsn: PathBuf,
}

impl DatabaseConfig {
    /// Validate database configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.user.is_empty() {
            errors.push(ValidationError {
                field: "database.user".to_string(),
                message: "user is required".to_string(),
            });
        }
        if self.password.is_empty() {
            errors.push(ValidationError {
                field: "database.password".to_string(),
                message: "password is required".to_string(),
            });
        }
        if self.dsn.as_os_str().is_empty() {
            errors.push(ValidationError {
                field: "database.dsn".to_string(),
                message: "dsn is required".to_string(),
            });
        }

        errors
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// A single validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field path (e.g., `database.dsn`).
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Default configuration file path.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agrodash")
        .join("agrodash.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_toml() -> &'static str {
        r#"
            [server]
            bind = "127.0.0.1:8050"

            [database]
            user = "agro_reader"
            password = "hunter2"
            dsn = "/var/lib/agrodash/field.db"
        "#
    }

    #[test]
    fn full_config_parses_and_validates() {
        let config: Config = toml::from_str(full_toml()).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8050");
        assert_eq!(config.database.user, "agro_reader");
        assert_eq!(config.database.dsn, PathBuf::from("/var/lib/agrodash/field.db"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_dsn_fails_validation_by_name() {
        let toml = r#"
            [database]
            user = "agro_reader"
            password = "hunter2"
        "#;
        let config: Config = toml::from_str(toml).unwrap();

        let err = config.validate().unwrap_err();
        let ConfigError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "database.dsn");
    }

    #[test]
    fn missing_database_section_reports_every_key() {
        let config: Config = toml::from_str("[server]\nbind = \"127.0.0.1:8050\"").unwrap();

        let err = config.validate().unwrap_err();
        let ConfigError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["database.user", "database.password", "database.dsn"]
        );
    }

    #[test]
    fn bind_address_validation() {
        let ok = ServerConfig {
            bind: "0.0.0.0:8050".to_string(),
        };
        assert!(ok.validate().is_empty());

        let no_port = ServerConfig {
            bind: "127.0.0.1".to_string(),
        };
        assert!(no_port.validate()[0].message.contains("host:port"));

        let port_zero = ServerConfig {
            bind: "127.0.0.1:0".to_string(),
        };
        assert!(port_zero.validate()[0].message.contains("cannot be 0"));

        let bad_port = ServerConfig {
            bind: "127.0.0.1:dash".to_string(),
        };
        assert!(bad_port.validate()[0].message.contains("must be a number"));
    }

    #[test]
    fn load_nonexistent_file_is_read_error() {
        let result = Config::load("/nonexistent/path/agrodash.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn load_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "this is not valid { toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn load_validated_rejects_incomplete_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("incomplete.toml");
        std::fs::write(
            &path,
            "[database]\nuser = \"agro_reader\"\npassword = \"hunter2\"\n",
        )
        .unwrap();

        let err = Config::load_validated(&path).unwrap_err();
        assert!(err.to_string().contains("database.dsn"));
    }

    #[test]
    fn default_config_path_ends_with_crate_dir() {
        let path = default_config_path();
        assert!(path.ends_with("agrodash/agrodash.toml"));
    }
}
