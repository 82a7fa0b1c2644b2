//! ==============================================================================
//! config.rs - devtools configuration loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `devtools.toml`.
//!     loads configuration from file or falls back to defaults.
//!
//! structure:
//!     - ControlUnitServerConfig: where the payload stub listens.
//!     - SensorUnitServerConfig: where the handshake stub listens, and the id it hands out.
//!     - TokenConfig: secret and unit-id files for the token helpers.
//!     - LoggingConfig: default log filter when RUST_LOG is unset.
//!
//! every section may be omitted; omitted sections take the defaults below.
//!
//! ==============================================================================

use crate::error::{Error, Result};

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DevtoolsConfig {
    pub control_unit_server: ControlUnitServerConfig,
    pub sensor_unit_server: SensorUnitServerConfig,
    pub token: TokenConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ControlUnitServerConfig {
    pub listen_address: SocketAddr,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SensorUnitServerConfig {
    pub listen_address: SocketAddr,
    /// returned by every /connect handshake
    pub sensor_id: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TokenConfig {
    pub secret_file: PathBuf,
    pub unit_id_file: PathBuf,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

impl Default for ControlUnitServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
        }
    }
}

impl Default for SensorUnitServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            sensor_id: "123".to_string(),
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret_file: PathBuf::from("secret.key"),
            unit_id_file: PathBuf::from("control_unit_id"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl DevtoolsConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load from the first existing default location, or fall back to defaults.
    ///
    /// Returns the path that was loaded, if any. A file that exists but does not
    /// parse is an error rather than a silent fallback.
    pub fn load_or_default() -> Result<(Self, Option<PathBuf>)> {
        let paths = [
            PathBuf::from("config").join("devtools.toml"),
            PathBuf::from("..").join("config").join("devtools.toml"),
        ];

        for path in paths {
            if path.exists() {
                let config = Self::load(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((Self::default(), None))
    }

    /// Log configuration summary
    pub fn log_summary(&self) {
        tracing::info!(
            control_unit_listen = %self.control_unit_server.listen_address,
            sensor_unit_listen = %self.sensor_unit_server.listen_address,
            sensor_id = %self.sensor_unit_server.sensor_id,
            secret_file = %self.token.secret_file.display(),
            unit_id_file = %self.token.unit_id_file.display(),
            log_level = %self.logging.level,
            "devtools configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = DevtoolsConfig::parse("").unwrap();
        assert_eq!(config, DevtoolsConfig::default());
        assert_eq!(
            config.control_unit_server.listen_address,
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(config.sensor_unit_server.sensor_id, "123");
        assert_eq!(config.token.secret_file, PathBuf::from("secret.key"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let config = DevtoolsConfig::parse(include_str!("../config/devtools.toml")).unwrap();
        assert_eq!(config, DevtoolsConfig::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = DevtoolsConfig::parse(
            r#"
            [sensor_unit_server]
            sensor_id = "abc"

            [token]
            secret_file = "/etc/devtools/secret.key"
            "#,
        )
        .unwrap();

        assert_eq!(config.sensor_unit_server.sensor_id, "abc");
        assert_eq!(
            config.sensor_unit_server.listen_address,
            default_listen_address()
        );
        assert_eq!(
            config.token.secret_file,
            PathBuf::from("/etc/devtools/secret.key")
        );
        assert_eq!(config.token.unit_id_file, PathBuf::from("control_unit_id"));
    }

    #[test]
    fn bad_listen_address_is_rejected() {
        assert!(DevtoolsConfig::parse(
            r#"
            [control_unit_server]
            listen_address = "not an address"
            "#
        )
        .is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DevtoolsConfig::load("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
