//! Per-device gateway configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{GatewayHost, Login, Password, SenderName, ValidationError};

#[derive(Debug, thiserror::Error)]
/// Gateway configuration could not be loaded. Fatal for the device.
pub enum ConfigError {
    #[error("cannot read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    host: String,
    user: String,
    password: String,
    #[serde(default)]
    user_display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Gateway endpoint and account used by one device.
pub struct GatewayConfig {
    pub host: GatewayHost,
    pub login: Login,
    pub password: Password,
    pub sender: SenderName,
}

impl GatewayConfig {
    /// Configuration file of device `number` inside `config_dir`, e.g. `kp_sms_gate_007.toml`.
    pub fn file_name(config_dir: impl AsRef<Path>, number: u32) -> PathBuf {
        config_dir
            .as_ref()
            .join(format!("kp_sms_gate_{number:03}.toml"))
    }

    /// Read and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(Self {
            host: GatewayHost::parse(&file.host)?,
            login: Login::new(file.user)?,
            password: Password::new(file.password)?,
            sender: SenderName::new(file.user_display_name),
        })
    }
}
