//! Configuration management for the RAX FTP client
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! environment variables prefixed with `RAX_FTP_CLIENT_`.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::transfer::TransferType;

const CONFIG_PATHS: [&str; 2] = [
    "config/client", // ./config/client.toml
    "rax-ftp-client", // ./rax-ftp-client.toml
];
const ENV_PREFIX: &str = "RAX_FTP_CLIENT";

/// Client configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    /// Control port used when `connect` is given no port
    pub default_port: u16,

    /// Transfer type in effect before any `type` command
    /// Environment: RAX_FTP_CLIENT_DEFAULT_TRANSFER_TYPE
    pub default_transfer_type: TransferType,

    /// Buffer size for data connection copies
    pub buffer_size: usize,

    /// Default log filter; `RUST_LOG` overrides it
    pub log_level: String,

    /// Interactive prompt
    pub prompt: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_port: 21,
            default_transfer_type: TransferType::Image,
            buffer_size: 4096,
            log_level: "warn".to_string(),
            prompt: "ftp> ".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the optional TOML files with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();
        for path in CONFIG_PATHS {
            builder = builder.add_source(File::with_name(path).required(false));
        }
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.default_port == 0 {
            return Err(config::ConfigError::Message(
                "default_port cannot be 0".into(),
            ));
        }

        if self.buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }

        if self.prompt.is_empty() {
            return Err(config::ConfigError::Message(
                "prompt cannot be empty".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(text: &str) -> Result<ClientConfig, config::ConfigError> {
        let config: ClientConfig = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.default_port, 21);
        assert_eq!(config.default_transfer_type, TransferType::Image);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_toml("default_port = 2121\ndefault_transfer_type = \"A\"\n").unwrap();
        assert_eq!(config.default_port, 2121);
        assert_eq!(config.default_transfer_type, TransferType::Ascii);
        assert_eq!(config.buffer_size, 4096);
        assert_eq!(config.prompt, "ftp> ");
    }

    #[test]
    fn test_invalid_values() {
        assert!(from_toml("default_port = 0").is_err());
        assert!(from_toml("buffer_size = 0").is_err());
        assert!(from_toml("prompt = \"\"").is_err());
        assert!(from_toml("default_transfer_type = \"E\"").is_err());
    }
}
