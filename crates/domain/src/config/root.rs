use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::{IpPreference, ResolverConfig};
use crate::dns_protocol::TransportProtocol;

/// Main configuration structure for nsquery
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Nameservers and transport policy
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line. `None` (or an empty list) keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub nameservers: Vec<IpAddr>,
    pub port: Option<u16>,
    pub transport: Option<TransportProtocol>,
    pub ip_preference: Option<IpPreference>,
    pub timeout_ms: Option<u64>,
    pub fail_fast: Option<bool>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. nsquery.toml in current directory
    /// 3. /etc/nsquery/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("nsquery.toml").exists() {
            Self::from_file("nsquery.toml")?
        } else if std::path::Path::new("/etc/nsquery/config.toml").exists() {
            Self::from_file("/etc/nsquery/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if !overrides.nameservers.is_empty() {
            self.resolver.nameservers = overrides.nameservers;
        }
        if let Some(port) = overrides.port {
            self.resolver.port = port;
        }
        if let Some(transport) = overrides.transport {
            self.resolver.transport = transport;
        }
        if let Some(preference) = overrides.ip_preference {
            self.resolver.ip_preference = preference;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.resolver.timeout_ms = timeout_ms;
        }
        if let Some(fail_fast) = overrides.fail_fast {
            self.resolver.fail_fast = fail_fast;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.nameservers.is_empty() {
            return Err(ConfigError::Validation(
                "No nameservers configured".to_string(),
            ));
        }

        self.resolver.validate()
    }
}
