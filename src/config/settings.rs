//! Application settings configuration
//!
//! Defines general settings, certificate stores and the monitored hosts.

use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// General settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-host connect and handshake deadline in seconds
    pub timeout: u64,
    pub verify_chain: bool,
    pub show_warnings: bool,
    pub default_port: u16,
    /// Maximum number of hosts checked concurrently
    pub parallel: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: 10,
            verify_chain: false,
            show_warnings: true,
            default_port: 443,
            parallel: 8,
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=300).contains(&self.timeout) {
            return Err(invalid("settings.timeout", "must be between 1 and 300 seconds"));
        }
        if self.default_port == 0 {
            return Err(invalid("settings.default_port", "must be between 1 and 65535"));
        }
        if self.parallel == 0 {
            return Err(invalid("settings.parallel", "must be at least 1"));
        }
        Ok(())
    }
}

/// Certificate store locations
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// PEM bundle of trust anchors
    pub truststore: Option<PathBuf>,
}

/// A monitored host
#[derive(Debug, Clone, Deserialize)]
pub struct HostConfig {
    pub name: String,
    pub fqdn: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_warning_days")]
    pub warning_days: u32,
    /// Reserved; not used by the checks
    #[serde(default)]
    pub client_cert: bool,
}

fn default_port() -> u16 {
    443
}

fn default_enabled() -> bool {
    true
}

fn default_warning_days() -> u32 {
    30
}

impl HostConfig {
    pub fn new(name: impl Into<String>, fqdn: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            fqdn: fqdn.into(),
            port,
            enabled: true,
            warning_days: default_warning_days(),
            client_cert: false,
        }
    }

    pub fn with_warning_days(mut self, warning_days: u32) -> Self {
        self.warning_days = warning_days;
        self
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(invalid(
                &format!("hosts[{}].port", index),
                "must be between 1 and 65535",
            ));
        }
        validate_fqdn(&self.fqdn)
            .map_err(|message| invalid(&format!("hosts[{}].fqdn", index), message))
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub stores: StoreSettings,
    #[serde(default)]
    pub hosts: Vec<HostConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;

        config.settings.validate()?;
        for (i, host) in config.hosts.iter().enumerate() {
            host.validate(i)?;
        }

        Ok(config)
    }

    pub fn enabled_hosts(&self) -> Vec<HostConfig> {
        self.hosts.iter().filter(|h| h.enabled).cloned().collect()
    }

    pub fn host_by_name(&self, name: &str) -> Option<&HostConfig> {
        self.hosts.iter().find(|h| h.name == name)
    }
}

/// Check FQDN shape: total length, label count and label characters
pub fn validate_fqdn(fqdn: &str) -> Result<(), &'static str> {
    if fqdn.is_empty() || fqdn.len() > 253 {
        return Err("invalid FQDN length");
    }

    let labels: Vec<&str> = fqdn.split('.').collect();
    if labels.len() < 2 {
        return Err("FQDN must have at least two parts");
    }

    for label in labels {
        if label.is_empty() || label.len() > 63 {
            return Err("invalid FQDN part length");
        }
        let valid_chars = label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid_chars || label.starts_with('-') || label.ends_with('-') {
            return Err("invalid FQDN format");
        }
    }

    Ok(())
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
