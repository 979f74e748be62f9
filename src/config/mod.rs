//! Configuration module for cert-checker
//!
//! Handles loading host lists and settings from TOML files.

pub mod settings;

pub use settings::{validate_fqdn, Config, HostConfig, Settings, StoreSettings};

use crate::utils::ConfigError;
use std::path::Path;

/// Default configuration file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cert-checker.toml";

/// Load configuration from `path`, or from the default file when present.
///
/// Falls back to an empty configuration when no path is given and the
/// default file does not exist.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::from_file(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                Config::from_file(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}
