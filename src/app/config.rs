//! Configuration loading for `sovseas.toml`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::{AppConfig, AppError};

/// Default configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "sovseas.toml";

/// Environment variable overriding `[network].contract_address`.
pub const CONTRACT_ADDRESS_ENV: &str = "SOVSEAS_CONTRACT_ADDRESS";

/// Load configuration from `explicit`, or from `./sovseas.toml` when present.
///
/// An explicit path must exist; the implicit file falls back to defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, AppError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(CONFIG_FILE), false),
    };
    let mut config = read_config(&path, required)?;
    apply_overrides(&mut config, std::env::var(CONTRACT_ADDRESS_ENV).ok());
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path, required: bool) -> Result<AppConfig, AppError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Loading configuration from {}", path.display());
            AppConfig::parse(&content)
        }
        Err(err) if err.kind() == ErrorKind::NotFound && !required => {
            log::debug!("No {} found, using defaults", path.display());
            Ok(AppConfig::default())
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Err(AppError::config_error(format!(
            "Configuration file not found: {}",
            path.display()
        ))),
        Err(err) => Err(AppError::Io(err)),
    }
}

fn apply_overrides(config: &mut AppConfig, contract_address: Option<String>) {
    if let Some(address) = contract_address.filter(|value| !value.trim().is_empty()) {
        config.network.contract_address = Some(address.trim().to_string());
    }
}
