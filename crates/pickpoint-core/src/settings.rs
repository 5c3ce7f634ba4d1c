//! Loading a [`ShiftConfig`] from JSON
//!
//! Missing fields fall back to the stock values, then the whole config is
//! validated so a bad file is reported in one go rather than field by field.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use pickpoint_logic::config::{validate_config, ConfigError, ShiftConfig};

/// Parse and validate a config from any reader.
pub fn load_config<R: Read>(reader: R) -> Result<ShiftConfig, SettingsError> {
    let config: ShiftConfig = serde_json::from_reader(reader)?;
    let errors = validate_config(&config);
    if !errors.is_empty() {
        return Err(SettingsError::Invalid(errors));
    }
    Ok(config)
}

pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<ShiftConfig, SettingsError> {
    let file = File::open(path)?;
    load_config(BufReader::new(file))
}

/// Errors that can occur while loading settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(Vec<ConfigError>),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Json(e) => write!(f, "Config parse error: {}", e),
            SettingsError::Invalid(errors) => {
                write!(f, "Invalid config:")?;
                for e in errors {
                    write!(f, " {};", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Json(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}
