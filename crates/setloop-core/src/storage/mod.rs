mod config;
mod store;

pub use config::{is_supported_duration, WorkoutConfig, DEFAULT_EXERCISES, DURATION_OPTIONS};
pub use store::{ConfigStore, FileConfigStore, MemoryConfigStore, PersistedConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/setloop[-dev]/` based on SETLOOP_ENV.
///
/// Set SETLOOP_ENV=dev to use the development data directory, or
/// SETLOOP_CONFIG_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("SETLOOP_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("SETLOOP_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("setloop-dev")
            } else {
                base_dir.join("setloop")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
