pub mod config;
pub mod exercise;
pub mod plan;
pub mod run;
pub mod share;

use setloop_core::{FileConfigStore, MemoryConfigStore, PersistedConfig, SharedConfig};

/// Open the stored workout config.
///
/// Falls back to an in-memory store when the data directory is unusable,
/// so a read-only home still runs workouts.
pub(crate) fn open_config() -> PersistedConfig {
    match FileConfigStore::open_default() {
        Ok(store) => PersistedConfig::open(Box::new(store), None),
        Err(e) => {
            tracing::warn!(error = %e, "config directory unavailable, changes will not be saved");
            PersistedConfig::open(Box::new(MemoryConfigStore::new()), None)
        }
    }
}

/// Like [`open_config`], but for commands whose whole point is saving.
/// Values carried by `shared` are merged in and written back on open.
pub(crate) fn open_config_strict(
    shared: Option<&SharedConfig>,
) -> Result<PersistedConfig, Box<dyn std::error::Error>> {
    let store = FileConfigStore::open_default()?;
    Ok(PersistedConfig::open(Box::new(store), shared))
}
