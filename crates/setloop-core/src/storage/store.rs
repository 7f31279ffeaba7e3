//! Persistence port for [`WorkoutConfig`].
//!
//! The store is read once at startup and written after every change.
//! Failures never propagate past [`PersistedConfig`]: they are logged and
//! the last good in-memory value stays authoritative.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use super::config::{is_supported_duration, WorkoutConfig};
use super::data_dir;
use crate::error::ConfigError;
use crate::share::SharedConfig;

const CONFIG_FILE: &str = "config.toml";

/// Load/save contract for the workout configuration.
pub trait ConfigStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<WorkoutConfig>, ConfigError>;
    fn save(&self, config: &WorkoutConfig) -> Result<(), ConfigError>;
}

/// TOML file store, `<data_dir>/config.toml` by default.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn open_default() -> Result<Self, ConfigError> {
        Ok(Self::new(data_dir()?.join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Option<WorkoutConfig>, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => toml::from_str(&content)
                .map(Some)
                .map_err(|e| ConfigError::LoadFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::LoadFailed {
                path: self.path.clone(),
                message: e.to_string(),
            }),
        }
    }

    fn save(&self, config: &WorkoutConfig) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: self.path.clone(),
            message,
        };
        let content = toml::to_string_pretty(config).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(&self.path, content).map_err(|e| save_failed(e.to_string()))
    }
}

/// In-process store. Used when no data directory is available, and in tests.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    saved: RefCell<Option<WorkoutConfig>>,
    failing: Cell<bool>,
    saves: Cell<usize>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WorkoutConfig) -> Self {
        let store = Self::default();
        store.saved.replace(Some(config));
        store
    }

    /// Every load and save fails until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn saved(&self) -> Option<WorkoutConfig> {
        self.saved.borrow().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    fn unavailable(&self) -> ConfigError {
        ConfigError::SaveFailed {
            path: PathBuf::from("<memory>"),
            message: "store unavailable".to_string(),
        }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<Option<WorkoutConfig>, ConfigError> {
        if self.failing.get() {
            return Err(ConfigError::LoadFailed {
                path: PathBuf::from("<memory>"),
                message: "store unavailable".to_string(),
            });
        }
        Ok(self.saved())
    }

    fn save(&self, config: &WorkoutConfig) -> Result<(), ConfigError> {
        if self.failing.get() {
            return Err(self.unavailable());
        }
        self.saved.replace(Some(config.clone()));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl<S: ConfigStore + ?Sized> ConfigStore for std::rc::Rc<S> {
    fn load(&self) -> Result<Option<WorkoutConfig>, ConfigError> {
        (**self).load()
    }

    fn save(&self, config: &WorkoutConfig) -> Result<(), ConfigError> {
        (**self).save(config)
    }
}

/// The live configuration plus the store it is mirrored to.
pub struct PersistedConfig {
    store: Box<dyn ConfigStore>,
    current: WorkoutConfig,
}

impl PersistedConfig {
    /// Load from `store`, then overlay any values carried by a share link.
    ///
    /// Share-link values win field by field; the merged result is written
    /// back. Unreadable stores fall back to defaults.
    pub fn open(store: Box<dyn ConfigStore>, shared: Option<&SharedConfig>) -> Self {
        let mut current = match store.load() {
            Ok(Some(config)) => sanitize(config),
            Ok(None) => WorkoutConfig::default(),
            Err(e) => {
                tracing::warn!(error = %e, "stored workout config unreadable, using defaults");
                WorkoutConfig::default()
            }
        };

        let overlay = shared.filter(|s| !s.is_empty());
        if let Some(shared) = overlay {
            shared.apply_to(&mut current);
        }

        let this = Self { store, current };
        if overlay.is_some() {
            this.persist();
        }
        this
    }

    pub fn config(&self) -> &WorkoutConfig {
        &self.current
    }

    /// Apply `f` to a draft; commit and save only if it succeeds and
    /// changed something.
    pub fn edit<T, E>(
        &mut self,
        f: impl FnOnce(&mut WorkoutConfig) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut draft = self.current.clone();
        let out = f(&mut draft)?;
        if draft != self.current {
            self.current = draft;
            self.persist();
        }
        Ok(out)
    }

    pub fn replace(&mut self, config: WorkoutConfig) {
        if config != self.current {
            self.current = config;
            self.persist();
        }
    }

    fn persist(&self) {
        match self.store.save(&self.current) {
            Ok(()) => tracing::debug!("workout config saved"),
            Err(e) => tracing::warn!(error = %e, "failed to persist workout config"),
        }
    }
}

/// Replace hand-edited durations outside the option set with defaults.
fn sanitize(mut config: WorkoutConfig) -> WorkoutConfig {
    let defaults = WorkoutConfig::default();
    if !is_supported_duration(config.exercise_duration) {
        tracing::warn!(
            seconds = config.exercise_duration,
            "stored exercise duration unsupported, using default"
        );
        config.exercise_duration = defaults.exercise_duration;
    }
    if !is_supported_duration(config.rest_duration) {
        tracing::warn!(
            seconds = config.rest_duration,
            "stored rest duration unsupported, using default"
        );
        config.rest_duration = defaults.rest_duration;
    }
    config.ensure_blank_slot();
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn sample() -> WorkoutConfig {
        WorkoutConfig {
            exercises: vec!["Row".into(), "Dips".into(), "".into()],
            exercise_duration: 45,
            rest_duration: 15,
        }
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileConfigStore::new(dir.path().join("nested").join("config.toml"));

        assert!(store.load().unwrap().is_none());
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn file_store_reports_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "exercise_duration = \"soon\"").unwrap();

        let err = FileConfigStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed { .. }));
    }

    #[test]
    fn open_uses_defaults_when_store_fails() {
        let store = MemoryConfigStore::new();
        store.set_failing(true);
        let persisted = PersistedConfig::open(Box::new(store), None);
        assert_eq!(persisted.config(), &WorkoutConfig::default());
    }

    #[test]
    fn open_reads_stored_config_without_writing() {
        let store = Rc::new(MemoryConfigStore::with_config(sample()));
        let persisted = PersistedConfig::open(Box::new(Rc::clone(&store)), None);
        assert_eq!(persisted.config(), &sample());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn open_sanitizes_unsupported_durations() {
        let mut stored = sample();
        stored.rest_duration = 7;
        let persisted =
            PersistedConfig::open(Box::new(MemoryConfigStore::with_config(stored)), None);
        assert_eq!(persisted.config().rest_duration, 30);
        assert_eq!(persisted.config().exercise_duration, 45);
    }

    #[test]
    fn share_link_overrides_stored_fields_and_is_saved() {
        let store = Rc::new(MemoryConfigStore::with_config(sample()));
        let shared = crate::share::decode("restTime=60");
        let persisted = PersistedConfig::open(Box::new(Rc::clone(&store)), Some(&shared));

        assert_eq!(persisted.config().rest_duration, 60);
        assert_eq!(persisted.config().exercise_duration, 45);
        assert_eq!(store.saved().unwrap().rest_duration, 60);
    }

    #[test]
    fn edit_saves_on_change_only() {
        let store = Rc::new(MemoryConfigStore::new());
        let mut persisted = PersistedConfig::open(Box::new(Rc::clone(&store)), None);

        persisted
            .edit(|c| c.set("rest_duration", "60"))
            .unwrap();
        assert_eq!(store.save_count(), 1);

        persisted
            .edit(|c| c.set("rest_duration", "60"))
            .unwrap();
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn failed_edit_leaves_config_untouched() {
        let store = Rc::new(MemoryConfigStore::new());
        let mut persisted = PersistedConfig::open(Box::new(Rc::clone(&store)), None);

        let result: Result<(), ValidationError> = persisted.edit(|c| {
            c.exercises.clear();
            c.remove_exercise(3)
        });
        assert!(result.is_err());
        assert_eq!(persisted.config(), &WorkoutConfig::default());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn save_failure_keeps_last_value_in_memory() {
        let store = Rc::new(MemoryConfigStore::new());
        let mut persisted = PersistedConfig::open(Box::new(Rc::clone(&store)), None);
        store.set_failing(true);

        persisted.edit(|c| c.set("exercise_duration", "90")).unwrap();
        assert_eq!(persisted.config().exercise_duration, 90);
        assert!(store.saved().is_none());
    }
}
