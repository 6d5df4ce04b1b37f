//! Last-used location preferences for a single client.
//!
//! The store is a flat string key-value map, last write wins. The JSON file
//! backend rewrites the whole file on every `set`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::shows::DEFAULT_RADIUS_MILES;

pub const ZIP_KEY: &str = "mm-zip";
pub const RADIUS_KEY: &str = "mm-radius";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preferences I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preferences file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Narrow get/set interface over persisted client preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`PrefsError`] if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// Preference store persisted as a JSON object on disk.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferenceStore {
    /// Opens the store at `path`. A missing file starts empty.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::Io`] if the file exists but cannot be read, or
    /// [`PrefsError::Parse`] if it is not a JSON string map.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| PrefsError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(PrefsError::Io { path, source }),
        };
        Ok(Self { path, values })
    }

    fn persist(&self) -> Result<(), PrefsError> {
        let body = serde_json::to_string_pretty(&self.values).map_err(|source| {
            PrefsError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, body).map_err(|source| PrefsError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_owned(), value.to_owned());
        self.persist()
    }
}

/// Typed view over the two persisted location keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub zip: Option<String>,
    pub radius: u32,
}

impl Preferences {
    /// Reads zip and radius; an unparseable radius falls back to the default.
    pub fn load(store: &impl PreferenceStore) -> Self {
        Self {
            zip: store.get(ZIP_KEY).filter(|z| !z.is_empty()),
            radius: store
                .get(RADIUS_KEY)
                .and_then(|r| r.parse().ok())
                .unwrap_or(DEFAULT_RADIUS_MILES),
        }
    }

    /// Persists a successfully used location.
    ///
    /// # Errors
    ///
    /// Propagates [`PrefsError`] from the store.
    pub fn save(store: &mut impl PreferenceStore, zip: &str, radius: u32) -> Result<(), PrefsError> {
        store.set(ZIP_KEY, zip)?;
        store.set(RADIUS_KEY, &radius.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct MemoryStore(HashMap<String, String>);

    impl PreferenceStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
            self.0.insert(key.to_owned(), value.to_owned());
            Ok(())
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mantra-prefs-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn load_defaults_when_empty() {
        let prefs = Preferences::load(&MemoryStore::default());
        assert_eq!(prefs.zip, None);
        assert_eq!(prefs.radius, DEFAULT_RADIUS_MILES);
    }

    #[test]
    fn load_ignores_garbage_radius() {
        let mut store = MemoryStore::default();
        store.set(RADIUS_KEY, "far").unwrap();
        store.set(ZIP_KEY, "94102").unwrap();
        let prefs = Preferences::load(&store);
        assert_eq!(prefs.zip.as_deref(), Some("94102"));
        assert_eq!(prefs.radius, DEFAULT_RADIUS_MILES);
    }

    #[test]
    fn save_is_last_write_wins() {
        let mut store = MemoryStore::default();
        Preferences::save(&mut store, "94102", 25).unwrap();
        Preferences::save(&mut store, "10001", 100).unwrap();
        let prefs = Preferences::load(&store);
        assert_eq!(prefs.zip.as_deref(), Some("10001"));
        assert_eq!(prefs.radius, 100);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let path = temp_path("reopen");
        let _ = std::fs::remove_file(&path);

        let mut store = FilePreferenceStore::open(&path).expect("open missing file");
        Preferences::save(&mut store, "60601", 150).expect("save");

        let reopened = FilePreferenceStore::open(&path).expect("reopen");
        let prefs = Preferences::load(&reopened);
        assert_eq!(prefs.zip.as_deref(), Some("60601"));
        assert_eq!(prefs.radius, 150);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn file_store_rejects_corrupt_json() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{not json").unwrap();
        let result = FilePreferenceStore::open(&path);
        assert!(matches!(result, Err(PrefsError::Parse { .. })));
        std::fs::remove_file(&path).ok();
    }
}
