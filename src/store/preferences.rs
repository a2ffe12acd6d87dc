use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use log::{info, warn};

use crate::error::BookingError;

/// Key holding the signed-in user. Its presence is the whole login state.
pub const USER_ID_KEY: &str = "user-id";

/// Flat string key-value storage for local preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), BookingError>;
    fn remove(&self, key: &str) -> Result<(), BookingError>;
}

#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BookingError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| BookingError::Storage(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BookingError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| BookingError::Storage(e.to_string()))?;
        values.remove(key);
        Ok(())
    }
}

/// Preferences persisted as a JSON object on disk. Every write rewrites the file.
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFilePreferenceStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BookingError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                BookingError::Storage(format!("{} is not a preference file: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No preference file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(BookingError::Storage(e.to_string())),
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), BookingError> {
        let contents = serde_json::to_string_pretty(values)
            .map_err(|e| BookingError::Storage(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| {
            warn!("Failed to write {}: {}", self.path.display(), e);
            BookingError::Storage(e.to_string())
        })
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BookingError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| BookingError::Storage(e.to_string()))?;
        let mut next = values.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *values = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BookingError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| BookingError::Storage(e.to_string()))?;
        if !values.contains_key(key) {
            return Ok(());
        }
        let mut next = values.clone();
        next.remove(key);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }
}
