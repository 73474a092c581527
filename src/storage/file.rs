//! Default file-backed storage handler

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::error::{Result, RfaError};
use crate::storage::StorageHandler;

/// Storage handler that persists values to a JSON file under the platform
/// cache directory (`~/.cache/rfa-football/session.json` on Linux).
///
/// The file is read once at construction and rewritten on every
/// `set_value`/`delete_value`, so a token cached by one process survives
/// a restart.
#[derive(Debug)]
pub struct FileStorageHandler {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl FileStorageHandler {
    /// Open the default session file.
    pub fn new() -> Result<Self> {
        Self::with_path(Self::default_path()?)
    }

    /// Open (or create) a session file at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = Self::load(&path)?;
        Ok(FileStorageHandler {
            path,
            values: Mutex::new(values),
        })
    }

    /// Path: ~/.cache/rfa-football/session.json
    fn default_path() -> Result<PathBuf> {
        let base = dirs::cache_dir()
            .ok_or_else(|| RfaError::storage("could not determine cache directory"))?;
        Ok(base.join("rfa-football").join("session.json"))
    }

    fn load(path: &Path) -> Result<HashMap<String, String>> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn flush(&self, values: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(values)?)?;
        Ok(())
    }
}

impl StorageHandler for FileStorageHandler {
    fn has_value(&self, key: &str) -> Result<bool> {
        Ok(self.values.lock().unwrap().contains_key(key))
    }

    fn get_value(&self, key: &str) -> Result<String> {
        self.values
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| RfaError::MissingValue {
                key: key.to_string(),
            })
    }

    fn set_value(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap();
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }

    fn delete_value(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap();
        if values.remove(key).is_some() {
            self.flush(&values)?;
        }
        Ok(())
    }
}
