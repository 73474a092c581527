//! In-memory storage handler

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::error::{Result, RfaError};
use crate::storage::StorageHandler;

/// Storage handler backed by a shared in-memory map.
///
/// Values do not survive the process. Clones share the same map, which lets
/// a caller keep a handle for inspection after handing one to the client.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorageHandler {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorageHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageHandler for MemoryStorageHandler {
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
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_value(&self, key: &str) -> Result<()> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}
