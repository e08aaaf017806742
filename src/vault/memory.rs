use crate::vault::ports::KeyValueStore;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-process key-value store. Nothing survives the process; used as a fake
/// for the on-disk store.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing any codec (handy for corrupt fixtures).
    pub fn with_raw(self, key: &str, value: &str) -> Self {
        if let Ok(mut guard) = self.data.lock() {
            guard.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.data.lock().ok().and_then(|g| g.get(key).cloned())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self.data.lock().map_err(|_| anyhow!("memory store poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.data.lock().map_err(|_| anyhow!("memory store poisoned"))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut guard = self.data.lock().map_err(|_| anyhow!("memory store poisoned"))?;
        guard.remove(key);
        Ok(())
    }
}
