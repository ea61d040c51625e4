use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Result};

use super::Storage;

/// In-process storage used for ephemeral runs and tests.
///
/// Clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: &str) -> Self {
        if let Ok(mut guard) = self.values.write() {
            guard.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let guard = self
            .values
            .read()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self
            .values
            .write()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut guard = self
            .values
            .write()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        guard.remove(key);
        Ok(())
    }
}
