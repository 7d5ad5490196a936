//! In-memory preference store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{AppRateError, AppRateResult};
use crate::traits::PreferenceStore;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Value {
    Int(i64),
    Bool(bool),
}

/// Preference store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> AppRateResult<usize> {
        Ok(self.values()?.len())
    }

    pub fn is_empty(&self) -> AppRateResult<bool> {
        Ok(self.values()?.is_empty())
    }

    fn values(&self) -> AppRateResult<MutexGuard<'_, HashMap<String, Value>>> {
        self.values
            .lock()
            .map_err(|_| AppRateError::internal("preference map lock poisoned"))
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_i64(&self, key: &str, default: i64) -> AppRateResult<i64> {
        match self.values()?.get(key) {
            Some(Value::Int(v)) => Ok(*v),
            Some(Value::Bool(_)) => Err(AppRateError::storage_read(format!(
                "key '{}' holds a boolean, not an integer",
                key
            ))),
            None => Ok(default),
        }
    }

    fn put_i64(&self, key: &str, value: i64) -> AppRateResult<()> {
        self.values()?.insert(key.to_string(), Value::Int(value));
        Ok(())
    }

    fn get_bool(&self, key: &str, default: bool) -> AppRateResult<bool> {
        match self.values()?.get(key) {
            Some(Value::Bool(v)) => Ok(*v),
            Some(Value::Int(_)) => Err(AppRateError::storage_read(format!(
                "key '{}' holds an integer, not a boolean",
                key
            ))),
            None => Ok(default),
        }
    }

    fn put_bool(&self, key: &str, value: bool) -> AppRateResult<()> {
        self.values()?.insert(key.to_string(), Value::Bool(value));
        Ok(())
    }

    fn remove(&self, key: &str) -> AppRateResult<()> {
        self.values()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> AppRateResult<()> {
        self.values()?.clear();
        Ok(())
    }
}
