//! Preference store trait.

use crate::error::AppRateResult;

/// Key-value persistence for counters and timestamps.
///
/// Every `put_*` must be durable when it returns; there is no flush step.
pub trait PreferenceStore: Send + Sync {
    /// Read an integer value, or `default` if the key is absent.
    fn get_i64(&self, key: &str, default: i64) -> AppRateResult<i64>;

    /// Write an integer value.
    fn put_i64(&self, key: &str, value: i64) -> AppRateResult<()>;

    /// Read a boolean value, or `default` if the key is absent.
    fn get_bool(&self, key: &str, default: bool) -> AppRateResult<bool>;

    /// Write a boolean value.
    fn put_bool(&self, key: &str, value: bool) -> AppRateResult<()>;

    /// Remove a single key.
    fn remove(&self, key: &str) -> AppRateResult<()>;

    /// Remove every key owned by this store.
    fn clear(&self) -> AppRateResult<()>;
}
