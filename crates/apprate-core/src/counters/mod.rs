//! Typed access to the persisted prompt counters.
//!
//! [`CounterStore`] is a thin adapter over a [`PreferenceStore`]: it knows
//! the keys and value types of every persisted attribute but applies no
//! business rules. Each write goes straight to the backend.

pub mod keys;
mod snapshot;

pub use snapshot::CounterSnapshot;

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{AppRateError, AppRateResult};
use crate::traits::PreferenceStore;

/// Milliseconds in a day. No calendar or timezone adjustment is applied.
pub const DAY_IN_MILLIS: i64 = 86_400_000;

/// Length of the rolling prompt-cap window in days.
pub const YEAR_IN_DAYS: i64 = 365;

/// A value type the preference store can hold.
pub trait StoredValue: Copy {
    /// Read `key`, or `default` if absent.
    fn load(store: &dyn PreferenceStore, key: &str, default: Self) -> AppRateResult<Self>;

    /// Write `key`.
    fn save(self, store: &dyn PreferenceStore, key: &str) -> AppRateResult<()>;
}

impl StoredValue for i64 {
    fn load(store: &dyn PreferenceStore, key: &str, default: Self) -> AppRateResult<Self> {
        store.get_i64(key, default)
    }

    fn save(self, store: &dyn PreferenceStore, key: &str) -> AppRateResult<()> {
        store.put_i64(key, self)
    }
}

impl StoredValue for bool {
    fn load(store: &dyn PreferenceStore, key: &str, default: Self) -> AppRateResult<Self> {
        store.get_bool(key, default)
    }

    fn save(self, store: &dyn PreferenceStore, key: &str) -> AppRateResult<()> {
        store.put_bool(key, self)
    }
}

/// Adapter over the preference store for all prompt counters.
///
/// Cloning is cheap and clones share the same backend and lock, so a clone
/// can be moved into a dialog callback.
#[derive(Clone)]
pub struct CounterStore {
    prefs: Arc<dyn PreferenceStore>,
    // Serializes read-increment-write sequences.
    sequence: Arc<Mutex<()>>,
}

impl CounterStore {
    /// Create an adapter over `prefs`.
    pub fn new(prefs: Arc<dyn PreferenceStore>) -> Self {
        Self {
            prefs,
            sequence: Arc::new(Mutex::new(())),
        }
    }

    /// Read a value, or `default` if the key was never written.
    pub fn read<T: StoredValue>(&self, key: &str, default: T) -> AppRateResult<T> {
        T::load(self.prefs.as_ref(), key, default)
    }

    /// Write a value.
    pub fn write<T: StoredValue>(&self, key: &str, value: T) -> AppRateResult<()> {
        value.save(self.prefs.as_ref(), key)
    }

    /// Increment an integer counter and return the new value.
    pub fn increment(&self, key: &str) -> AppRateResult<i64> {
        let _guard = self.lock()?;
        let next = self.read(key, 0i64)?.saturating_add(1);
        self.write(key, next)?;
        Ok(next)
    }

    /// Remove every stored counter.
    pub fn clear_all(&self) -> AppRateResult<()> {
        let _guard = self.lock()?;
        self.prefs.clear()?;
        debug!("Cleared all counters");
        Ok(())
    }

    fn lock(&self) -> AppRateResult<std::sync::MutexGuard<'_, ()>> {
        self.sequence
            .lock()
            .map_err(|_| AppRateError::internal("counter lock poisoned"))
    }

    /// Install time in epoch milliseconds, 0 if no launch was recorded yet.
    pub fn install_timestamp(&self) -> AppRateResult<i64> {
        self.read(keys::INSTALL_DATE, 0)
    }

    pub fn set_install_timestamp(&self, timestamp: i64) -> AppRateResult<()> {
        self.write(keys::INSTALL_DATE, timestamp)
    }

    pub fn launch_count(&self) -> AppRateResult<u32> {
        Ok(clamp(self.read(keys::LAUNCH_TIMES, 0)?))
    }

    pub fn set_launch_count(&self, count: u32) -> AppRateResult<()> {
        self.write(keys::LAUNCH_TIMES, i64::from(count))
    }

    /// Increment the launch counter, returning the new count.
    pub fn increment_launch_count(&self) -> AppRateResult<u32> {
        Ok(clamp(self.increment(keys::LAUNCH_TIMES)?))
    }

    pub fn last_remind_timestamp(&self) -> AppRateResult<i64> {
        self.read(keys::REMIND_INTERVAL, 0)
    }

    pub fn set_last_remind_timestamp(&self, timestamp: i64) -> AppRateResult<()> {
        self.write(keys::REMIND_INTERVAL, timestamp)
    }

    pub fn event_count(&self, name: &str) -> AppRateResult<u16> {
        Ok(clamp(self.read(&event_key(name)?, 0)?))
    }

    pub fn set_event_count(&self, name: &str, count: u16) -> AppRateResult<()> {
        self.write(&event_key(name)?, i64::from(count))
    }

    /// Increment a custom event counter, returning the new count.
    pub fn increment_event_count(&self, name: &str) -> AppRateResult<u16> {
        Ok(clamp(self.increment(&event_key(name)?)?))
    }

    /// First time the prompt was displayed, 0 if never.
    pub fn first_dialog_shown_timestamp(&self) -> AppRateResult<i64> {
        self.read(keys::DIALOG_FIRST_LAUNCH_TIME, 0)
    }

    pub fn set_first_dialog_shown_timestamp(&self, timestamp: i64) -> AppRateResult<()> {
        self.write(keys::DIALOG_FIRST_LAUNCH_TIME, timestamp)
    }

    /// Prompts shown in the rolling 365 days before `now`.
    ///
    /// A display at `ts` counts while `now - ts < 365 days`.
    pub fn prompts_shown_in_window(&self, now: i64) -> AppRateResult<u16> {
        let shown = self
            .dialog_history()?
            .into_iter()
            .filter(|ts| in_year_window(*ts, now))
            .count();
        Ok(u16::try_from(shown).unwrap_or(u16::MAX))
    }

    /// Record one display at `now`, returning the number of displays in the
    /// rolling window including this one.
    ///
    /// Displays that left the window are dropped and at most `retain` of the
    /// most recent timestamps are kept, so the stored history never exceeds
    /// the configured cap.
    pub fn record_prompt_shown(&self, now: i64, retain: u16) -> AppRateResult<u16> {
        let _guard = self.lock()?;
        let stored = self.dialog_history()?;

        let mut history: Vec<i64> = stored
            .iter()
            .copied()
            .filter(|ts| in_year_window(*ts, now))
            .collect();
        history.push(now);
        let keep = usize::from(retain.max(1));
        if history.len() > keep {
            history.drain(..history.len() - keep);
        }

        for (index, ts) in history.iter().enumerate() {
            self.write(&keys::dialog_shown_at(index), *ts)?;
        }
        for index in history.len()..stored.len() {
            self.prefs.remove(&keys::dialog_shown_at(index))?;
        }
        self.write(keys::DIALOG_HISTORY_LEN, history.len() as i64)?;

        debug!(in_window = history.len(), "Recorded prompt display");
        Ok(u16::try_from(history.len()).unwrap_or(u16::MAX))
    }

    /// Stored display timestamps, oldest first.
    fn dialog_history(&self) -> AppRateResult<Vec<i64>> {
        let len: u16 = clamp(self.read(keys::DIALOG_HISTORY_LEN, 0)?);
        (0..usize::from(len))
            .map(|index| self.read(&keys::dialog_shown_at(index), 0i64))
            .collect()
    }

    /// Whether the user still agrees to be asked. Defaults to true.
    pub fn consent(&self) -> AppRateResult<bool> {
        self.read(keys::IS_AGREE_SHOW_DIALOG, true)
    }

    pub fn set_consent(&self, agree: bool) -> AppRateResult<()> {
        self.write(keys::IS_AGREE_SHOW_DIALOG, agree)
    }

    /// Read every counter the engine needs.
    pub fn snapshot<'a, I>(&self, event_names: I, now: i64) -> AppRateResult<CounterSnapshot>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut event_counts = std::collections::BTreeMap::new();
        for name in event_names {
            event_counts.insert(name.clone(), self.event_count(name)?);
        }

        Ok(CounterSnapshot {
            install_timestamp: self.install_timestamp()?,
            launch_count: self.launch_count()?,
            last_remind_timestamp: self.last_remind_timestamp()?,
            event_counts,
            first_dialog_shown_timestamp: self.first_dialog_shown_timestamp()?,
            prompts_shown_in_window: self.prompts_shown_in_window(now)?,
            consent: self.consent()?,
        })
    }
}

fn in_year_window(shown_at: i64, now: i64) -> bool {
    now.saturating_sub(shown_at) < YEAR_IN_DAYS * DAY_IN_MILLIS
}

fn event_key(name: &str) -> AppRateResult<String> {
    if name.trim().is_empty() {
        return Err(AppRateError::empty_event_name());
    }
    Ok(keys::event(name))
}

/// Narrow a stored integer into a counter type, saturating at both ends.
fn clamp<T>(value: i64) -> T
where
    T: TryFrom<i64> + Bounded,
{
    if value <= 0 {
        return T::MIN;
    }
    T::try_from(value).unwrap_or(T::MAX)
}

trait Bounded {
    const MIN: Self;
    const MAX: Self;
}

impl Bounded for u16 {
    const MIN: Self = u16::MIN;
    const MAX: Self = u16::MAX;
}

impl Bounded for u32 {
    const MIN: Self = u32::MIN;
    const MAX: Self = u32::MAX;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferenceStore;

    fn counters() -> CounterStore {
        CounterStore::new(Arc::new(MemoryPreferenceStore::new()))
    }

    #[test]
    fn test_defaults() {
        let store = counters();
        assert_eq!(store.install_timestamp().unwrap(), 0);
        assert_eq!(store.launch_count().unwrap(), 0);
        assert_eq!(store.last_remind_timestamp().unwrap(), 0);
        assert_eq!(store.event_count("share").unwrap(), 0);
        assert_eq!(store.first_dialog_shown_timestamp().unwrap(), 0);
        assert_eq!(store.prompts_shown_in_window(0).unwrap(), 0);
        assert!(store.consent().unwrap());
    }

    #[test]
    fn test_generic_read_write_increment() {
        let store = counters();
        store.write("custom_key", 41i64).unwrap();
        assert_eq!(store.increment("custom_key").unwrap(), 42);
        assert_eq!(store.read("custom_key", 0i64).unwrap(), 42);

        store.write("flag", false).unwrap();
        assert!(!store.read("flag", true).unwrap());
    }

    #[test]
    fn test_event_counts_saturate() {
        let store = counters();
        store.set_event_count("level_up", u16::MAX).unwrap();
        assert_eq!(store.increment_event_count("level_up").unwrap(), u16::MAX);
        assert_eq!(store.event_count("level_up").unwrap(), u16::MAX);
    }

    #[test]
    fn test_blank_event_name_rejected() {
        let store = counters();
        assert!(store.increment_event_count("").is_err());
        assert!(store.set_event_count("  ", 1).is_err());
    }

    #[test]
    fn test_negative_stored_values_read_as_zero() {
        let store = counters();
        store.write(keys::LAUNCH_TIMES, -5i64).unwrap();
        assert_eq!(store.launch_count().unwrap(), 0);
    }

    #[test]
    fn test_prompt_count_within_window() {
        let store = counters();
        let first = 1_000 * DAY_IN_MILLIS;

        assert_eq!(store.record_prompt_shown(first, 5).unwrap(), 1);
        assert_eq!(store.record_prompt_shown(first + 10 * DAY_IN_MILLIS, 5).unwrap(), 2);
        assert_eq!(store.prompts_shown_in_window(first + 364 * DAY_IN_MILLIS).unwrap(), 2);
    }

    #[test]
    fn test_prompt_window_rolls_one_display_at_a_time() {
        let store = counters();
        let day = |n: i64| 1_000 * DAY_IN_MILLIS + n * DAY_IN_MILLIS;

        store.record_prompt_shown(day(0), 2).unwrap();
        store.record_prompt_shown(day(364), 2).unwrap();

        // Day 0 has left the window, day 364 has not.
        assert_eq!(store.prompts_shown_in_window(day(365)).unwrap(), 1);
        assert_eq!(store.record_prompt_shown(day(365), 2).unwrap(), 2);
        assert_eq!(store.prompts_shown_in_window(day(366)).unwrap(), 2);
        assert_eq!(store.prompts_shown_in_window(day(364) + YEAR_IN_DAYS * DAY_IN_MILLIS).unwrap(), 1);
        assert_eq!(store.prompts_shown_in_window(day(365) + YEAR_IN_DAYS * DAY_IN_MILLIS).unwrap(), 0);
    }

    #[test]
    fn test_prompt_history_is_bounded_by_retain() {
        let store = counters();
        let first = 1_000 * DAY_IN_MILLIS;

        for n in 0..5 {
            store.record_prompt_shown(first + n * DAY_IN_MILLIS, 2).unwrap();
        }
        assert_eq!(store.prompts_shown_in_window(first + 5 * DAY_IN_MILLIS).unwrap(), 2);
        assert_eq!(store.read(keys::DIALOG_HISTORY_LEN, 0i64).unwrap(), 2);

        // Expired entries are pruned and their slots removed.
        let later = first + 800 * DAY_IN_MILLIS;
        assert_eq!(store.record_prompt_shown(later, 2).unwrap(), 1);
        assert_eq!(store.read(&keys::dialog_shown_at(1), -1i64).unwrap(), -1);
    }

    #[test]
    fn test_snapshot_reads_configured_events() {
        let store = counters();
        store.set_install_timestamp(5).unwrap();
        store.set_launch_count(3).unwrap();
        store.increment_event_count("purchase").unwrap();
        store.increment_event_count("unconfigured").unwrap();
        store.set_consent(false).unwrap();

        let names = vec!["purchase".to_string(), "share".to_string()];
        let snapshot = store.snapshot(&names, 10).unwrap();

        assert_eq!(snapshot.install_timestamp, 5);
        assert_eq!(snapshot.launch_count, 3);
        assert_eq!(snapshot.event_count("purchase"), 1);
        assert_eq!(snapshot.event_count("share"), 0);
        assert!(!snapshot.event_counts.contains_key("unconfigured"));
        assert!(!snapshot.consent);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        const THREADS: usize = 8;
        const ROUNDS: usize = 200;
        let store = counters();

        std::thread::scope(|scope| {
            for _ in 0..THREADS {
                let store = store.clone();
                scope.spawn(move || {
                    for _ in 0..ROUNDS {
                        store.increment_launch_count().unwrap();
                        store.increment_event_count("purchase").unwrap();
                    }
                });
            }
        });

        let expected = THREADS * ROUNDS;
        assert_eq!(store.launch_count().unwrap() as usize, expected);
        assert_eq!(store.event_count("purchase").unwrap() as usize, expected);
    }

    #[test]
    fn test_concurrent_displays_are_all_recorded() {
        const THREADS: i64 = 6;
        let store = counters();
        let now = 1_000 * DAY_IN_MILLIS;

        std::thread::scope(|scope| {
            for n in 0..THREADS {
                let store = store.clone();
                scope.spawn(move || {
                    store.record_prompt_shown(now + n, u16::MAX).unwrap();
                });
            }
        });

        assert_eq!(store.prompts_shown_in_window(now + THREADS).unwrap() as i64, THREADS);
    }

    #[test]
    fn test_clear_all_restores_defaults() {
        let store = counters();
        store.set_launch_count(8).unwrap();
        store.set_consent(false).unwrap();
        store.clear_all().unwrap();
        assert_eq!(store.launch_count().unwrap(), 0);
        assert!(store.consent().unwrap());
    }
}
