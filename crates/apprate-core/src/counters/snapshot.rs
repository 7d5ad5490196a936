//! Point-in-time view of the persisted counters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Counter values read in one pass, as the condition engine sees them.
///
/// Timestamps are milliseconds since the Unix epoch; 0 means "never".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub install_timestamp: i64,
    pub launch_count: u32,
    pub last_remind_timestamp: i64,
    pub event_counts: BTreeMap<String, u16>,
    pub first_dialog_shown_timestamp: i64,
    pub prompts_shown_in_window: u16,
    pub consent: bool,
}

impl Default for CounterSnapshot {
    fn default() -> Self {
        Self {
            install_timestamp: 0,
            launch_count: 0,
            last_remind_timestamp: 0,
            event_counts: BTreeMap::new(),
            first_dialog_shown_timestamp: 0,
            prompts_shown_in_window: 0,
            consent: true,
        }
    }
}

impl CounterSnapshot {
    /// Count for a custom event, 0 if never recorded.
    pub fn event_count(&self, name: &str) -> u16 {
        self.event_counts.get(name).copied().unwrap_or(0)
    }
}
