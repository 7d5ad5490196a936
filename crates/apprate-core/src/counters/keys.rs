//! Preference keys, one per persisted attribute.
//!
//! All keys carry the `apprate_` prefix so they cannot collide with the host
//! app's own preferences.

pub const INSTALL_DATE: &str = "apprate_install_date";
pub const LAUNCH_TIMES: &str = "apprate_launch_times";
pub const REMIND_INTERVAL: &str = "apprate_remind_interval";
pub const DIALOG_FIRST_LAUNCH_TIME: &str = "apprate_dialog_first_launch_time";
/// Number of display timestamps held in the rolling-window history.
pub const DIALOG_HISTORY_LEN: &str = "apprate_dialog_history_len";
pub const IS_AGREE_SHOW_DIALOG: &str = "apprate_is_agree_show_dialog";

const EVENT_PREFIX: &str = "apprate_event_times_";
const DIALOG_HISTORY_PREFIX: &str = "apprate_dialog_shown_at_";

/// Key for a custom event counter.
pub fn event(name: &str) -> String {
    format!("{}{}", EVENT_PREFIX, name)
}

/// Key for the `index`-th display timestamp, oldest first.
pub fn dialog_shown_at(index: usize) -> String {
    format!("{}{}", DIALOG_HISTORY_PREFIX, index)
}
