//! Configuration system for apprate.
//!
//! A [`RateConfig`] is assembled once per host app, either through
//! [`RateConfig::builder`] or loaded from a file or the environment, and is
//! immutable afterwards.

mod dialog;

pub use dialog::{DialogOptions, TextValue};

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppRateError, AppRateResult, ErrorCode};
use crate::store::{StoreKind, StoreTarget};
use crate::traits::{ButtonListener, DialogButton};

/// Sentinel for `max_prompts_per_year` meaning "no cap".
pub const UNLIMITED_PROMPTS: u16 = u16::MAX;

/// Thresholds and presentation settings for the rating prompt.
///
/// For every day/launch threshold, 0 disables the check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    /// Launches required before the first prompt.
    pub min_launches: u8,
    /// Days since install required before the first prompt.
    pub min_install_days: u8,
    /// Days since the last "remind me later" before prompting again.
    pub remind_interval_days: u8,
    /// Prompt only on every Nth launch; 1 means every launch.
    pub remind_every_n_launches: u8,
    /// Maximum prompts in any rolling 365 days, [`UNLIMITED_PROMPTS`] for no cap.
    pub max_prompts_per_year: u16,
    /// Minimum count per custom event name.
    pub custom_events: BTreeMap<String, u16>,
    /// Show the prompt regardless of the conditions.
    pub debug: bool,
    /// Where "rate now" leads.
    pub store: StoreTarget,
    /// Dialog presentation.
    pub dialog: DialogOptions,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            min_launches: 10,
            min_install_days: 10,
            remind_interval_days: 1,
            remind_every_n_launches: 1,
            max_prompts_per_year: UNLIMITED_PROMPTS,
            custom_events: BTreeMap::new(),
            debug: false,
            store: StoreTarget::default(),
            dialog: DialogOptions::default(),
        }
    }
}

impl RateConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<Path>) -> AppRateResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        let config: Self = match ext {
            Some("toml") => toml::from_str(&content).map_err(|e| AppRateError::parse(e.to_string()))?,
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| AppRateError::parse(e.to_string()))?
            }
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&content).map_err(|e| AppRateError::parse(e.to_string()))?
            }
            _ => {
                return Err(AppRateError::Configuration {
                    message: "Unsupported config file format".to_string(),
                    code: ErrorCode::CfgUnsupportedFormat,
                    suggestion: Some("Use .toml, .json, or .yaml".to_string()),
                })
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// Reads:
    /// - `APPRATE_MIN_LAUNCHES` (default: 10)
    /// - `APPRATE_MIN_INSTALL_DAYS` (default: 10)
    /// - `APPRATE_REMIND_INTERVAL_DAYS` (default: 1)
    /// - `APPRATE_REMIND_EVERY_N_LAUNCHES` (default: 1)
    /// - `APPRATE_MAX_PROMPTS_PER_YEAR` (default: unlimited)
    /// - `APPRATE_DEBUG` (set to enable)
    /// - `APPRATE_STORE` (store kind, e.g. `google_play`), with
    ///   `APPRATE_APPLICATION_ID` for Apple/BlackBerry and comma-separated
    ///   `APPRATE_STORE_URIS` for `other_uri`
    pub fn from_env() -> AppRateResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Overlay `APPRATE_*` environment variables onto this configuration.
    pub fn with_env_overrides(mut self) -> AppRateResult<Self> {
        if let Some(n) = env_number("APPRATE_MIN_LAUNCHES")? {
            self.min_launches = n;
        }
        if let Some(n) = env_number("APPRATE_MIN_INSTALL_DAYS")? {
            self.min_install_days = n;
        }
        if let Some(n) = env_number("APPRATE_REMIND_INTERVAL_DAYS")? {
            self.remind_interval_days = n;
        }
        if let Some(n) = env_number("APPRATE_REMIND_EVERY_N_LAUNCHES")? {
            self.remind_every_n_launches = n;
        }
        if let Some(n) = env_number("APPRATE_MAX_PROMPTS_PER_YEAR")? {
            self.max_prompts_per_year = n;
        }
        if std::env::var("APPRATE_DEBUG").is_ok() {
            self.debug = true;
        }

        if let Ok(store) = std::env::var("APPRATE_STORE") {
            let kind = StoreKind::from_str(store.trim().to_lowercase().as_str()).map_err(|_| {
                AppRateError::invalid_store(
                    format!("Unknown store kind '{}'", store),
                    "Use one of: amazon, apple, bazaar, black_berry, chinese_stores, google_play, \
                     mi, samsung, slide_me, tencent, yandex, other_uri",
                )
            })?;

            self.store = if kind.needs_application_id() {
                let id = env_number::<u64>("APPRATE_APPLICATION_ID")?
                    .ok_or_else(|| AppRateError::missing("APPRATE_APPLICATION_ID"))?;
                StoreTarget::with_application_id(kind, id)?
            } else if kind == StoreKind::OtherUri {
                let uris = std::env::var("APPRATE_STORE_URIS")
                    .map_err(|_| AppRateError::missing("APPRATE_STORE_URIS"))?;
                StoreTarget::uris(uris.split(',').map(str::trim))?
            } else {
                StoreTarget::from_kind(kind)?
            };
        }

        self.validate()?;
        Ok(self)
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> RateConfigBuilder {
        RateConfigBuilder::default()
    }

    /// Check cross-field consistency.
    pub fn validate(&self) -> AppRateResult<()> {
        self.store.validate()?;
        if self.custom_events.keys().any(|name| name.trim().is_empty()) {
            return Err(AppRateError::empty_event_name());
        }
        Ok(())
    }
}

fn env_number<T: FromStr>(name: &str) -> AppRateResult<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            AppRateError::configuration(format!("{} has an invalid value '{}'", name, raw))
        }),
        Err(_) => Ok(None),
    }
}

/// Builder for RateConfig.
#[derive(Default)]
pub struct RateConfigBuilder {
    config: RateConfig,
}

impl RateConfigBuilder {
    /// Set launches required before prompting (0 disables).
    pub fn min_launches(mut self, launches: u8) -> Self {
        self.config.min_launches = launches;
        self
    }

    /// Set days since install required before prompting (0 disables).
    pub fn min_install_days(mut self, days: u8) -> Self {
        self.config.min_install_days = days;
        self
    }

    /// Set days to wait after "remind me later" (0 disables).
    pub fn remind_interval_days(mut self, days: u8) -> Self {
        self.config.remind_interval_days = days;
        self
    }

    /// Prompt only every Nth launch (1 = every launch, 0 disables prompting).
    pub fn remind_every_n_launches(mut self, launches: u8) -> Self {
        self.config.remind_every_n_launches = launches;
        self
    }

    /// Cap prompts in any rolling 365 days ([`UNLIMITED_PROMPTS`] for no cap).
    pub fn max_prompts_per_year(mut self, prompts: u16) -> Self {
        self.config.max_prompts_per_year = prompts;
        self
    }

    /// Require a custom event to reach `minimum` before prompting.
    pub fn min_event_count(mut self, event: impl Into<String>, minimum: u16) -> Self {
        self.config.custom_events.insert(event.into(), minimum);
        self
    }

    /// Force the prompt regardless of conditions.
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Set the store target.
    pub fn store(mut self, store: StoreTarget) -> Self {
        self.config.store = store;
        self
    }

    /// Replace all dialog options at once.
    pub fn dialog(mut self, dialog: DialogOptions) -> Self {
        self.config.dialog = dialog;
        self
    }

    pub fn show_later_button(mut self, show: bool) -> Self {
        self.config.dialog.show_later_button = show;
        self
    }

    pub fn show_never_button(mut self, show: bool) -> Self {
        self.config.dialog.show_never_button = show;
        self
    }

    pub fn show_title(mut self, show: bool) -> Self {
        self.config.dialog.show_title = show;
        self
    }

    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.config.dialog.cancelable = cancelable;
        self
    }

    pub fn theme(mut self, theme_id: i32) -> Self {
        self.config.dialog.theme_id = theme_id;
        self
    }

    pub fn title(mut self, title: impl Into<TextValue>) -> Self {
        self.config.dialog.title = Some(title.into());
        self
    }

    pub fn message(mut self, message: impl Into<TextValue>) -> Self {
        self.config.dialog.message = Some(message.into());
        self
    }

    pub fn text_rate_now(mut self, text: impl Into<TextValue>) -> Self {
        self.config.dialog.text_rate_now = Some(text.into());
        self
    }

    pub fn text_later(mut self, text: impl Into<TextValue>) -> Self {
        self.config.dialog.text_later = Some(text.into());
        self
    }

    pub fn text_never(mut self, text: impl Into<TextValue>) -> Self {
        self.config.dialog.text_never = Some(text.into());
        self
    }

    /// Set the callback invoked after a dialog button is pressed.
    pub fn on_button_click(mut self, f: impl Fn(DialogButton) + Send + Sync + 'static) -> Self {
        self.config.dialog.listener = Some(ButtonListener::new(f));
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> AppRateResult<RateConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
