//! Rate-prompt controller.
//!
//! Ties the counters, the condition engine, the store resolver and the
//! host's dialog presenter together. The controller is an explicitly
//! constructed handle; hosts create one and pass it where it is needed.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::conditions::{ConditionEngine, Evaluation};
use crate::config::{DialogOptions, RateConfig};
use crate::counters::{CounterSnapshot, CounterStore};
use crate::error::{AppRateError, AppRateResult};
use crate::store::{Destination, StoreTargetResolver};
use crate::traits::{ButtonListener, DialogButton, DialogPresenter, PackageInspector, PreferenceStore};

/// Source of the current time for events the controller does not receive a
/// `now` for, such as dialog button presses.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Result of asking the controller to show the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptOutcome {
    /// Conditions were not met; nothing happened.
    NotEligible,
    /// The dialog was built and displayed.
    Shown,
    /// Conditions were met but the presenter produced no dialog.
    PresentationFailed,
}

impl PromptOutcome {
    /// Whether a prompt is now on screen.
    pub fn is_shown(&self) -> bool {
        matches!(self, PromptOutcome::Shown)
    }

    /// Whether the conditions (or the debug override) called for a prompt.
    pub fn verdict(&self) -> bool {
        !matches!(self, PromptOutcome::NotEligible)
    }
}

/// Decides when to show the rating prompt and shows it.
///
/// # Example
///
/// ```ignore
/// use apprate_core::{RateConfig, RatePrompt};
///
/// let prompt = RatePrompt::builder()
///     .config(RateConfig::builder().min_launches(5).build()?)
///     .preferences(prefs)
///     .package_inspector(inspector)
///     .presenter(presenter)
///     .host_package("com.example.app")
///     .build()?;
///
/// prompt.on_launch(Utc::now())?;
/// prompt.maybe_show_prompt(Utc::now())?;
/// ```
pub struct RatePrompt {
    config: Arc<RateConfig>,
    counters: CounterStore,
    inspector: Arc<dyn PackageInspector>,
    presenter: Arc<dyn DialogPresenter>,
    host_package: String,
    clock: Clock,
    // Held across multi-key updates in on_launch and display bookkeeping.
    sequence: Mutex<()>,
}

impl RatePrompt {
    /// Start building a controller.
    pub fn builder() -> RatePromptBuilder {
        RatePromptBuilder::default()
    }

    /// The active configuration.
    pub fn config(&self) -> &RateConfig {
        &self.config
    }

    /// Direct access to the persisted counters.
    pub fn counters(&self) -> &CounterStore {
        &self.counters
    }

    /// Package id of the host app.
    pub fn host_package(&self) -> &str {
        &self.host_package
    }

    /// Record an app launch and return the launch count.
    ///
    /// The first launch ever stores the install time and starts counting
    /// from zero; later launches increment the count.
    pub fn on_launch(&self, now: DateTime<Utc>) -> AppRateResult<u32> {
        let _guard = self.lock()?;
        let now_ms = now.timestamp_millis();

        if self.counters.install_timestamp()? == 0 {
            self.counters.set_install_timestamp(now_ms)?;
            self.counters.set_launch_count(0)?;
            self.counters.set_last_remind_timestamp(now_ms)?;
            info!(install_timestamp = now_ms, "First launch recorded");
            return Ok(0);
        }

        let launch_count = self.counters.increment_launch_count()?;
        debug!(launch_count, "Recorded launch");
        Ok(launch_count)
    }

    /// Read every counter the conditions depend on.
    pub fn snapshot(&self, now: DateTime<Utc>) -> AppRateResult<CounterSnapshot> {
        self.counters
            .snapshot(self.config.custom_events.keys(), now.timestamp_millis())
    }

    /// Evaluate every condition. The debug override is not applied.
    pub fn evaluate(&self, now: DateTime<Utc>) -> AppRateResult<Evaluation> {
        let snapshot = self.snapshot(now)?;
        let evaluation = ConditionEngine::evaluate(&self.config, &snapshot, now.timestamp_millis());
        debug!(
            satisfied = evaluation.is_satisfied(),
            failed = ?evaluation.failed(),
            "Evaluated prompt conditions"
        );
        Ok(evaluation)
    }

    /// Whether the conditions call for a prompt. The debug override is not
    /// applied.
    pub fn should_prompt(&self, now: DateTime<Utc>) -> AppRateResult<bool> {
        Ok(self.evaluate(now)?.is_satisfied())
    }

    /// Show the prompt if the debug override is set or the conditions hold.
    pub fn maybe_show_prompt(&self, now: DateTime<Utc>) -> AppRateResult<PromptOutcome> {
        let verdict = self.config.debug || self.should_prompt(now)?;
        if !verdict {
            return Ok(PromptOutcome::NotEligible);
        }
        if self.config.debug {
            debug!("Debug override forces the prompt");
        }
        self.show_prompt(now)
    }

    /// Show the prompt without checking any condition.
    pub fn show_prompt(&self, now: DateTime<Utc>) -> AppRateResult<PromptOutcome> {
        let destination = self.destination();
        let options = self.dialog_options();

        let Some(mut dialog) = self.presenter.present(&destination, &options) else {
            warn!("Failed to rate app, can't create rate dialog");
            return Ok(PromptOutcome::PresentationFailed);
        };

        {
            let _guard = self.lock()?;
            let now_ms = now.timestamp_millis();
            if self.counters.first_dialog_shown_timestamp()? == 0 {
                self.counters.set_first_dialog_shown_timestamp(now_ms)?;
            }
            let shown = self
                .counters
                .record_prompt_shown(now_ms, self.config.max_prompts_per_year)?;
            info!(prompts_shown_in_window = shown, "Showing rate prompt");
        }

        dialog.show();
        Ok(PromptOutcome::Shown)
    }

    /// Where "rate now" leads for the configured store.
    pub fn destination(&self) -> Destination {
        StoreTargetResolver::new(self.inspector.as_ref(), &self.host_package).resolve(&self.config.store)
    }

    /// Apply the bookkeeping for a dialog button press.
    ///
    /// Presenters built from [`RatePrompt::show_prompt`] get this wired in
    /// automatically; hosts with their own dialogs call it directly.
    pub fn record_response(&self, button: DialogButton, now: DateTime<Utc>) -> AppRateResult<()> {
        apply_response(&self.counters, button, now.timestamp_millis())
    }

    /// Count one occurrence of a custom event.
    pub fn increment_event(&self, name: &str) -> AppRateResult<u16> {
        let count = self.counters.increment_event_count(name)?;
        debug!(event = name, count, "Incremented custom event");
        Ok(count)
    }

    /// Overwrite a custom event count.
    pub fn set_event_count(&self, name: &str, count: u16) -> AppRateResult<()> {
        self.counters.set_event_count(name, count)
    }

    /// Record whether the user agrees to be asked.
    pub fn set_consent(&self, agree: bool) -> AppRateResult<()> {
        self.counters.set_consent(agree)
    }

    /// Allow prompting again after the user opted out.
    pub fn clear_consent(&self) -> AppRateResult<()> {
        self.counters.set_consent(true)
    }

    /// Forget every counter, as if the app was freshly installed.
    pub fn clear_all(&self) -> AppRateResult<()> {
        let _guard = self.lock()?;
        self.counters.clear_all()
    }

    fn dialog_options(&self) -> DialogOptions {
        let counters = self.counters.clone();
        let clock = Arc::clone(&self.clock);
        let host_listener = self.config.dialog.listener.clone();

        let mut options = self.config.dialog.clone();
        options.listener = Some(ButtonListener::new(move |button| {
            if let Err(e) = apply_response(&counters, button, clock().timestamp_millis()) {
                warn!(%button, "Failed to record prompt response: {}", e);
            }
            if let Some(listener) = &host_listener {
                listener.call(button);
            }
        }));
        options
    }

    fn lock(&self) -> AppRateResult<MutexGuard<'_, ()>> {
        self.sequence
            .lock()
            .map_err(|_| AppRateError::internal("controller lock poisoned"))
    }
}

fn apply_response(counters: &CounterStore, button: DialogButton, now: i64) -> AppRateResult<()> {
    match button {
        DialogButton::Positive | DialogButton::Negative => counters.set_consent(false)?,
        DialogButton::Neutral => counters.set_last_remind_timestamp(now)?,
    }
    debug!(%button, "Recorded prompt response");
    Ok(())
}

/// Builder for [`RatePrompt`].
#[derive(Default)]
pub struct RatePromptBuilder {
    config: Option<RateConfig>,
    preferences: Option<Arc<dyn PreferenceStore>>,
    inspector: Option<Arc<dyn PackageInspector>>,
    presenter: Option<Arc<dyn DialogPresenter>>,
    host_package: Option<String>,
    clock: Option<Clock>,
}

impl RatePromptBuilder {
    pub fn config(mut self, config: RateConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn preferences(mut self, preferences: Arc<dyn PreferenceStore>) -> Self {
        self.preferences = Some(preferences);
        self
    }

    pub fn package_inspector(mut self, inspector: Arc<dyn PackageInspector>) -> Self {
        self.inspector = Some(inspector);
        self
    }

    pub fn presenter(mut self, presenter: Arc<dyn DialogPresenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn host_package(mut self, package: impl Into<String>) -> Self {
        self.host_package = Some(package.into());
        self
    }

    /// Override the wall clock used to timestamp button presses.
    pub fn clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Build the controller, failing if anything required is missing.
    pub fn build(self) -> AppRateResult<RatePrompt> {
        let config = self.config.ok_or_else(|| AppRateError::missing("config"))?;
        config.validate()?;

        let host_package = self
            .host_package
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| AppRateError::missing("host_package"))?;

        Ok(RatePrompt {
            config: Arc::new(config),
            counters: CounterStore::new(
                self.preferences
                    .ok_or_else(|| AppRateError::missing("preferences"))?,
            ),
            inspector: self
                .inspector
                .ok_or_else(|| AppRateError::missing("package_inspector"))?,
            presenter: self
                .presenter
                .ok_or_else(|| AppRateError::missing("presenter"))?,
            host_package,
            clock: self.clock.unwrap_or_else(|| Arc::new(Utc::now) as Clock),
            sequence: Mutex::new(()),
        })
    }
}
