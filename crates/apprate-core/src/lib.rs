//! apprate-core - Core library for apprate.
//!
//! This crate decides when an app should ask its user for a store rating,
//! persists the counters behind that decision, and resolves where the
//! "rate now" button leads.
//!
//! # Example
//!
//! ```ignore
//! use apprate_core::{RateConfig, RatePrompt, SqlitePreferenceStore, StoreTarget};
//!
//! let config = RateConfig::builder()
//!     .min_launches(10)
//!     .min_install_days(3)
//!     .store(StoreTarget::GooglePlay)
//!     .build()?;
//!
//! let prompt = RatePrompt::builder()
//!     .config(config)
//!     .preferences(Arc::new(SqlitePreferenceStore::new("prefs.db")?))
//!     .package_inspector(inspector)
//!     .presenter(presenter)
//!     .host_package("com.example.app")
//!     .build()?;
//!
//! prompt.on_launch(Utc::now())?;
//! prompt.maybe_show_prompt(Utc::now())?;
//! ```

pub mod conditions;
pub mod config;
pub mod controller;
pub mod counters;
pub mod error;
pub mod prefs;
pub mod store;
pub mod traits;

// Re-export commonly used types
pub use conditions::{ConditionEngine, Evaluation, Predicate};
pub use config::{DialogOptions, RateConfig, RateConfigBuilder, TextValue, UNLIMITED_PROMPTS};
pub use controller::{Clock, PromptOutcome, RatePrompt, RatePromptBuilder};
pub use counters::{CounterSnapshot, CounterStore};
pub use error::{AppRateError, AppRateResult, ErrorCode};
pub use prefs::{MemoryPreferenceStore, SqlitePreferenceStore};
pub use store::{Destination, IntentDescriptor, StoreKind, StoreTarget, StoreTargetResolver};
pub use traits::{
    ButtonListener, DialogButton, DialogPresenter, InstalledPackages, PackageInspector,
    PreferenceStore, PresentedDialog,
};
