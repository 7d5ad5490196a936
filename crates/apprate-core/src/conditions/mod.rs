//! Prompt condition evaluation.
//!
//! The verdict is the AND of seven independent predicates over the
//! configuration and a [`CounterSnapshot`](crate::counters::CounterSnapshot):
//! - `consent`: the user has not opted out
//! - `launches`: enough launches (0 disables)
//! - `remind_cadence`: this launch is on the every-Nth-launch beat
//! - `install_age`: enough days since install (0 disables)
//! - `remind_age`: enough days since the last reminder (0 disables)
//! - `custom_events`: every configured event reached its minimum
//! - `annual_cap`: fewer displays than the yearly cap in the last 365 days
//!
//! The debug override is not part of the engine; the controller applies it.
//!
//! # Example
//!
//! ```
//! use apprate_core::conditions::ConditionEngine;
//! use apprate_core::counters::CounterSnapshot;
//! use apprate_core::RateConfig;
//!
//! let config = RateConfig::builder()
//!     .min_launches(0)
//!     .min_install_days(0)
//!     .remind_interval_days(0)
//!     .build()
//!     .unwrap();
//!
//! assert!(ConditionEngine::should_prompt(&config, &CounterSnapshot::default(), 0));
//! ```

mod engine;
mod predicates;

pub use engine::ConditionEngine;
pub use predicates::{Evaluation, Predicate};
