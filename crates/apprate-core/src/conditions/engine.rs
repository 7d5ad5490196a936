//! The prompt decision function.

use crate::config::{RateConfig, UNLIMITED_PROMPTS};
use crate::counters::{CounterSnapshot, DAY_IN_MILLIS};

use super::Evaluation;

/// Pure decision logic over configuration and counters.
///
/// Nothing here reads the clock or touches storage; `now` is epoch
/// milliseconds supplied by the caller.
pub struct ConditionEngine;

impl ConditionEngine {
    /// Whether the prompt should be shown at `now`.
    pub fn should_prompt(config: &RateConfig, counters: &CounterSnapshot, now: i64) -> bool {
        Self::evaluate(config, counters, now).is_satisfied()
    }

    /// Evaluate every predicate.
    pub fn evaluate(config: &RateConfig, counters: &CounterSnapshot, now: i64) -> Evaluation {
        Evaluation {
            consent: counters.consent,
            launches: Self::launches(config.min_launches, counters.launch_count),
            remind_cadence: Self::remind_cadence(config.remind_every_n_launches, counters.launch_count),
            install_age: Self::days_elapsed(config.min_install_days, counters.install_timestamp, now),
            remind_age: Self::days_elapsed(config.remind_interval_days, counters.last_remind_timestamp, now),
            custom_events: Self::custom_events(config, counters),
            annual_cap: Self::annual_cap(config.max_prompts_per_year, counters.prompts_shown_in_window),
        }
    }

    /// `launch_count >= minimum`, or always true when `minimum` is 0.
    pub fn launches(minimum: u8, launch_count: u32) -> bool {
        minimum == 0 || launch_count >= u32::from(minimum)
    }

    /// True on every `every_n`-th launch; 1 means every launch and 0 never.
    pub fn remind_cadence(every_n: u8, launch_count: u32) -> bool {
        every_n == 1 || (every_n != 0 && launch_count % u32::from(every_n) == 0)
    }

    /// At least `days` whole days between `since` and `now`, or always true
    /// when `days` is 0.
    pub fn days_elapsed(days: u8, since: i64, now: i64) -> bool {
        days == 0 || now.saturating_sub(since) >= i64::from(days) * DAY_IN_MILLIS
    }

    /// Every configured event reached its minimum. Vacuously true when none
    /// are configured.
    pub fn custom_events(config: &RateConfig, counters: &CounterSnapshot) -> bool {
        config
            .custom_events
            .iter()
            .all(|(name, minimum)| counters.event_count(name) >= *minimum)
    }

    /// Fewer displays than `cap` in the rolling 365-day window, or always
    /// true for [`UNLIMITED_PROMPTS`].
    pub fn annual_cap(cap: u16, shown: u16) -> bool {
        cap == UNLIMITED_PROMPTS || shown < cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::Predicate;

    const NOW: i64 = 1_700_000_000_000;

    fn disabled_config() -> RateConfig {
        RateConfig::builder()
            .min_launches(0)
            .min_install_days(0)
            .remind_interval_days(0)
            .remind_every_n_launches(1)
            .max_prompts_per_year(UNLIMITED_PROMPTS)
            .build()
            .unwrap()
    }

    fn fresh_counters() -> CounterSnapshot {
        CounterSnapshot {
            install_timestamp: NOW,
            last_remind_timestamp: NOW,
            ..Default::default()
        }
    }

    #[test]
    fn test_all_disabled_is_vacuously_true() {
        assert!(ConditionEngine::should_prompt(&disabled_config(), &fresh_counters(), NOW));
        assert!(ConditionEngine::should_prompt(
            &disabled_config(),
            &CounterSnapshot::default(),
            0
        ));
    }

    #[test]
    fn test_no_consent_overrides_everything() {
        let counters = CounterSnapshot {
            consent: false,
            ..fresh_counters()
        };
        let evaluation = ConditionEngine::evaluate(&disabled_config(), &counters, NOW);
        assert!(!evaluation.is_satisfied());
        assert_eq!(evaluation.failed(), vec![Predicate::Consent]);
    }

    #[test]
    fn test_launches_threshold_inclusive() {
        assert!(ConditionEngine::launches(0, 0));
        assert!(!ConditionEngine::launches(10, 9));
        assert!(ConditionEngine::launches(10, 10));
        assert!(ConditionEngine::launches(10, 11));
    }

    #[test]
    fn test_remind_cadence_every_launch() {
        for count in [0u32, 1, 2, 7, 1000, u32::MAX] {
            assert!(ConditionEngine::remind_cadence(1, count));
        }
    }

    #[test]
    fn test_remind_cadence_modulo() {
        for n in 2u8..=9 {
            for count in 0u32..40 {
                assert_eq!(
                    ConditionEngine::remind_cadence(n, count),
                    count % u32::from(n) == 0,
                    "n={} count={}",
                    n,
                    count
                );
            }
        }
    }

    #[test]
    fn test_remind_cadence_zero_disables_prompting() {
        for count in [0u32, 1, 5, 10] {
            assert!(!ConditionEngine::remind_cadence(0, count));
        }
    }

    #[test]
    fn test_days_elapsed_boundaries() {
        assert!(ConditionEngine::days_elapsed(0, NOW, NOW));
        assert!(!ConditionEngine::days_elapsed(3, NOW, NOW + 3 * DAY_IN_MILLIS - 1));
        assert!(ConditionEngine::days_elapsed(3, NOW, NOW + 3 * DAY_IN_MILLIS));
        // Clock moved backwards.
        assert!(!ConditionEngine::days_elapsed(1, NOW, NOW - DAY_IN_MILLIS));
    }

    #[test]
    fn test_custom_events() {
        let config = RateConfig::builder()
            .min_event_count("purchase", 2)
            .min_event_count("share", 1)
            .build()
            .unwrap();

        let mut counters = fresh_counters();
        counters.event_counts.insert("purchase".to_string(), 2);
        counters.event_counts.insert("share".to_string(), 1);
        assert!(ConditionEngine::custom_events(&config, &counters));

        counters.event_counts.insert("share".to_string(), 0);
        assert!(!ConditionEngine::custom_events(&config, &counters));
    }

    #[test]
    fn test_unmet_event_flips_verdict() {
        let counters = fresh_counters();
        assert!(ConditionEngine::should_prompt(&disabled_config(), &counters, NOW));

        let mut config = disabled_config();
        config.custom_events.insert("tutorial_done".to_string(), 1);
        let evaluation = ConditionEngine::evaluate(&config, &counters, NOW);
        assert_eq!(evaluation.failed(), vec![Predicate::CustomEvents]);
    }

    #[test]
    fn test_annual_cap() {
        assert!(ConditionEngine::annual_cap(UNLIMITED_PROMPTS, u16::MAX));
        assert!(ConditionEngine::annual_cap(2, 1));
        assert!(!ConditionEngine::annual_cap(2, 2));
        assert!(!ConditionEngine::annual_cap(0, 0));
    }

    #[test]
    fn test_cap_blocks_when_everything_else_passes() {
        let config = RateConfig::builder()
            .min_launches(0)
            .min_install_days(0)
            .remind_interval_days(0)
            .max_prompts_per_year(2)
            .build()
            .unwrap();
        let counters = CounterSnapshot {
            prompts_shown_in_window: 2,
            ..fresh_counters()
        };
        let evaluation = ConditionEngine::evaluate(&config, &counters, NOW);
        assert_eq!(evaluation.failed(), vec![Predicate::AnnualCap]);
    }

    #[test]
    fn test_fresh_install_scenario() {
        let config = RateConfig::builder()
            .min_launches(10)
            .min_install_days(3)
            .build()
            .unwrap();

        let counters = CounterSnapshot {
            launch_count: 1,
            ..fresh_counters()
        };
        assert!(!ConditionEngine::should_prompt(&config, &counters, NOW));

        let later = NOW + 3 * DAY_IN_MILLIS;
        let counters = CounterSnapshot {
            launch_count: 10,
            ..fresh_counters()
        };
        assert!(ConditionEngine::should_prompt(&config, &counters, later));
    }
}
