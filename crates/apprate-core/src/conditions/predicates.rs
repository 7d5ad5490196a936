//! Per-predicate evaluation results.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// One of the conditions combined into the prompt verdict.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Predicate {
    Consent,
    Launches,
    RemindCadence,
    InstallAge,
    RemindAge,
    CustomEvents,
    AnnualCap,
}

/// Outcome of every predicate for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub consent: bool,
    pub launches: bool,
    pub remind_cadence: bool,
    pub install_age: bool,
    pub remind_age: bool,
    pub custom_events: bool,
    pub annual_cap: bool,
}

impl Evaluation {
    /// Result of a single predicate.
    pub fn get(&self, predicate: Predicate) -> bool {
        match predicate {
            Predicate::Consent => self.consent,
            Predicate::Launches => self.launches,
            Predicate::RemindCadence => self.remind_cadence,
            Predicate::InstallAge => self.install_age,
            Predicate::RemindAge => self.remind_age,
            Predicate::CustomEvents => self.custom_events,
            Predicate::AnnualCap => self.annual_cap,
        }
    }

    /// Whether every predicate holds.
    pub fn is_satisfied(&self) -> bool {
        Predicate::iter().all(|p| self.get(p))
    }

    /// Predicates that did not hold.
    pub fn failed(&self) -> Vec<Predicate> {
        Predicate::iter().filter(|p| !self.get(*p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_true() -> Evaluation {
        Evaluation {
            consent: true,
            launches: true,
            remind_cadence: true,
            install_age: true,
            remind_age: true,
            custom_events: true,
            annual_cap: true,
        }
    }

    #[test]
    fn test_all_true_is_satisfied() {
        assert!(all_true().is_satisfied());
        assert!(all_true().failed().is_empty());
    }

    #[test]
    fn test_failed_lists_predicates_in_order() {
        let evaluation = Evaluation {
            launches: false,
            annual_cap: false,
            ..all_true()
        };
        assert!(!evaluation.is_satisfied());
        assert_eq!(evaluation.failed(), vec![Predicate::Launches, Predicate::AnnualCap]);
    }

    #[test]
    fn test_predicate_names() {
        assert_eq!(Predicate::RemindCadence.to_string(), "remind_cadence");
        let json = serde_json::to_string(&Predicate::InstallAge).unwrap();
        assert_eq!(json, "\"install_age\"");
    }
}
