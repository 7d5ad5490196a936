//! Store selection types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{AppRateError, AppRateResult};

/// Marketplace brand, without any per-brand data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StoreKind {
    Amazon,
    Apple,
    Bazaar,
    BlackBerry,
    ChineseStores,
    GooglePlay,
    Mi,
    Samsung,
    SlideMe,
    Tencent,
    Yandex,
    OtherUri,
    OtherIntent,
}

impl StoreKind {
    /// Whether this brand is addressed by a numeric application id rather
    /// than the host package name.
    pub fn needs_application_id(&self) -> bool {
        matches!(self, StoreKind::Apple | StoreKind::BlackBerry)
    }

    /// Whether this kind carries host-supplied destinations.
    pub fn is_custom(&self) -> bool {
        matches!(self, StoreKind::OtherUri | StoreKind::OtherIntent)
    }
}

/// An opaque launch descriptor supplied by the host.
///
/// The core never interprets it; it is handed to the presenter verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentDescriptor {
    /// Action name understood by the host platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Data URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Package that should handle the launch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Extra key/value pairs.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
}

impl IntentDescriptor {
    /// Create a descriptor for a "view this URI" launch.
    pub fn view(data: impl Into<String>) -> Self {
        Self {
            action: Some("android.intent.action.VIEW".to_string()),
            data: Some(data.into()),
            ..Default::default()
        }
    }

    /// Builder method to pin the handling package.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }
}

/// The marketplace the host app is rated in.
///
/// Only the first entry of `uris` / `targets` is ever used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreTarget {
    Amazon,
    Apple {
        application_id: u64,
    },
    Bazaar,
    BlackBerry {
        application_id: u64,
    },
    ChineseStores,
    #[default]
    GooglePlay,
    Mi,
    Samsung,
    SlideMe,
    Tencent,
    Yandex,
    OtherUri {
        uris: Vec<String>,
    },
    OtherIntent {
        targets: Vec<IntentDescriptor>,
    },
}

impl StoreTarget {
    /// Select a store that needs no extra data.
    ///
    /// Apple and BlackBerry need [`StoreTarget::with_application_id`]; the
    /// custom kinds need [`StoreTarget::uris`] or [`StoreTarget::intents`].
    pub fn from_kind(kind: StoreKind) -> AppRateResult<Self> {
        Ok(match kind {
            StoreKind::Amazon => Self::Amazon,
            StoreKind::Bazaar => Self::Bazaar,
            StoreKind::ChineseStores => Self::ChineseStores,
            StoreKind::GooglePlay => Self::GooglePlay,
            StoreKind::Mi => Self::Mi,
            StoreKind::Samsung => Self::Samsung,
            StoreKind::SlideMe => Self::SlideMe,
            StoreKind::Tencent => Self::Tencent,
            StoreKind::Yandex => Self::Yandex,
            StoreKind::Apple | StoreKind::BlackBerry => {
                return Err(AppRateError::invalid_store(
                    format!("{} requires a numeric application id", kind),
                    "Use StoreTarget::with_application_id(kind, id)",
                ))
            }
            StoreKind::OtherUri | StoreKind::OtherIntent => {
                return Err(AppRateError::invalid_store(
                    format!("{} requires at least one destination", kind),
                    "Use StoreTarget::uris(..) or StoreTarget::intents(..)",
                ))
            }
        })
    }

    /// Select a store with a numeric application id.
    ///
    /// The id is only meaningful for Apple and BlackBerry and is ignored for
    /// every other brand.
    pub fn with_application_id(kind: StoreKind, application_id: u64) -> AppRateResult<Self> {
        match kind {
            StoreKind::Apple => Ok(Self::Apple { application_id }),
            StoreKind::BlackBerry => Ok(Self::BlackBerry { application_id }),
            other => Self::from_kind(other),
        }
    }

    /// Select arbitrary store URIs.
    pub fn uris<I, S>(uris: I) -> AppRateResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let target = Self::OtherUri {
            uris: uris.into_iter().map(Into::into).collect(),
        };
        target.validate()?;
        Ok(target)
    }

    /// Select host-supplied launch descriptors.
    pub fn intents(targets: Vec<IntentDescriptor>) -> AppRateResult<Self> {
        let target = Self::OtherIntent { targets };
        target.validate()?;
        Ok(target)
    }

    /// The brand of this target.
    pub fn kind(&self) -> StoreKind {
        match self {
            Self::Amazon => StoreKind::Amazon,
            Self::Apple { .. } => StoreKind::Apple,
            Self::Bazaar => StoreKind::Bazaar,
            Self::BlackBerry { .. } => StoreKind::BlackBerry,
            Self::ChineseStores => StoreKind::ChineseStores,
            Self::GooglePlay => StoreKind::GooglePlay,
            Self::Mi => StoreKind::Mi,
            Self::Samsung => StoreKind::Samsung,
            Self::SlideMe => StoreKind::SlideMe,
            Self::Tencent => StoreKind::Tencent,
            Self::Yandex => StoreKind::Yandex,
            Self::OtherUri { .. } => StoreKind::OtherUri,
            Self::OtherIntent { .. } => StoreKind::OtherIntent,
        }
    }

    /// Check that custom kinds carry a usable first entry.
    pub fn validate(&self) -> AppRateResult<()> {
        match self {
            Self::OtherUri { uris } => match uris.first() {
                Some(first) if !first.trim().is_empty() => Ok(()),
                Some(_) => Err(AppRateError::invalid_store(
                    "the first store URI is blank",
                    "Pass a full URI to the app listing",
                )),
                None => Err(AppRateError::invalid_store(
                    "other_uri requires at least one URI",
                    "Pass a full URI to the app listing",
                )),
            },
            Self::OtherIntent { targets } if targets.is_empty() => Err(AppRateError::invalid_store(
                "other_intent requires at least one descriptor",
                "Pass at least one IntentDescriptor",
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use strum::IntoEnumIterator;

    #[test]
    fn test_from_kind_round_trips_kind() {
        for kind in StoreKind::iter() {
            if kind.needs_application_id() || kind.is_custom() {
                continue;
            }
            assert_eq!(StoreTarget::from_kind(kind).unwrap().kind(), kind);
        }
    }

    #[test]
    fn test_apple_requires_application_id() {
        let err = StoreTarget::from_kind(StoreKind::Apple).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CfgInvalidStore);

        let target = StoreTarget::with_application_id(StoreKind::Apple, 284882215).unwrap();
        assert_eq!(
            target,
            StoreTarget::Apple {
                application_id: 284882215
            }
        );
    }

    #[test]
    fn test_application_id_ignored_for_package_stores() {
        let target = StoreTarget::with_application_id(StoreKind::Amazon, 42).unwrap();
        assert_eq!(target, StoreTarget::Amazon);
    }

    #[test]
    fn test_custom_kinds_need_entries() {
        assert!(StoreTarget::from_kind(StoreKind::OtherUri).is_err());
        assert!(StoreTarget::uris(Vec::<String>::new()).is_err());
        assert!(StoreTarget::uris(["   "]).is_err());
        assert!(StoreTarget::intents(vec![]).is_err());
        assert!(StoreTarget::uris(["https://example.com/app"]).is_ok());
    }

    #[test]
    fn test_store_kind_parsing() {
        assert_eq!("google_play".parse::<StoreKind>().unwrap(), StoreKind::GooglePlay);
        assert_eq!("black_berry".parse::<StoreKind>().unwrap(), StoreKind::BlackBerry);
        assert!("play_store".parse::<StoreKind>().is_err());
    }

    #[test]
    fn test_store_target_serialization() {
        let target = StoreTarget::with_application_id(StoreKind::BlackBerry, 7).unwrap();
        let json = serde_json::to_string(&target).unwrap();
        assert!(json.contains("\"kind\":\"black_berry\""));
        assert!(json.contains("\"application_id\":7"));

        let parsed: StoreTarget = serde_json::from_str(r#"{"kind":"samsung"}"#).unwrap();
        assert_eq!(parsed, StoreTarget::Samsung);
    }
}
