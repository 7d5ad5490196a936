//! Store target resolution.

use tracing::{debug, warn};

use super::uris;
use super::{Destination, StoreTarget, TaskFlags};
use crate::traits::PackageInspector;

/// Maps a [`StoreTarget`] to a concrete [`Destination`].
///
/// Resolution never fails: when the store app is missing, or the inspector
/// errors, the web listing is used instead.
pub struct StoreTargetResolver<'a> {
    inspector: &'a dyn PackageInspector,
    host_package: &'a str,
}

impl<'a> StoreTargetResolver<'a> {
    /// Create a resolver for the host app `host_package`.
    pub fn new(inspector: &'a dyn PackageInspector, host_package: &'a str) -> Self {
        Self {
            inspector,
            host_package,
        }
    }

    /// Resolve a store target.
    pub fn resolve(&self, target: &StoreTarget) -> Destination {
        let package = self.host_package;
        let destination = match target {
            StoreTarget::GooglePlay => self.native_or_web(
                uris::GOOGLE_PLAY_PACKAGE,
                uris::google_play(package),
                uris::google_play_web(package),
            ),
            StoreTarget::Amazon => self.native_or_web(
                uris::AMAZON_APPSTORE_PACKAGE,
                uris::amazon_appstore(package),
                uris::amazon_appstore_web(package),
            ),
            StoreTarget::Samsung => self.native_or_web(
                uris::SAMSUNG_GALAXY_APPS_PACKAGE,
                uris::samsung_galaxy_apps(package),
                uris::samsung_galaxy_apps_web(package),
            ),
            StoreTarget::Apple { application_id } => Destination::Uri {
                uri: uris::apple_app_store(*application_id),
            },
            StoreTarget::BlackBerry { application_id } => Destination::Uri {
                uri: uris::blackberry_world(*application_id),
            },
            StoreTarget::Bazaar => Destination::Uri {
                uri: uris::cafe_bazaar(package),
            },
            StoreTarget::ChineseStores => Destination::Uri {
                uri: uris::chinese_stores(package),
            },
            StoreTarget::Mi => Destination::Uri {
                uri: uris::mi_appstore(package),
            },
            StoreTarget::SlideMe => Destination::Uri {
                uri: uris::slideme(package),
            },
            StoreTarget::Tencent => Destination::Uri {
                uri: uris::tencent_app_store(package),
            },
            StoreTarget::Yandex => Destination::Uri {
                uri: uris::yandex_store(package),
            },
            // Validated configs always carry a first entry; an empty list
            // still resolves to something navigable.
            StoreTarget::OtherUri { uris: list } => match list.first() {
                Some(uri) => Destination::Uri { uri: uri.clone() },
                None => self.fallback(),
            },
            StoreTarget::OtherIntent { targets } => match targets.first() {
                Some(descriptor) => Destination::Custom(descriptor.clone()),
                None => self.fallback(),
            },
        };

        debug!(kind = %target.kind(), ?destination, "Resolved store destination");
        destination
    }

    fn native_or_web(&self, store_package: &str, native_uri: String, web_uri: String) -> Destination {
        if self.is_installed(store_package) {
            Destination::StoreApp {
                uri: native_uri,
                package: store_package.to_string(),
                flags: TaskFlags::clean_top_level(),
            }
        } else {
            Destination::Uri { uri: web_uri }
        }
    }

    fn is_installed(&self, store_package: &str) -> bool {
        match self.inspector.is_installed(store_package) {
            Ok(installed) => installed,
            Err(e) => {
                warn!(package = store_package, "Package lookup failed, using web listing: {}", e);
                false
            }
        }
    }

    fn fallback(&self) -> Destination {
        Destination::Uri {
            uri: uris::google_play_web(self.host_package),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppRateError;
    use crate::store::{IntentDescriptor, StoreKind};
    use crate::traits::{InstalledPackages, MockPackageInspector};
    use mockall::predicate::eq;

    const HOST: &str = "com.example.app";

    #[test]
    fn test_google_play_installed_opens_store_app() {
        let mut inspector = MockPackageInspector::new();
        inspector
            .expect_is_installed()
            .with(eq(uris::GOOGLE_PLAY_PACKAGE))
            .times(1)
            .returning(|_| Ok(true));

        let destination = StoreTargetResolver::new(&inspector, HOST).resolve(&StoreTarget::GooglePlay);
        assert_eq!(
            destination,
            Destination::StoreApp {
                uri: "market://details?id=com.example.app".to_string(),
                package: uris::GOOGLE_PLAY_PACKAGE.to_string(),
                flags: TaskFlags::clean_top_level(),
            }
        );
    }

    #[test]
    fn test_google_play_missing_falls_back_to_web() {
        let inspector = InstalledPackages::new();
        let destination = StoreTargetResolver::new(&inspector, HOST).resolve(&StoreTarget::GooglePlay);
        assert_eq!(
            destination.uri(),
            Some("https://play.google.com/store/apps/details?id=com.example.app")
        );
        assert!(!destination.is_store_app());
    }

    #[test]
    fn test_inspector_error_treated_as_not_installed() {
        let mut inspector = MockPackageInspector::new();
        inspector
            .expect_is_installed()
            .returning(|_| Err(AppRateError::internal("package manager unavailable")));

        let destination = StoreTargetResolver::new(&inspector, HOST).resolve(&StoreTarget::Amazon);
        assert_eq!(
            destination,
            Destination::Uri {
                uri: "https://www.amazon.com/gp/mas/dl/android?p=com.example.app".to_string()
            }
        );
    }

    #[test]
    fn test_samsung_native_uses_samsung_package() {
        let inspector = InstalledPackages::new().with(uris::SAMSUNG_GALAXY_APPS_PACKAGE);
        let destination = StoreTargetResolver::new(&inspector, HOST).resolve(&StoreTarget::Samsung);
        match destination {
            Destination::StoreApp { uri, package, flags } => {
                assert_eq!(uri, "samsungapps://ProductDetail/com.example.app");
                assert_eq!(package, uris::SAMSUNG_GALAXY_APPS_PACKAGE);
                assert!(flags.new_task && flags.clear_top && flags.reset_task_if_needed);
            }
            other => panic!("expected store app destination, got {:?}", other),
        }
    }

    #[test]
    fn test_template_stores_skip_package_check() {
        let mut inspector = MockPackageInspector::new();
        inspector.expect_is_installed().never();
        let resolver = StoreTargetResolver::new(&inspector, HOST);

        assert_eq!(
            resolver.resolve(&StoreTarget::Yandex).uri(),
            Some("yastore://details?id=com.example.app")
        );
        assert_eq!(
            resolver.resolve(&StoreTarget::Mi).uri(),
            Some("mimarket://details?id=com.example.app")
        );
        assert_eq!(
            resolver.resolve(&StoreTarget::Bazaar).uri(),
            Some("bazaar://details?id=com.example.app")
        );
    }

    #[test]
    fn test_apple_and_blackberry_use_application_id() {
        let inspector = InstalledPackages::new();
        let resolver = StoreTargetResolver::new(&inspector, HOST);

        let apple = StoreTarget::with_application_id(StoreKind::Apple, 1234).unwrap();
        assert_eq!(resolver.resolve(&apple).uri(), Some("https://itunes.apple.com/app/id1234"));

        let blackberry = StoreTarget::with_application_id(StoreKind::BlackBerry, 99).unwrap();
        let uri = resolver.resolve(&blackberry);
        assert_eq!(uri.uri(), Some("https://appworld.blackberry.com/webstore/content/99"));
        assert!(!uri.uri().unwrap().contains(HOST));
    }

    #[test]
    fn test_other_uri_uses_first_entry() {
        let inspector = InstalledPackages::new();
        let target = StoreTarget::uris(["https://first.example/app", "https://second.example/app"]).unwrap();
        let destination = StoreTargetResolver::new(&inspector, HOST).resolve(&target);
        assert_eq!(
            destination,
            Destination::Uri {
                uri: "https://first.example/app".to_string()
            }
        );
    }

    #[test]
    fn test_other_intent_passes_first_descriptor_through() {
        let inspector = InstalledPackages::new();
        let first = IntentDescriptor::view("store://listing/1").with_package("com.store.one");
        let second = IntentDescriptor::view("store://listing/2");
        let target = StoreTarget::intents(vec![first.clone(), second]).unwrap();

        let destination = StoreTargetResolver::new(&inspector, HOST).resolve(&target);
        assert_eq!(destination, Destination::Custom(first));
        assert_eq!(destination.uri(), Some("store://listing/1"));
    }

    #[test]
    fn test_unvalidated_empty_uri_list_still_navigable() {
        let inspector = InstalledPackages::new();
        let target = StoreTarget::OtherUri { uris: vec![] };
        let destination = StoreTargetResolver::new(&inspector, HOST).resolve(&target);
        assert!(destination.uri().is_some());
    }
}
