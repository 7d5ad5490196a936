//! Store targets and destination resolution.
//!
//! A [`StoreTarget`] names the marketplace an app is listed in. The
//! [`StoreTargetResolver`] turns it into a [`Destination`] the presenter can
//! open:
//! - Google Play, Amazon and Samsung open inside the store app when it is
//!   installed, and fall back to the store website otherwise
//! - Every other brand uses a fixed URI template
//! - `OtherUri` / `OtherIntent` pass the first configured entry through
//!
//! # Example
//!
//! ```
//! use apprate_core::store::{Destination, StoreTarget, StoreTargetResolver};
//! use apprate_core::traits::InstalledPackages;
//!
//! let inspector = InstalledPackages::new().with("com.android.vending");
//! let resolver = StoreTargetResolver::new(&inspector, "com.example.app");
//!
//! let destination = resolver.resolve(&StoreTarget::GooglePlay);
//! assert!(destination.is_store_app());
//! assert_eq!(destination.uri(), Some("market://details?id=com.example.app"));
//! ```

mod destination;
mod resolver;
mod target;
pub mod uris;

pub use destination::{Destination, TaskFlags};
pub use resolver::StoreTargetResolver;
pub use target::{IntentDescriptor, StoreKind, StoreTarget};
