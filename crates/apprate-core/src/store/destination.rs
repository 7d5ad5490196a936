//! Resolved store destinations.

use serde::{Deserialize, Serialize};

use super::IntentDescriptor;

/// How a store-app launch should be placed relative to the host app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFlags {
    /// Open outside the host app's navigation stack.
    pub new_task: bool,
    /// Drop any screens the store app already had on top of its root.
    pub clear_top: bool,
    /// Re-parent into the store app's own task if needed.
    pub reset_task_if_needed: bool,
}

impl TaskFlags {
    /// Always land on a fresh top-level store screen.
    pub fn clean_top_level() -> Self {
        Self {
            new_task: true,
            clear_top: true,
            reset_task_if_needed: true,
        }
    }
}

/// Where the "rate now" button takes the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Destination {
    /// Deep link opened inside an installed store app.
    StoreApp {
        uri: String,
        package: String,
        flags: TaskFlags,
    },
    /// URI opened by whatever handler the platform picks.
    Uri { uri: String },
    /// Host-supplied launch descriptor, passed through untouched.
    Custom(IntentDescriptor),
}

impl Destination {
    /// Whether this destination targets an installed store app.
    pub fn is_store_app(&self) -> bool {
        matches!(self, Destination::StoreApp { .. })
    }

    /// The URI to open, if this destination has one.
    pub fn uri(&self) -> Option<&str> {
        match self {
            Destination::StoreApp { uri, .. } | Destination::Uri { uri } => Some(uri),
            Destination::Custom(descriptor) => descriptor.data.as_deref(),
        }
    }
}
