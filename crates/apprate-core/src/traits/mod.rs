//! Collaborator traits the host application implements.

mod dialog_presenter;
mod package_inspector;
mod preference_store;

pub use dialog_presenter::*;
pub use package_inspector::*;
pub use preference_store::*;
