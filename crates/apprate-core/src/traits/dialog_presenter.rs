//! Dialog presenter trait and button callback types.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::DialogOptions;
use crate::store::Destination;

/// The three buttons of the rating prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DialogButton {
    /// "Rate now".
    Positive,
    /// "Remind me later".
    Neutral,
    /// "No, thanks".
    Negative,
}

/// Callback invoked when the user presses a dialog button.
#[derive(Clone)]
pub struct ButtonListener(Arc<dyn Fn(DialogButton) + Send + Sync>);

impl ButtonListener {
    /// Wrap a closure as a listener.
    pub fn new(f: impl Fn(DialogButton) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invoke the listener.
    pub fn call(&self, button: DialogButton) {
        (self.0)(button)
    }
}

impl fmt::Debug for ButtonListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ButtonListener(..)")
    }
}

/// A dialog that was built and is ready to be displayed.
#[cfg_attr(test, mockall::automock)]
pub trait PresentedDialog {
    /// Put the dialog on screen.
    fn show(&mut self);
}

/// Renders the rating prompt.
#[cfg_attr(test, mockall::automock)]
pub trait DialogPresenter: Send + Sync {
    /// Build a dialog for `destination`.
    ///
    /// Returns `None` when no dialog can be produced, for example because the
    /// host window is already closing.
    fn present(
        &self,
        destination: &Destination,
        options: &DialogOptions,
    ) -> Option<Box<dyn PresentedDialog>>;
}
