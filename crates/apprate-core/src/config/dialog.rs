//! Rating dialog presentation options.

use serde::{Deserialize, Serialize};

use crate::traits::ButtonListener;

/// Text given either as a host resource id or as a literal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    /// Host-side resource identifier (localized by the presenter).
    Resource(i32),
    /// Literal text.
    Literal(String),
}

impl From<&str> for TextValue {
    fn from(text: &str) -> Self {
        TextValue::Literal(text.to_string())
    }
}

impl From<String> for TextValue {
    fn from(text: String) -> Self {
        TextValue::Literal(text)
    }
}

impl From<i32> for TextValue {
    fn from(resource_id: i32) -> Self {
        TextValue::Resource(resource_id)
    }
}

/// Everything the presenter needs to draw the prompt.
///
/// `None` texts mean "use the presenter's default wording".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogOptions {
    /// Show the "remind me later" button.
    pub show_later_button: bool,
    /// Show the "no, thanks" button.
    pub show_never_button: bool,
    /// Show the dialog title.
    pub show_title: bool,
    /// Whether the dialog may be dismissed without pressing a button.
    pub cancelable: bool,
    /// Host theme id, 0 for the presenter default.
    pub theme_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TextValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<TextValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_rate_now: Option<TextValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_later: Option<TextValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_never: Option<TextValue>,
    /// Invoked with the button the user pressed.
    #[serde(skip)]
    pub listener: Option<ButtonListener>,
}

impl Default for DialogOptions {
    fn default() -> Self {
        Self {
            show_later_button: true,
            show_never_button: true,
            show_title: true,
            cancelable: false,
            theme_id: 0,
            title: None,
            message: None,
            text_rate_now: None,
            text_later: None,
            text_never: None,
            listener: None,
        }
    }
}
