//! Terminal dialog presenter.

use apprate_core::{Destination, DialogButton, DialogOptions, DialogPresenter, PresentedDialog, TextValue};

const DEFAULT_TITLE: &str = "Rate this app";
const DEFAULT_MESSAGE: &str =
    "If you enjoy using this app, would you mind taking a moment to rate it? Thanks for your support!";
const DEFAULT_RATE_NOW: &str = "Rate it now";
const DEFAULT_LATER: &str = "Remind me later";
const DEFAULT_NEVER: &str = "No, thanks";

/// Prints the prompt to stdout and optionally simulates a button press.
pub struct ConsolePresenter {
    answer: Option<DialogButton>,
}

impl ConsolePresenter {
    pub fn new(answer: Option<DialogButton>) -> Self {
        Self { answer }
    }
}

impl DialogPresenter for ConsolePresenter {
    fn present(
        &self,
        destination: &Destination,
        options: &DialogOptions,
    ) -> Option<Box<dyn PresentedDialog>> {
        Some(Box::new(ConsoleDialog {
            destination: destination.clone(),
            options: options.clone(),
            answer: self.answer,
        }))
    }
}

struct ConsoleDialog {
    destination: Destination,
    options: DialogOptions,
    answer: Option<DialogButton>,
}

impl ConsoleDialog {
    fn buttons(&self) -> Vec<(DialogButton, String)> {
        let mut buttons = vec![(
            DialogButton::Positive,
            text(&self.options.text_rate_now, DEFAULT_RATE_NOW),
        )];
        if self.options.show_later_button {
            buttons.push((DialogButton::Neutral, text(&self.options.text_later, DEFAULT_LATER)));
        }
        if self.options.show_never_button {
            buttons.push((DialogButton::Negative, text(&self.options.text_never, DEFAULT_NEVER)));
        }
        buttons
    }
}

impl PresentedDialog for ConsoleDialog {
    fn show(&mut self) {
        println!();
        if self.options.show_title {
            println!("  {}", text(&self.options.title, DEFAULT_TITLE));
            println!();
        }
        println!("  {}", text(&self.options.message, DEFAULT_MESSAGE));
        println!();

        let buttons = self.buttons();
        for (button, label) in &buttons {
            println!("    [{}] {}", button, label);
        }
        println!();

        let Some(answer) = self.answer else {
            return;
        };
        if !buttons.iter().any(|(button, _)| *button == answer) {
            tracing::warn!(%answer, "Button is hidden in this dialog, ignoring answer");
            return;
        }

        println!("  > {}", answer);
        if answer == DialogButton::Positive {
            match self.destination.uri() {
                Some(uri) => println!("  Opening {}", uri),
                None => println!("  Opening {:?}", self.destination),
            }
        }
        if let Some(listener) = &self.options.listener {
            listener.call(answer);
        }
    }
}

fn text(value: &Option<TextValue>, default: &str) -> String {
    match value {
        Some(TextValue::Literal(text)) => text.clone(),
        Some(TextValue::Resource(id)) => format!("@string/{}", id),
        None => default.to_string(),
    }
}
