use poise::serenity_prelude::{ButtonStyle, CreateButton, CreateMessage};

use crate::hat::{Button, ButtonAction, Verdict, WordAction};

pub trait AddButton: Sized {
    fn add_button(self, button: CreateButton) -> Self;

    fn add_buttons(mut self, buttons: impl IntoIterator<Item = CreateButton>) -> Self {
        for button in buttons {
            self = self.add_button(button);
        }

        self
    }
}

impl AddButton for CreateMessage {
    fn add_button(self, button: CreateButton) -> Self {
        self.button(button)
    }
}

pub const fn style(action: ButtonAction) -> ButtonStyle {
    match action {
        ButtonAction::Start(_) => ButtonStyle::Primary,
        ButtonAction::Word(WordAction {
            verdict: Verdict::Correct,
            ..
        }) => ButtonStyle::Success,
        ButtonAction::Word(WordAction {
            verdict: Verdict::Discard,
            ..
        }) => ButtonStyle::Danger,
    }
}

impl From<&Button> for CreateButton {
    fn from(button: &Button) -> Self {
        Self::new(button.custom_id())
            .label(button.label)
            .style(style(button.action))
    }
}
