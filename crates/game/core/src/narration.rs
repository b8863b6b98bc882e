//! Narration produced while intents execute.
//!
//! Actions describe what happened through a [`MessageSink`]; the sink decides
//! how to store or display it.

/// Styling tag attached to a narration line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MessageStyle {
    #[default]
    Normal,
    PlayerAttack,
    EnemyAttack,
    PlayerDeath,
    EnemyDeath,
    HealthRecovered,
    StatusEffect,
    /// A recoverable failure reported back to the player.
    Impossible,
    Descend,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

impl Message {
    pub fn new(text: impl Into<String>, style: MessageStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Accepts narration lines. No structural contract beyond text plus style.
pub trait MessageSink {
    fn add_message(&mut self, text: String, style: MessageStyle);
}

impl MessageSink for Vec<Message> {
    fn add_message(&mut self, text: String, style: MessageStyle) {
        self.push(Message { text, style });
    }
}

impl<S: MessageSink + ?Sized> MessageSink for &mut S {
    fn add_message(&mut self, text: String, style: MessageStyle) {
        (**self).add_message(text, style);
    }
}
