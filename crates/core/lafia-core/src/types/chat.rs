//! Events exchanged with the presentation layer

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Who a bubble belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing
    User,
    /// The assistant
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// Stable handle for a transient "typing" bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderId(Uuid);

impl PlaceholderId {
    /// Fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlaceholderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "typing-{}", self.0.simple())
    }
}

/// Text shown inside a typing placeholder
pub const TYPING_TEXT: &str = "…";

/// Rendering request sent to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// Show a message bubble
    Append {
        /// Bubble owner
        sender: Sender,
        /// Bubble text
        text: String,
        /// Set when the bubble must be removable later
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<PlaceholderId>,
    },
    /// Remove exactly the bubble created with this id
    Remove {
        /// Id given in the matching `Append`
        placeholder: PlaceholderId,
    },
}

impl ChatEvent {
    /// Permanent bubble
    pub fn message(sender: Sender, text: impl Into<String>) -> Self {
        ChatEvent::Append {
            sender,
            text: text.into(),
            placeholder: None,
        }
    }

    /// Bot typing bubble tagged with `id`
    pub fn typing(id: PlaceholderId) -> Self {
        ChatEvent::Append {
            sender: Sender::Bot,
            text: TYPING_TEXT.to_string(),
            placeholder: Some(id),
        }
    }
}
