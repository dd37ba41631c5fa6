//! Message types for model requests.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single text message sent to the model.
///
/// # Examples
///
/// ```
/// use rackham_core::{Message, Role};
///
/// let message = Message::user("List the characters.");
/// assert_eq!(message.role, Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// System message carrying a role hint.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// User message carrying the prompt.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
