use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Conversation turn author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    /// Map a provider-supplied role label onto the closed role set.
    ///
    /// Sites label turns inconsistently ("human", "model", "bot"); all of
    /// those normalize here. Pseudo-roles that come from parsing the host
    /// application's own UI chrome ("memory", "context", "profile") map to
    /// `None` so validation drops them before anything is persisted.
    pub fn from_label(label: &str) -> Option<Role> {
        match label.trim().to_ascii_lowercase().as_str() {
            "user" | "human" => Some(Role::User),
            "assistant" | "ai" | "bot" | "model" => Some(Role::Assistant),
            "system" => Some(Role::System),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// One turn of a conversation.
///
/// Invariant: `content` is never empty or whitespace-only; construction goes
/// through [`Message::sanitized`] or [`Message::new`] which trim it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl Message {
    /// Build a message stamped with the current time, trimming content.
    /// Returns `None` for empty-after-trim content.
    pub fn new(role: Role, content: &str) -> Option<Self> {
        Self::sanitized(role, content, None)
    }

    /// Build a message from raw extraction output.
    ///
    /// The timestamp defaults to extraction time when the source provides
    /// none. Empty-after-trim content yields `None`; the caller drops the
    /// message rather than failing the batch.
    pub fn sanitized(role: Role, content: &str, timestamp: Option<OffsetDateTime>) -> Option<Self> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            role,
            content: trimmed.to_string(),
            timestamp: timestamp.unwrap_or_else(OffsetDateTime::now_utc),
        })
    }

    /// Build from a raw role label, dropping pseudo- and unknown roles.
    pub fn from_labeled(label: &str, content: &str) -> Option<Self> {
        let role = Role::from_label(label)?;
        Self::new(role, content)
    }
}

/// Ordered sequence of messages produced by one extraction event.
///
/// Order is source order (array order of the originating payload or DOM
/// traversal order) and is never re-sorted by timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageBatch {
    pub messages: Vec<Message>,
}

impl MessageBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Wrap in `Some` only when the batch carries at least one message.
    pub fn non_empty(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::from_label("user"), Some(Role::User));
        assert_eq!(Role::from_label("Human"), Some(Role::User));
        assert_eq!(Role::from_label("ASSISTANT"), Some(Role::Assistant));
        assert_eq!(Role::from_label("model"), Some(Role::Assistant));
        assert_eq!(Role::from_label("system"), Some(Role::System));
    }

    #[test]
    fn test_pseudo_roles_dropped() {
        assert_eq!(Role::from_label("memory"), None);
        assert_eq!(Role::from_label("context"), None);
        assert_eq!(Role::from_label("profile"), None);
        assert_eq!(Role::from_label("tool"), None);
    }

    #[test]
    fn test_content_trimmed_and_non_empty() {
        let msg = Message::new(Role::User, "  hello  ").unwrap();
        assert_eq!(msg.content, "hello");

        assert!(Message::new(Role::User, "   ").is_none());
        assert!(Message::new(Role::User, "").is_none());
    }

    #[test]
    fn test_batch_preserves_order() {
        let mut batch = MessageBatch::new();
        batch.push(Message::new(Role::Assistant, "second in time, first in source").unwrap());
        batch.push(Message::new(Role::User, "first in time, second in source").unwrap());

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.messages[0].role, Role::Assistant);
        assert_eq!(batch.messages[1].role, Role::User);
    }
}
