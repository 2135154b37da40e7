//! Shared JSON payload mining
//!
//! Chat calls across providers converge on two request shapes: a `messages`
//! array of role/content objects, or a single `prompt` string. Content may be
//! a plain string or an array of typed parts. All parsing here is
//! best-effort; malformed payloads yield no messages, never errors.

use recall_core::{Message, MessageBatch, Role};
use serde_json::Value;

/// Mine a request body for a `messages` array or a `prompt` field.
pub fn mine_request_body(body: &str) -> Option<MessageBatch> {
    let value: Value = serde_json::from_str(body).ok()?;

    if let Some(messages) = value.get("messages").and_then(Value::as_array) {
        let mut batch = MessageBatch::new();
        for entry in messages {
            if let Some(message) = mine_message_object(entry) {
                batch.push(message);
            }
        }
        return batch.non_empty();
    }

    if let Some(prompt) = value.get("prompt").and_then(Value::as_str) {
        let mut batch = MessageBatch::new();
        if let Some(message) = Message::new(Role::User, prompt) {
            batch.push(message);
        }
        return batch.non_empty();
    }

    None
}

/// One `{role, content}` object; invalid role labels and empty content are
/// dropped here, not surfaced.
fn mine_message_object(entry: &Value) -> Option<Message> {
    let label = entry.get("role").and_then(Value::as_str)?;
    let content = mine_content(entry.get("content")?)?;
    Message::from_labeled(label, &content)
}

/// Content is either a string or an array of typed parts with `text` fields.
fn mine_content(content: &Value) -> Option<String> {
    match content {
        Value::String(text) => Some(text.clone()),
        Value::Array(parts) => {
            let texts: Vec<&str> = parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect();
            if texts.is_empty() {
                None
            } else {
                Some(texts.join("\n"))
            }
        }
        _ => None,
    }
}

/// OpenAI-shaped completion response: `choices[].message`.
pub fn mine_choices_response(body: &str) -> Option<MessageBatch> {
    let value: Value = serde_json::from_str(body).ok()?;
    let choices = value.get("choices")?.as_array()?;

    let mut batch = MessageBatch::new();
    for choice in choices {
        if let Some(message) = choice.get("message").and_then(mine_message_object) {
            batch.push(message);
        }
    }
    batch.non_empty()
}

/// Claude-shaped response: top-level `content[]` text parts, assistant role.
pub fn mine_content_response(body: &str) -> Option<MessageBatch> {
    let value: Value = serde_json::from_str(body).ok()?;
    let content = value.get("content")?;
    let text = mine_content(content)?;

    let mut batch = MessageBatch::new();
    if let Some(message) = Message::new(Role::Assistant, &text) {
        batch.push(message);
    }
    batch.non_empty()
}

/// Merge an optional response batch after the request batch, keeping source
/// order within each.
pub fn merge(request: Option<MessageBatch>, response: Option<MessageBatch>) -> Option<MessageBatch> {
    match (request, response) {
        (Some(mut req), Some(resp)) => {
            req.messages.extend(resp.messages);
            Some(req)
        }
        (Some(req), None) => Some(req),
        (None, Some(resp)) => Some(resp),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_array() {
        let body = r#"{"model":"gpt-4","messages":[
            {"role":"system","content":"be brief"},
            {"role":"user","content":"hi"},
            {"role":"assistant","content":"hello"}
        ]}"#;
        let batch = mine_request_body(body).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.messages[0].role, Role::System);
        assert_eq!(batch.messages[1].content, "hi");
    }

    #[test]
    fn test_prompt_field() {
        let batch = mine_request_body(r#"{"prompt":"what is rust"}"#).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.messages[0].role, Role::User);
    }

    #[test]
    fn test_typed_content_parts() {
        let body = r#"{"messages":[{"role":"user","content":[
            {"type":"text","text":"part one"},
            {"type":"image","source":{}},
            {"type":"text","text":"part two"}
        ]}]}"#;
        let batch = mine_request_body(body).unwrap();
        assert_eq!(batch.messages[0].content, "part one\npart two");
    }

    #[test]
    fn test_unknown_roles_dropped_not_failed() {
        let body = r#"{"messages":[
            {"role":"memory","content":"stored context"},
            {"role":"user","content":"real turn"}
        ]}"#;
        let batch = mine_request_body(body).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.messages[0].content, "real turn");
    }

    #[test]
    fn test_malformed_json_yields_nothing() {
        assert!(mine_request_body("{not json").is_none());
        assert!(mine_request_body(r#"{"other":"shape"}"#).is_none());
        assert!(mine_choices_response("[1,2,3]").is_none());
    }

    #[test]
    fn test_choices_response() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"the answer"}}]}"#;
        let batch = mine_choices_response(body).unwrap();
        assert_eq!(batch.messages[0].role, Role::Assistant);
        assert_eq!(batch.messages[0].content, "the answer");
    }

    #[test]
    fn test_content_response() {
        let body = r#"{"role":"assistant","content":[{"type":"text","text":"reply"}]}"#;
        let batch = mine_content_response(body).unwrap();
        assert_eq!(batch.messages[0].content, "reply");
    }
}
