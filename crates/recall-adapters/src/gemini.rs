//! Gemini extraction

use recall_core::{DomNode, MessageBatch, RequestInfo, Role, SocketFrame};

use crate::{dom, request};

pub const HOSTNAME_FRAGMENTS: &[&str] = &["gemini.google.com", "bard.google.com"];

const PATH_MARKERS: &[&str] = &["assistant.lamda", "StreamGenerate", "/generate"];

pub fn is_chat_request(req: &RequestInfo) -> bool {
    let path = req.path();
    PATH_MARKERS.iter().any(|marker| path.contains(marker))
}

/// Gemini's web app sends batched RPC envelopes, not plain JSON; mining only
/// succeeds for the API-style bodies that do carry `messages`/`prompt`.
pub fn extract_from_request(req: &RequestInfo) -> Option<MessageBatch> {
    req.body.as_deref().and_then(request::mine_request_body)
}

pub fn extract_from_socket(_frame: &SocketFrame) -> Option<MessageBatch> {
    None
}

pub fn extract_from_dom(nodes: &[DomNode], min_text_len: usize) -> Option<MessageBatch> {
    dom::scan_with_fallback(nodes, min_text_len, &classify)
}

/// Gemini renders custom elements: `user-query` for the user side,
/// `model-response` / `message-content` for the model side.
fn classify(node: &DomNode) -> Option<Role> {
    match node.tag.as_str() {
        "user-query" => Some(Role::User),
        "model-response" | "message-content" => Some(Role::Assistant),
        _ => {
            if node.has_class_fragment("query-text") {
                Some(Role::User)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_match() {
        assert!(is_chat_request(&RequestInfo::new(
            "POST",
            "https://gemini.google.com/_/BardChatUi/data/assistant.lamda.BardFrontendService/StreamGenerate"
        )));
        assert!(!is_chat_request(&RequestInfo::new(
            "GET",
            "https://gemini.google.com/app"
        )));
    }

    #[test]
    fn test_custom_elements() {
        let nodes = vec![
            DomNode::new("user-query").with_text("what is the weather pattern"),
            DomNode::new("model-response").with_text("here is the forecast summary"),
        ];
        let batch = extract_from_dom(&nodes, 10).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.messages[0].role, Role::User);
        assert_eq!(batch.messages[1].role, Role::Assistant);
    }
}
