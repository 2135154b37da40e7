//! Claude extraction

use recall_core::{DomNode, MessageBatch, RequestInfo, Role, SocketFrame};

use crate::{dom, request};

pub const HOSTNAME_FRAGMENTS: &[&str] = &["claude.ai", "anthropic.com"];

const PATH_MARKERS: &[&str] = &[
    "/completion",
    "/append_message",
    "/chat_conversations",
    "/v1/messages",
];

pub fn is_chat_request(req: &RequestInfo) -> bool {
    let path = req.path();
    PATH_MARKERS.iter().any(|marker| path.contains(marker))
}

pub fn extract_from_request(req: &RequestInfo) -> Option<MessageBatch> {
    let from_body = req.body.as_deref().and_then(request::mine_request_body);
    let from_response = req
        .response_body
        .as_deref()
        .and_then(request::mine_content_response);
    request::merge(from_body, from_response)
}

/// No documented realtime channel; responses stream over SSE.
pub fn extract_from_socket(_frame: &SocketFrame) -> Option<MessageBatch> {
    None
}

pub fn extract_from_dom(nodes: &[DomNode], min_text_len: usize) -> Option<MessageBatch> {
    dom::scan_with_fallback(nodes, min_text_len, &classify)
}

/// claude.ai tags user turns with a `user-message` testid and styles the two
/// sides with `font-user-message` / `font-claude-message` classes.
fn classify(node: &DomNode) -> Option<Role> {
    if let Some(testid) = node.attr("data-testid") {
        if testid.contains("user-message") {
            return Some(Role::User);
        }
    }
    if node.has_class_fragment("font-user-message") {
        return Some(Role::User);
    }
    if node.has_class_fragment("font-claude-message") {
        return Some(Role::Assistant);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_match() {
        assert!(is_chat_request(&RequestInfo::new(
            "POST",
            "https://claude.ai/api/organizations/o1/chat_conversations/c1/completion"
        )));
        assert!(is_chat_request(&RequestInfo::new(
            "POST",
            "https://api.anthropic.com/v1/messages"
        )));
        assert!(!is_chat_request(&RequestInfo::new(
            "GET",
            "https://claude.ai/api/account"
        )));
    }

    #[test]
    fn test_prompt_body() {
        let req = RequestInfo::new("POST", "https://claude.ai/api/x/completion")
            .with_body(r#"{"prompt":"explain borrowing","timezone":"UTC"}"#);
        let batch = extract_from_request(&req).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.messages[0].role, Role::User);
    }

    #[test]
    fn test_dom_classes() {
        let nodes = vec![
            DomNode::new("div")
                .with_class("font-user-message")
                .with_text("a question about lifetimes"),
            DomNode::new("div")
                .with_class("font-claude-message")
                .with_text("an answer about lifetimes"),
        ];
        let batch = extract_from_dom(&nodes, 10).unwrap();
        assert_eq!(batch.messages[0].role, Role::User);
        assert_eq!(batch.messages[1].role, Role::Assistant);
    }

    #[test]
    fn test_fallback_when_selectors_miss() {
        // Layout drifted and provider selectors no longer match, but the
        // generic sweep still recognizes the author-role convention.
        let nodes = vec![
            DomNode::new("div")
                .with_attr("data-message-author-role", "user")
                .with_text("still captured through the fallback"),
        ];
        let batch = extract_from_dom(&nodes, 10).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.messages[0].role, Role::User);
    }
}
