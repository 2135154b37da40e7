//! ChatGPT / OpenAI extraction

use recall_core::{DomNode, MessageBatch, RequestInfo, Role, SocketFrame};

use crate::{dom, request};

pub const HOSTNAME_FRAGMENTS: &[&str] = &["chatgpt.com", "chat.openai.com", "openai.com"];

const PATH_MARKERS: &[&str] = &[
    "/backend-api/conversation",
    "/chat/completions",
    "/api/conversation",
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
        .and_then(request::mine_choices_response);
    request::merge(from_body, from_response)
}

/// ChatGPT streams completions over SSE rather than sockets, but some
/// deployments push turns through a realtime channel carrying the same
/// JSON shapes; mine those when they appear.
pub fn extract_from_socket(frame: &SocketFrame) -> Option<MessageBatch> {
    request::mine_request_body(&frame.data)
}

pub fn extract_from_dom(nodes: &[DomNode], min_text_len: usize) -> Option<MessageBatch> {
    dom::scan_with_fallback(nodes, min_text_len, &classify)
}

/// ChatGPT marks each turn with `data-message-author-role`; assistant turns
/// additionally carry an `agent-turn` class on the container.
fn classify(node: &DomNode) -> Option<Role> {
    if let Some(label) = node.attr("data-message-author-role") {
        // Unknown and pseudo-role labels are skipped, not coerced.
        return Role::from_label(label);
    }
    if node.has_class_fragment("agent-turn") {
        return Some(Role::Assistant);
    }
    None
}
