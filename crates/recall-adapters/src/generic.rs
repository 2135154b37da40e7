//! Generic network-only extraction
//!
//! The fallback adapter for hostnames no provider claims. Chat detection is
//! a broad path-keyword sweep; DOM and socket extraction return nothing, so
//! unknown sites get network-only capture.

use recall_core::{DomNode, MessageBatch, RequestInfo, SocketFrame};

use crate::request;

const PATH_KEYWORDS: &[&str] = &[
    "/chat",
    "/completions",
    "/messages",
    "/generate",
    "/ask",
    "/query",
];

pub fn is_chat_request(req: &RequestInfo) -> bool {
    let path = req.path();
    PATH_KEYWORDS.iter().any(|keyword| path.contains(keyword))
}

pub fn extract_from_request(req: &RequestInfo) -> Option<MessageBatch> {
    let from_body = req.body.as_deref().and_then(request::mine_request_body);
    // Many self-hosted UIs speak the OpenAI wire shape.
    let from_response = req
        .response_body
        .as_deref()
        .and_then(request::mine_choices_response);
    request::merge(from_body, from_response)
}

pub fn extract_from_socket(_frame: &SocketFrame) -> Option<MessageBatch> {
    None
}

pub fn extract_from_dom(_nodes: &[DomNode], _min_text_len: usize) -> Option<MessageBatch> {
    None
}
