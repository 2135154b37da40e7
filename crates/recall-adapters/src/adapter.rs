//! Adapter selection and dispatch

use recall_core::{DomNode, MessageBatch, RequestInfo, SocketFrame};

use crate::{claude, gemini, generic, openai};

/// Closed set of per-provider extraction strategies.
///
/// One adapter is selected per page load by hostname and stays fixed for the
/// page's lifetime. Every variant implements the same four operations;
/// unknown hostnames get [`Adapter::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adapter {
    OpenAi,
    Claude,
    Gemini,
    Generic,
}

impl Adapter {
    /// Resolve the adapter for a page hostname. Pure; fixed priority order.
    pub fn for_hostname(hostname: &str) -> Adapter {
        let hostname = hostname.to_ascii_lowercase();
        let table: &[(&[&str], Adapter)] = &[
            (openai::HOSTNAME_FRAGMENTS, Adapter::OpenAi),
            (claude::HOSTNAME_FRAGMENTS, Adapter::Claude),
            (gemini::HOSTNAME_FRAGMENTS, Adapter::Gemini),
        ];
        for (fragments, adapter) in table {
            if fragments.iter().any(|f| hostname.contains(f)) {
                return *adapter;
            }
        }
        Adapter::Generic
    }

    pub fn provider_name(&self) -> &'static str {
        match self {
            Adapter::OpenAi => "openai",
            Adapter::Claude => "claude",
            Adapter::Gemini => "gemini",
            Adapter::Generic => "generic",
        }
    }

    /// Does this outbound request look like a chat call for this provider?
    pub fn is_chat_request(&self, req: &RequestInfo) -> bool {
        match self {
            Adapter::OpenAi => openai::is_chat_request(req),
            Adapter::Claude => claude::is_chat_request(req),
            Adapter::Gemini => gemini::is_chat_request(req),
            Adapter::Generic => generic::is_chat_request(req),
        }
    }

    /// Mine a matching chat request (and its response, where useful) for
    /// messages. Non-matching requests yield nothing.
    pub fn extract_from_request(&self, req: &RequestInfo) -> Option<MessageBatch> {
        if !self.is_chat_request(req) {
            return None;
        }
        match self {
            Adapter::OpenAi => openai::extract_from_request(req),
            Adapter::Claude => claude::extract_from_request(req),
            Adapter::Gemini => gemini::extract_from_request(req),
            Adapter::Generic => generic::extract_from_request(req),
        }
    }

    /// Best-effort socket-frame mining; most adapters return nothing here.
    pub fn extract_from_socket(&self, frame: &SocketFrame) -> Option<MessageBatch> {
        match self {
            Adapter::OpenAi => openai::extract_from_socket(frame),
            Adapter::Claude => claude::extract_from_socket(frame),
            Adapter::Gemini => gemini::extract_from_socket(frame),
            Adapter::Generic => generic::extract_from_socket(frame),
        }
    }

    /// Scan added DOM subtrees for message containers.
    pub fn extract_from_dom(&self, nodes: &[DomNode], min_text_len: usize) -> Option<MessageBatch> {
        match self {
            Adapter::OpenAi => openai::extract_from_dom(nodes, min_text_len),
            Adapter::Claude => claude::extract_from_dom(nodes, min_text_len),
            Adapter::Gemini => gemini::extract_from_dom(nodes, min_text_len),
            Adapter::Generic => generic::extract_from_dom(nodes, min_text_len),
        }
    }
}
