//! Observed page signals
//!
//! The engine never touches browser globals. The host environment observes
//! the page (patched fetch, socket hooks, a mutation observer) and hands the
//! engine plain data: requests, socket frames, and snapshots of added DOM
//! subtrees. Everything here is testable without a browser.

use serde::{Deserialize, Serialize};

/// One outbound network call observed on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestInfo {
    pub url: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
}

impl RequestInfo {
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            url: url.to_string(),
            method: method.to_string(),
            body: None,
            response_body: None,
        }
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn with_response_body(mut self, body: &str) -> Self {
        self.response_body = Some(body.to_string());
        self
    }

    /// Path-and-query portion of the URL, for keyword matching.
    pub fn path(&self) -> &str {
        let rest = self
            .url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.url);
        match rest.find('/') {
            Some(idx) => &rest[idx..],
            None => "/",
        }
    }
}

/// One frame sent on a page-created realtime socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocketFrame {
    pub url: String,
    pub data: String,
}

impl SocketFrame {
    pub fn new(url: &str, data: &str) -> Self {
        Self {
            url: url.to_string(),
            data: data.to_string(),
        }
    }
}

/// Snapshot of one DOM element in an added subtree.
///
/// A deliberately small model: tag, attributes, classes, direct text, and
/// children in document order. Depth-first traversal of a `DomNode` tree
/// matches document traversal order, which is what batch ordering relies on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomNode {
    pub tag: String,
    #[serde(default)]
    pub attrs: Vec<(String, String)>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub children: Vec<DomNode>,
}

impl DomNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_child(mut self, child: DomNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// True when any class name contains the given fragment.
    pub fn has_class_fragment(&self, fragment: &str) -> bool {
        self.classes.iter().any(|c| c.contains(fragment))
    }

    /// Concatenated text of this node and all descendants, document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        if !self.text.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&self.text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}
