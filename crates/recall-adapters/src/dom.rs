//! DOM message scanning
//!
//! Providers render conversation turns in wildly different markup; each
//! adapter supplies a per-node classifier and shares the walker here. The
//! walker visits an added subtree depth-first so batch order matches
//! document traversal order. When a node classifies as a message container
//! its descendants are not visited again, so nested markup yields one
//! message, not one per wrapper.

use recall_core::{DomNode, Message, MessageBatch, Role};

/// Classifies a single node as a message container, or passes.
pub type Classifier = dyn Fn(&DomNode) -> Option<Role>;

/// Walk added subtrees and collect messages via the given classifier.
///
/// Text shorter than `min_text_len` characters is skipped; tiny fragments
/// are almost always UI chrome, not conversation turns.
pub fn collect_messages(
    nodes: &[DomNode],
    min_text_len: usize,
    classify: &Classifier,
) -> MessageBatch {
    let mut batch = MessageBatch::new();
    for node in nodes {
        walk(node, min_text_len, classify, &mut batch);
    }
    batch
}

fn walk(node: &DomNode, min_text_len: usize, classify: &Classifier, batch: &mut MessageBatch) {
    if let Some(role) = classify(node) {
        let text = node.text_content();
        if text.chars().count() >= min_text_len {
            if let Some(message) = Message::new(role, &text) {
                batch.push(message);
            }
        }
        return;
    }
    for child in &node.children {
        walk(child, min_text_len, classify, batch);
    }
}

/// Broad selector sweep shared across adapters.
///
/// Runs when a provider's own selectors find nothing, so unknown or updated
/// site layouts still yield partial capture. Covers the common conventions:
/// `data-message-author-role`, `role="listitem"` entries, and generic
/// "message"-class containers. Containers with no user-ish cue classify as
/// assistant; sites consistently mark the user side and leave replies bare.
pub fn generic_classifier(node: &DomNode) -> Option<Role> {
    if let Some(label) = node.attr("data-message-author-role") {
        // Pseudo-roles from the host application's own UI ("memory",
        // "context", "profile") map to None and the element is skipped,
        // never persisted as a turn.
        return Role::from_label(label);
    }

    let listitem = node.attr("role").is_some_and(|r| r == "listitem");
    let message_class = node.has_class_fragment("message") || node.has_class_fragment("chat-turn");
    if listitem || message_class {
        return Some(if has_user_cue(node) {
            Role::User
        } else {
            Role::Assistant
        });
    }

    None
}

fn has_user_cue(node: &DomNode) -> bool {
    node.has_class_fragment("user")
        || node.has_class_fragment("human")
        || node
            .attrs
            .iter()
            .any(|(_, v)| v.eq_ignore_ascii_case("user") || v.eq_ignore_ascii_case("human"))
}

/// Provider scan with generic fallback: try the adapter's own classifier
/// first; when it finds nothing, re-sweep with the generic one.
pub fn scan_with_fallback(
    nodes: &[DomNode],
    min_text_len: usize,
    classify: &Classifier,
) -> Option<MessageBatch> {
    let batch = collect_messages(nodes, min_text_len, classify);
    if !batch.is_empty() {
        return Some(batch);
    }
    collect_messages(nodes, min_text_len, &generic_classifier).non_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_length_threshold() {
        let nodes = vec![
            DomNode::new("div")
                .with_attr("data-message-author-role", "user")
                .with_text("hi"),
            DomNode::new("div")
                .with_attr("data-message-author-role", "user")
                .with_text("a question long enough to count"),
        ];
        let batch = collect_messages(&nodes, 10, &generic_classifier);
        assert_eq!(batch.len(), 1);
        assert!(batch.messages[0].content.starts_with("a question"));
    }

    #[test]
    fn test_container_swallows_descendants() {
        let nodes = vec![
            DomNode::new("div")
                .with_attr("data-message-author-role", "assistant")
                .with_child(DomNode::new("p").with_text("first paragraph of the reply"))
                .with_child(DomNode::new("p").with_text("second paragraph of the reply")),
        ];
        let batch = collect_messages(&nodes, 10, &generic_classifier);
        assert_eq!(batch.len(), 1);
        assert!(batch.messages[0].content.contains("first paragraph"));
        assert!(batch.messages[0].content.contains("second paragraph"));
    }

    #[test]
    fn test_listitem_user_cue() {
        let nodes = vec![
            DomNode::new("li")
                .with_attr("role", "listitem")
                .with_class("from-user")
                .with_text("this is something the user typed"),
            DomNode::new("li")
                .with_attr("role", "listitem")
                .with_text("this is something the model replied"),
        ];
        let batch = collect_messages(&nodes, 10, &generic_classifier);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.messages[0].role, Role::User);
        assert_eq!(batch.messages[1].role, Role::Assistant);
    }

    #[test]
    fn test_pseudo_role_elements_skipped() {
        // The host application's own UI chrome labels itself with
        // pseudo-roles; those elements must never become turns.
        let nodes = vec![
            DomNode::new("div")
                .with_attr("data-message-author-role", "memory")
                .with_text("stored context rendered by our own panel"),
            DomNode::new("div")
                .with_attr("data-message-author-role", "profile")
                .with_text("profile summary rendered by our own panel"),
            DomNode::new("div")
                .with_attr("data-message-author-role", "user")
                .with_text("an actual conversation turn"),
        ];
        let batch = collect_messages(&nodes, 10, &generic_classifier);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.messages[0].role, Role::User);
        assert_eq!(batch.messages[0].content, "an actual conversation turn");
    }

    #[test]
    fn test_document_order_preserved() {
        let nodes = vec![
            DomNode::new("div")
                .with_child(
                    DomNode::new("div")
                        .with_class("message user")
                        .with_text("the user turn comes first"),
                )
                .with_child(
                    DomNode::new("div")
                        .with_class("message")
                        .with_text("the assistant turn comes second"),
                ),
        ];
        let batch = collect_messages(&nodes, 10, &generic_classifier);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.messages[0].role, Role::User);
        assert_eq!(batch.messages[1].role, Role::Assistant);
    }
}
