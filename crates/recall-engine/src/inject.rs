//! Context injection
//!
//! Trigger heuristic plus the dual-path mechanics for placing composed
//! context at the start of a chat input. The host environment implements
//! [`InputTarget`] over a real element; the engine only sees the trait.

use recall_core::InputState;

/// Synthetic events dispatched after mutating an input, so the host page's
/// own state (framework-controlled inputs in particular) observes the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticEvent {
    Input,
    Change,
}

/// One concrete input element on the page.
///
/// The in-flight marker lives on the element (an attribute in the real
/// host), so concurrent handling of different inputs never contends.
pub trait InputTarget {
    fn state(&self) -> InputState;
    fn value(&self) -> String;
    fn set_value(&mut self, value: &str);
    fn dispatch(&mut self, event: SyntheticEvent);
    fn injection_pending(&self) -> bool;
    fn set_injection_pending(&mut self, pending: bool);
}

/// Does this input qualify for a context-injection offer?
///
/// All must hold: primary-input shape, visible, focused or just focused,
/// and current text empty or under `short_input_len` characters. This is a
/// heuristic proxy for "user is about to start a message" with no ground
/// truth from the host page; false positives on unrelated short-text fields
/// are possible and accepted.
pub fn qualifies_for_injection(state: &InputState, short_input_len: usize) -> bool {
    state.kind.is_primary()
        && state.visible
        && (state.focused || state.recently_focused)
        && state.text_len < short_input_len
}

/// Place `context` at the very start of the target's content.
///
/// Content-editable regions get the new content plus a synthetic input
/// event; value-bearing inputs get both input and change events. Chat UIs
/// use the two shapes interchangeably, so both paths are required.
pub fn prepend_context(target: &mut dyn InputTarget, context: &str) {
    let existing = target.value();
    let combined = if existing.trim().is_empty() {
        format!("{}\n\n", context)
    } else {
        format!("{}\n\n{}", context, existing)
    };
    target.set_value(&combined);

    if target.state().kind.is_content_editable() {
        target.dispatch(SyntheticEvent::Input);
    } else {
        target.dispatch(SyntheticEvent::Input);
        target.dispatch(SyntheticEvent::Change);
    }
}
