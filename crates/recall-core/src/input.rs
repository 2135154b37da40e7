use serde::{Deserialize, Serialize};

/// Shape of a chat input element.
///
/// Chat UIs use value-bearing inputs and content-editable regions
/// interchangeably; injection mechanics differ between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    TextArea,
    AriaTextbox,
    ContentEditable,
    Other,
}

impl InputKind {
    /// Whether this shape qualifies as a primary chat input.
    pub fn is_primary(&self) -> bool {
        !matches!(self, InputKind::Other)
    }

    /// Content-editable targets take prepended markup plus a synthetic
    /// input event; value-bearing targets take input and change events.
    pub fn is_content_editable(&self) -> bool {
        matches!(self, InputKind::ContentEditable)
    }
}

/// Observed state of one input element, for the injection trigger heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputState {
    pub kind: InputKind,
    /// Non-zero bounding box.
    pub visible: bool,
    pub focused: bool,
    /// Was focused or clicked just before observation.
    pub recently_focused: bool,
    /// Character count of the current text.
    pub text_len: usize,
}

impl InputState {
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            visible: true,
            focused: false,
            recently_focused: false,
            text_len: 0,
        }
    }
}
