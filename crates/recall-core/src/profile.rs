use serde::{Deserialize, Serialize};

/// Facts below this importance are never injected.
pub const DEFAULT_MIN_FACT_IMPORTANCE: u8 = 7;
/// At most this many facts go into one injection.
pub const DEFAULT_MAX_FACTS: usize = 3;

/// One remembered fact about the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
    pub content: String,
    pub importance: u8,
    #[serde(default)]
    pub pii: bool,
}

/// Context profile fetched from the storage collaborator for one site.
///
/// `facts` arrive already importance-sorted upstream; composition takes them
/// in the order provided.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub facts: Vec<Fact>,
}

impl ContextProfile {
    /// Compose the injection text for this profile.
    ///
    /// Returns `None` when there is neither a system prompt nor any fact
    /// clearing the importance threshold. Otherwise: a bracketed
    /// system-prompt line, then a bracketed "Key facts" line with at most
    /// `max_facts` qualifying facts joined by "; ".
    pub fn compose(&self, min_importance: u8, max_facts: usize) -> Option<String> {
        let mut parts = Vec::new();

        if let Some(prompt) = &self.system_prompt {
            let prompt = prompt.trim();
            if !prompt.is_empty() {
                parts.push(format!("[Context: {}]", prompt));
            }
        }

        let selected: Vec<&str> = self
            .facts
            .iter()
            .filter(|f| f.importance >= min_importance)
            .take(max_facts)
            .map(|f| f.content.as_str())
            .collect();
        if !selected.is_empty() {
            parts.push(format!("[Key facts: {}]", selected.join("; ")));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n").trim().to_string())
        }
    }
}
