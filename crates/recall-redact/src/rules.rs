//! Redaction rule data
//!
//! Rules are configuration, not code: a rule set is an ordered list of
//! independent `(category, pattern, enabled)` entries that can be serialized,
//! versioned, and extended without touching engine logic. Later rules see
//! already-redacted text, so list order is part of the contract.

use serde::{Deserialize, Serialize};

/// Sensitive-data categories covered by the built-in rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Email,
    Phone,
    Ssn,
    CreditCard,
    FullName,
    Address,
}

impl RuleCategory {
    /// Placeholder token inserted for every match of this category.
    ///
    /// No placeholder is itself matched by any rule or heuristic pattern;
    /// that keeps redaction idempotent.
    pub fn placeholder(&self) -> &'static str {
        match self {
            RuleCategory::Email => "[EMAIL_REDACTED]",
            RuleCategory::Phone => "[PHONE_REDACTED]",
            RuleCategory::Ssn => "[SSN_REDACTED]",
            RuleCategory::CreditCard => "[CARD_REDACTED]",
            RuleCategory::FullName => "[NAME_REDACTED]",
            RuleCategory::Address => "[ADDRESS_REDACTED]",
        }
    }
}

/// One independently toggle-able redaction rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionRule {
    pub category: RuleCategory,
    pub pattern: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl RedactionRule {
    pub fn new(category: RuleCategory, pattern: &str, enabled: bool) -> Self {
        Self {
            category,
            pattern: pattern.to_string(),
            enabled,
        }
    }
}

/// The default rule set, in application order.
///
/// FullName and Address ship disabled: two capitalized words and
/// street-address shapes are far too common in ordinary prose.
pub fn default_rules() -> Vec<RedactionRule> {
    vec![
        RedactionRule::new(
            RuleCategory::Email,
            r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
            true,
        ),
        RedactionRule::new(
            RuleCategory::Phone,
            r"\(?\b\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b",
            true,
        ),
        RedactionRule::new(RuleCategory::Ssn, r"\b\d{3}-?\d{2}-?\d{4}\b", true),
        RedactionRule::new(
            RuleCategory::CreditCard,
            r"\b(?:\d{4}[-\s]?){3}\d{4}\b",
            true,
        ),
        RedactionRule::new(RuleCategory::FullName, r"\b[A-Z][a-z]+ [A-Z][a-z]+\b", false),
        RedactionRule::new(
            RuleCategory::Address,
            r"\b\d{1,5} (?:[A-Z][a-z]+ )+(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr|Court|Ct|Way)\b",
            false,
        ),
    ]
}
