//! PII detection and redaction
//!
//! Given arbitrary text, produce a redacted copy safe for sharing plus a
//! structured summary of what was found. Redaction is a sequential,
//! order-dependent pass: enabled built-in rules in list order, then the
//! always-on heuristics, then caller-supplied custom patterns, each step
//! operating on the previous step's output. A value replaced by an earlier
//! rule is never re-matched by a later one.

pub mod rules;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use rules::{default_rules, RedactionRule, RuleCategory};

const API_KEY_TOKEN: &str = "[API_KEY_REDACTED]";
const PASSWORD_TOKEN: &str = "[PASSWORD_REDACTED]";
const CUSTOM_TOKEN: &str = "[CUSTOM_REDACTED]";

lazy_static! {
    /// Long alphanumeric tokens worth testing for API-key shapes.
    static ref KEY_CANDIDATE: Regex = Regex::new(r"[A-Za-z0-9_\-]{20,}").unwrap();
    /// Known key shapes: fixed-length hex runs, long alnum runs, vendor prefix.
    static ref KEY_SHAPES: Vec<Regex> = vec![
        Regex::new(r"^sk-[A-Za-z0-9_\-]{16,}$").unwrap(),
        Regex::new(r"^[a-fA-F0-9]{32}$").unwrap(),
        Regex::new(r"^[a-fA-F0-9]{40}$").unwrap(),
        Regex::new(r"^[a-fA-F0-9]{64}$").unwrap(),
        Regex::new(r"^[A-Za-z0-9]{32,45}$").unwrap(),
    ];
    /// `password: hunter2` style key-values; the value is replaced.
    static ref PASSWORD_KV: Regex =
        Regex::new(r"(?i)\b(password|passwd)(\s*:\s*)(\S+)").unwrap();
    static ref TOKEN_KV: Regex =
        Regex::new(r"(?i)\b(token|secret|api[_-]?key)(\s*:\s*)(\S+)").unwrap();
    /// Secret-bearing URL query parameters; only the value is redacted.
    static ref URL_SECRET: Regex =
        Regex::new(r"(?i)([?&](?:key|token|password|secret|api[_-]?key)=)([^&\s]+)").unwrap();
}

/// Per-category view over one text value, recomputed on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactionSummary {
    pub has_email: bool,
    pub has_phone: bool,
    pub has_ssn: bool,
    pub has_credit_card: bool,
    pub has_api_key: bool,
    pub has_password: bool,
    pub total_redactions: usize,
}

/// Rule-based text scanner.
///
/// Built-in rules are loaded once at construction; custom patterns may be
/// added for the lifetime of the instance and always run last. Detection is
/// pure and never fails for well-formed input.
pub struct Redactor {
    rules: Vec<(RuleCategory, Regex)>,
    custom: Vec<Regex>,
}

impl Redactor {
    pub fn new() -> Self {
        Self::from_rules(rules::default_rules())
    }

    /// Compile a rule set, keeping enabled rules in list order. A rule whose
    /// pattern fails to compile is skipped with a warning, never an error.
    pub fn from_rules(rule_set: Vec<RedactionRule>) -> Self {
        let mut rules = Vec::new();
        for rule in rule_set {
            if !rule.enabled {
                continue;
            }
            match Regex::new(&rule.pattern) {
                Ok(regex) => rules.push((rule.category, regex)),
                Err(err) => {
                    warn!(category = ?rule.category, %err, "skipping invalid redaction rule");
                }
            }
        }
        Self {
            rules,
            custom: Vec::new(),
        }
    }

    /// Add a caller-supplied pattern, compiled case-insensitively and applied
    /// after every built-in step. Invalid patterns are skipped with a warning.
    pub fn add_custom_pattern(&mut self, pattern: &str) {
        match Regex::new(&format!("(?i){}", pattern)) {
            Ok(regex) => self.custom.push(regex),
            Err(err) => {
                warn!(pattern, %err, "skipping invalid custom redaction pattern");
            }
        }
    }

    /// Produce the redacted copy of `content`.
    pub fn redact(&self, content: &str) -> String {
        let mut text = content.to_string();

        for (category, regex) in &self.rules {
            text = regex.replace_all(&text, category.placeholder()).into_owned();
        }

        text = self.redact_key_shapes(&text);
        text = PASSWORD_KV
            .replace_all(&text, format!("$1$2{}", PASSWORD_TOKEN))
            .into_owned();
        text = TOKEN_KV
            .replace_all(&text, format!("$1$2{}", API_KEY_TOKEN))
            .into_owned();
        text = URL_SECRET
            .replace_all(&text, format!("$1{}", API_KEY_TOKEN))
            .into_owned();

        for regex in &self.custom {
            text = regex.replace_all(&text, CUSTOM_TOKEN).into_owned();
        }

        text
    }

    /// Missing input scans to nothing.
    pub fn redact_opt(&self, content: Option<&str>) -> String {
        match content {
            Some(text) => self.redact(text),
            None => String::new(),
        }
    }

    /// The single choke point for stored free text.
    ///
    /// `pii == false` means the caller has asserted the text is not
    /// sensitive; it passes through unchanged. Otherwise the full pass runs.
    pub fn redact_memory_content(&self, content: &str, pii: bool) -> String {
        if pii {
            self.redact(content)
        } else {
            content.to_string()
        }
    }

    /// Re-run redaction and report which category placeholders appear, plus
    /// the total number of placeholder tokens inserted.
    pub fn summary(&self, content: &str) -> RedactionSummary {
        let redacted = self.redact(content);
        let count = |token: &str| redacted.matches(token).count();

        let total_redactions = [
            RuleCategory::Email.placeholder(),
            RuleCategory::Phone.placeholder(),
            RuleCategory::Ssn.placeholder(),
            RuleCategory::CreditCard.placeholder(),
            RuleCategory::FullName.placeholder(),
            RuleCategory::Address.placeholder(),
            API_KEY_TOKEN,
            PASSWORD_TOKEN,
            CUSTOM_TOKEN,
        ]
        .into_iter()
        .map(&count)
        .sum();

        RedactionSummary {
            has_email: count(RuleCategory::Email.placeholder()) > 0,
            has_phone: count(RuleCategory::Phone.placeholder()) > 0,
            has_ssn: count(RuleCategory::Ssn.placeholder()) > 0,
            has_credit_card: count(RuleCategory::CreditCard.placeholder()) > 0,
            has_api_key: count(API_KEY_TOKEN) > 0,
            has_password: count(PASSWORD_TOKEN) > 0,
            total_redactions,
        }
    }

    /// Long tokens matching a known key shape become the API-key token;
    /// everything else passes through untouched.
    fn redact_key_shapes(&self, text: &str) -> String {
        KEY_CANDIDATE
            .replace_all(text, |caps: &regex::Captures| {
                let candidate = &caps[0];
                if KEY_SHAPES.iter().any(|shape| shape.is_match(candidate)) {
                    API_KEY_TOKEN.to_string()
                } else {
                    candidate.to_string()
                }
            })
            .into_owned()
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_and_phone() {
        let redactor = Redactor::new();
        let out = redactor.redact("Contact me at a@b.com or 555-123-4567");
        assert!(out.contains("[EMAIL_REDACTED]"));
        assert!(out.contains("[PHONE_REDACTED]"));
        assert!(!out.contains("a@b.com"));
        assert!(!out.contains("555-123-4567"));
    }

    #[test]
    fn test_ssn_and_card() {
        let redactor = Redactor::new();
        let out = redactor.redact("ssn 123-45-6789 card 4111 1111 1111 1111");
        assert!(out.contains("[SSN_REDACTED]"));
        assert!(out.contains("[CARD_REDACTED]"));
    }

    #[test]
    fn test_name_and_address_disabled_by_default() {
        let redactor = Redactor::new();
        let out = redactor.redact("I met Jane Porter at 42 Elm Street yesterday");
        assert!(out.contains("Jane Porter"));
        assert!(out.contains("42 Elm Street"));
    }

    #[test]
    fn test_api_key_shapes() {
        let redactor = Redactor::new();

        let out = redactor.redact("key is sk-proj1234567890abcdefgh set");
        assert!(out.contains("[API_KEY_REDACTED]"), "{out}");

        let out = redactor.redact("hash 0123456789abcdef0123456789abcdef here");
        assert!(out.contains("[API_KEY_REDACTED]"), "{out}");

        // Long but not key-shaped text survives.
        let out = redactor.redact("the-quick-brown-fox-jumps");
        assert!(!out.contains("[API_KEY_REDACTED]"), "{out}");
    }

    #[test]
    fn test_password_kv() {
        let redactor = Redactor::new();
        let out = redactor.redact("Password: hunter2 and token: abc123");
        assert!(out.contains("Password: [PASSWORD_REDACTED]"), "{out}");
        assert!(out.contains("token: [API_KEY_REDACTED]"), "{out}");
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn test_url_value_only() {
        let redactor = Redactor::new();
        let out = redactor.redact("see https://api.example.com/v1/data?key=supersecretvalue&page=2");
        assert!(out.contains("https://api.example.com/v1/data?key=[API_KEY_REDACTED]&page=2"), "{out}");
    }

    #[test]
    fn test_custom_pattern() {
        let mut redactor = Redactor::new();
        redactor.add_custom_pattern(r"PROJ-\d{4}");
        let out = redactor.redact("ticket proj-1234 is private");
        assert!(out.contains("[CUSTOM_REDACTED]"), "{out}");
    }

    #[test]
    fn test_invalid_custom_pattern_skipped() {
        let mut redactor = Redactor::new();
        redactor.add_custom_pattern(r"[unclosed");
        let out = redactor.redact("still works fine");
        assert_eq!(out, "still works fine");
    }

    #[test]
    fn test_memory_content_identity_when_not_pii() {
        let redactor = Redactor::new();
        let text = "mail me at a@b.com";
        assert_eq!(redactor.redact_memory_content(text, false), text);
        assert!(
            redactor
                .redact_memory_content(text, true)
                .contains("[EMAIL_REDACTED]")
        );
    }

    #[test]
    fn test_redaction_idempotent() {
        let redactor = Redactor::new();
        let text = "a@b.com, 555-123-4567, 123-45-6789, password: hunter2, \
                    https://x.io?token=abcd1234abcd1234abcd1234abcd1234";
        let once = redactor.redact(text);
        let twice = redactor.redact(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_input_scans_to_empty() {
        let redactor = Redactor::new();
        assert_eq!(redactor.redact_opt(None), "");
        assert_eq!(redactor.redact_opt(Some("plain")), "plain");
    }

    #[test]
    fn test_summary_counts() {
        let redactor = Redactor::new();
        let summary = redactor.summary("reach a@b.com, ssn is 123-45-6789");
        assert!(summary.has_email);
        assert!(summary.has_ssn);
        assert!(!summary.has_phone);
        assert_eq!(summary.total_redactions, 2);
    }

    #[test]
    fn test_summary_clean_text() {
        let redactor = Redactor::new();
        let summary = redactor.summary("nothing sensitive in here");
        assert_eq!(summary.total_redactions, 0);
        assert!(!summary.has_email);
    }
}
