//! Page extraction engine
//!
//! One [`ExtractionEngine`] per page load. The host environment observes the
//! page (fetch interception, socket hooks, a mutation observer) and feeds
//! plain events into `on_request` / `on_socket_frame` / `on_dom_mutation`;
//! qualifying batches are validated, debounced, and handed to the capture
//! sink. The engine also owns the context-injection flow for chat inputs.
//!
//! Channels are isolated: a failure in one extraction step never prevents
//! other channels or later events from working. Cross-channel duplicates are
//! possible (a network batch and a DOM batch for the same turn); the engine
//! does not de-duplicate, downstream storage decides whether to.

pub mod clock;
pub mod inject;
pub mod sinks;

use std::sync::{Arc, Mutex};

use recall_adapters::Adapter;
use recall_config::Config;
use recall_core::{DomNode, Error, InputState, Message, MessageBatch, RequestInfo, Result, Role, SocketFrame};
use recall_redact::{default_rules, Redactor, RuleCategory};
use serde_json::json;
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

pub use clock::{Clock, ManualClock, SystemClock};
pub use inject::{qualifies_for_injection, InputTarget, SyntheticEvent};
pub use sinks::{CaptureRequest, CaptureSink, EngineEvent, EventKind, EventSink, ProfileSource};

const TITLE_MAX_CHARS: usize = 60;

/// Which signal source produced a batch; recorded in telemetry only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Network,
    Socket,
    Dom,
}

impl Channel {
    fn as_str(&self) -> &'static str {
        match self {
            Channel::Network => "network",
            Channel::Socket => "socket",
            Channel::Dom => "dom",
        }
    }
}

pub struct ExtractionEngine {
    site: String,
    adapter: Adapter,
    redactor: Redactor,
    capture_sink: Arc<dyn CaptureSink>,
    profile_source: Arc<dyn ProfileSource>,
    event_sink: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    config: Config,
    /// Completion time of the last successful capture.
    last_capture: Mutex<Option<OffsetDateTime>>,
}

impl ExtractionEngine {
    /// Build the engine for one page. The adapter is resolved from the
    /// hostname here and stays fixed for the page's lifetime.
    pub fn new(
        hostname: &str,
        config: Config,
        capture_sink: Arc<dyn CaptureSink>,
        profile_source: Arc<dyn ProfileSource>,
        event_sink: Arc<dyn EventSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let adapter = Adapter::for_hostname(hostname);
        let redactor = build_redactor(&config);
        Self {
            site: hostname.to_string(),
            adapter,
            redactor,
            capture_sink,
            profile_source,
            event_sink,
            clock,
            config,
            last_capture: Mutex::new(None),
        }
    }

    pub fn adapter(&self) -> Adapter {
        self.adapter
    }

    /// The engine's redactor, for on-demand summaries and memory scrubbing.
    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    /// One observed outbound network call. Returns whether a capture fired.
    pub async fn on_request(&self, request: &RequestInfo) -> Result<bool> {
        let batch = self.adapter.extract_from_request(request);
        self.process(batch, Channel::Network).await
    }

    /// One frame sent on a page-created realtime socket.
    pub async fn on_socket_frame(&self, frame: &SocketFrame) -> Result<bool> {
        let batch = self.adapter.extract_from_socket(frame);
        self.process(batch, Channel::Socket).await
    }

    /// One batch of added DOM nodes from the mutation observer.
    pub async fn on_dom_mutation(&self, nodes: &[DomNode]) -> Result<bool> {
        let batch = self
            .adapter
            .extract_from_dom(nodes, self.config.capture.min_dom_text_len);
        self.process(batch, Channel::Dom).await
    }

    /// Capture decision: filter, debounce, hand off.
    async fn process(&self, batch: Option<MessageBatch>, channel: Channel) -> Result<bool> {
        let Some(batch) = batch else {
            return Ok(false);
        };

        // Messages arrive validated by construction; system turns are never
        // captured.
        let messages: Vec<Message> = batch
            .messages
            .into_iter()
            .filter(|m| m.role != Role::System)
            .collect();
        if messages.is_empty() {
            return Ok(false);
        }

        let now = self.clock.now();
        let window = Duration::milliseconds(self.config.capture.debounce_ms as i64);
        {
            let last = self.last_capture.lock().unwrap();
            if let Some(previous) = *last {
                if now - previous < window {
                    debug!(channel = channel.as_str(), "capture suppressed by debounce");
                    return Ok(false);
                }
            }
        }

        let pii_detected = messages
            .iter()
            .any(|m| self.redactor.summary(&m.content).total_redactions > 0);

        let request = CaptureRequest {
            site: self.site.clone(),
            provider: self.adapter.provider_name().to_string(),
            title: title_from(&messages),
            messages,
            pii_detected,
        };
        let message_count = request.messages.len();

        match self.capture_sink.capture(request).await {
            Ok(()) => {
                *self.last_capture.lock().unwrap() = Some(now);
                self.emit(EngineEvent::new(
                    EventKind::Capture,
                    json!({
                        "site": self.site,
                        "provider": self.adapter.provider_name(),
                        "channel": channel.as_str(),
                        "message_count": message_count,
                    }),
                ))
                .await;
                Ok(true)
            }
            Err(err) => {
                warn!(channel = channel.as_str(), %err, "capture sink rejected batch");
                self.emit(EngineEvent::new(
                    EventKind::Error,
                    json!({ "site": self.site, "detail": err.to_string() }),
                ))
                .await;
                Err(err)
            }
        }
    }

    /// Does this input currently qualify for a context-injection offer?
    pub fn should_offer_injection(&self, state: &InputState) -> bool {
        qualifies_for_injection(state, self.config.injection.short_input_len)
    }

    /// Fetch the profile, compose context text, and prepend it into the
    /// target. Returns whether anything was injected.
    ///
    /// A second attempt on the same input while one is in flight is dropped,
    /// not queued. Collaborator failures surface to the caller; page
    /// observation is unaffected.
    pub async fn inject_context(&self, target: &mut dyn InputTarget) -> Result<bool> {
        if target.injection_pending() {
            debug!("injection already in flight for this input");
            return Ok(false);
        }
        if !self.should_offer_injection(&target.state()) {
            return Ok(false);
        }

        target.set_injection_pending(true);
        let result = self.inject_inner(target).await;
        target.set_injection_pending(false);
        result
    }

    async fn inject_inner(&self, target: &mut dyn InputTarget) -> Result<bool> {
        let profile = self
            .profile_source
            .profile(&self.site, self.adapter.provider_name())
            .await
            .map_err(|err| Error::ProfileSource(err.to_string()))?;

        let Some(context) = profile.compose(
            self.config.injection.min_fact_importance,
            self.config.injection.max_facts,
        ) else {
            return Ok(false);
        };

        inject::prepend_context(target, &context);
        self.emit(EngineEvent::new(
            EventKind::Inject,
            json!({ "site": self.site, "provider": self.adapter.provider_name() }),
        ))
        .await;
        Ok(true)
    }

    /// Telemetry is fire-and-forget; a failing event sink is logged only.
    async fn emit(&self, event: EngineEvent) {
        if let Err(err) = self.event_sink.send(event).await {
            warn!(%err, "event sink failure ignored");
        }
    }
}

/// Build the redactor from config: toggle the noisy rules, append custom
/// patterns last.
fn build_redactor(config: &Config) -> Redactor {
    let mut rules = default_rules();
    for rule in &mut rules {
        match rule.category {
            RuleCategory::FullName => rule.enabled = config.redaction.redact_names,
            RuleCategory::Address => rule.enabled = config.redaction.redact_addresses,
            _ => {}
        }
    }
    let mut redactor = Redactor::from_rules(rules);
    for pattern in &config.redaction.custom_patterns {
        redactor.add_custom_pattern(pattern);
    }
    redactor
}

/// Conversation title: the first user turn, truncated.
fn title_from(messages: &[Message]) -> Option<String> {
    messages
        .iter()
        .find(|m| m.role == Role::User)
        .map(|m| truncate_chars(&m.content, TITLE_MAX_CHARS))
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head.trim_end())
    }
}
