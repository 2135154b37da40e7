//! Collaborator contracts
//!
//! The engine has no persisted state of its own; everything it produces
//! leaves through these traits and everything it injects arrives through
//! them. Implementations live outside this crate (extension messaging, HTTP
//! clients, test doubles).

use async_trait::async_trait;
use recall_core::{ContextProfile, Message, Result};
use serde::{Deserialize, Serialize};

/// One successful capture event handed to the storage collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub site: String,
    pub provider: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Set when the redaction summary found sensitive content in any
    /// message; downstream decides whether to scrub before sharing.
    #[serde(default)]
    pub pii_detected: bool,
}

/// Telemetry record, fire-and-forget from the engine's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineEvent {
    pub id: uuid::Uuid,
    pub kind: EventKind,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Capture,
    Inject,
    Error,
}

impl EngineEvent {
    pub fn new(kind: EventKind, payload: serde_json::Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            kind,
            payload,
        }
    }
}

/// Accepts validated, non-empty message batches.
#[async_trait]
pub trait CaptureSink: Send + Sync {
    async fn capture(&self, request: CaptureRequest) -> Result<()>;
}

/// Serves the context profile used to compose injection text.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn profile(&self, site: &str, provider: &str) -> Result<ContextProfile>;
}

/// Telemetry sink; failures here are logged by the engine, never escalated.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn send(&self, event: EngineEvent) -> Result<()>;
}
