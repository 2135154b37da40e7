//! Core domain models for recall
//!
//! This crate contains:
//! - Message models (Role, Message, MessageBatch)
//! - Context profile models and injection-text composition
//! - The observed page model (requests, socket frames, DOM nodes, inputs)

pub mod error;
pub mod input;
pub mod message;
pub mod page;
pub mod profile;

pub use error::{Error, Result};
pub use input::{InputKind, InputState};
pub use message::{Message, MessageBatch, Role};
pub use page::{DomNode, RequestInfo, SocketFrame};
pub use profile::{ContextProfile, Fact, DEFAULT_MAX_FACTS, DEFAULT_MIN_FACT_IMPORTANCE};
