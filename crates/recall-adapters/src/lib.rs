//! Per-site extraction adapters
//!
//! One module per provider; [`Adapter`] is the closed set of variants the
//! engine dispatches through. Selection happens once per page load via
//! [`Adapter::for_hostname`].

pub mod adapter;
pub mod claude;
pub mod dom;
pub mod gemini;
pub mod generic;
pub mod openai;
pub mod request;

pub use adapter::Adapter;
