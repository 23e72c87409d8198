//! pgxrisk-llm — text-generation backend abstraction.
//!
//! The explanation generator is an external collaborator: given a structured
//! clinical context it returns free-form prose. Everything here treats that
//! service as a black box behind the `LlmBackend` trait so tests can swap in
//! a deterministic stub.

pub mod backend;
pub mod explain;

pub use backend::{GroqBackend, LlmBackend, LlmError, LlmRequest, LlmResponse, Message};
pub use explain::{generate_explanation, Explanation, ExplanationContext};
