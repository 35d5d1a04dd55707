//! Driven port for text completion against a language model.
//!
//! The SQL chain only needs "prompt in, text out" with optional stop
//! sequences; provider selection and wire formats belong to the adapter.

use async_trait::async_trait;

use super::define_port_error;

/// One completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Full prompt text sent to the model.
    pub prompt: String,
    /// Sequences at which the model must stop generating.
    pub stop: Vec<String>,
}

impl CompletionRequest {
    /// Request with no stop sequences.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            stop: Vec::new(),
        }
    }

    /// Add a stop sequence.
    #[must_use]
    pub fn with_stop(mut self, stop: impl Into<String>) -> Self {
        self.stop.push(stop.into());
        self
    }
}

define_port_error! {
    /// Errors surfaced while calling the completion provider.
    pub enum CompletionError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "completion transport failed: {message}",
        /// The provider did not answer in time.
        Timeout { message: String } =>
            "completion timed out: {message}",
        /// The provider throttled the request.
        RateLimited { message: String } =>
            "completion rate limited: {message}",
        /// The provider refused the request (auth, quota, bad parameters).
        Rejected { message: String } =>
            "completion rejected: {message}",
        /// The provider answered with something we could not read.
        Decode { message: String } =>
            "completion response decode failed: {message}",
    }
}

/// Port for single-shot text completion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Return the generated text for `request`.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
