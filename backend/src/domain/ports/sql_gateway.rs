//! Driven port turning a prompt into an answer via generated SQL.
//!
//! One call covers the whole exchange: schema inspection, SQL generation,
//! execution against the view, and phrasing the result as prose. The query
//! pipeline only sees the outcome.

use async_trait::async_trait;

use super::define_port_error;

/// Successful gateway result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayAnswer {
    /// Natural-language answer.
    pub answer: String,
    /// SQL that produced it.
    pub sql: String,
}

define_port_error! {
    /// Errors surfaced while answering a prompt.
    pub enum SqlGatewayError {
        /// The model failed to produce SQL or an answer.
        Generation { message: String } =>
            "{message}",
        /// The generated SQL was refused before execution.
        Rejected { message: String } =>
            "generated SQL rejected: {message}",
        /// The database failed to run the generated SQL.
        Execution { message: String } =>
            "{message}",
        /// A step did not finish in time.
        Timeout { message: String } =>
            "timed out while {message}",
    }
}

/// Port answering free-text prompts against the view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SqlGateway: Send + Sync {
    /// Produce an answer for `prompt`.
    async fn answer(&self, prompt: &str) -> Result<GatewayAnswer, SqlGatewayError>;
}
