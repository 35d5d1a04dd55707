//! Driving port answering a caller's question.
//!
//! Inbound adapters hand over a validated [`Question`] and always get an
//! outcome back: gateway failures are folded into
//! [`PipelineOutcome::NotUnderstood`] rather than surfaced as errors.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Question;

/// Result of answering one question.
///
/// Serialises untagged, so clients see either `{"response": ...}` or
/// `{"message": ..., "error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PipelineOutcome {
    /// One of the attempts produced an answer.
    Answered {
        /// Natural-language answer.
        response: String,
    },
    /// Both attempts failed.
    NotUnderstood {
        /// Fixed apology asking for more detail.
        message: String,
        /// Summary of the last failure.
        error: String,
    },
}

/// Port for answering questions.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Answer `question`, never failing.
    async fn answer(&self, question: &Question) -> PipelineOutcome;
}
