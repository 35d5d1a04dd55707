//! Two-attempt question answering.
//!
//! The first attempt sends the bare question. If the gateway fails, a second
//! attempt sends the fallback instructions together with the first failure's
//! summary so the model can correct itself. A second failure produces the
//! apology outcome. The gateway is called at most twice per question.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::Question;
use super::ports::{PipelineOutcome, QueryService, SqlGateway};
use super::prompts::{fallback_prompt, primary_prompt};

/// Apology returned when neither attempt produced an answer.
pub const NOT_UNDERSTOOD_MESSAGE: &str =
    "I dont understand your question please provide more details.";

/// Query service driving the SQL gateway.
pub struct QueryPipeline<G: ?Sized> {
    gateway: Arc<G>,
}

impl<G: ?Sized> QueryPipeline<G> {
    /// Create a pipeline around `gateway`.
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl<G> QueryService for QueryPipeline<G>
where
    G: SqlGateway + ?Sized,
{
    async fn answer(&self, question: &Question) -> PipelineOutcome {
        info!(question = %question, "processing user query");

        let first = match self.gateway.answer(&primary_prompt(question)).await {
            Ok(answer) => {
                info!(sql = %answer.sql, "query processed successfully");
                return PipelineOutcome::Answered {
                    response: answer.answer,
                };
            }
            Err(err) => err,
        };
        warn!(
            error = %first.summary(),
            detail = %first.detail(),
            "first attempt failed, retrying with fallback instructions"
        );

        match self
            .gateway
            .answer(&fallback_prompt(question, &first.summary()))
            .await
        {
            Ok(answer) => {
                info!(sql = %answer.sql, "fallback query processed successfully");
                PipelineOutcome::Answered {
                    response: answer.answer,
                }
            }
            Err(second) => {
                warn!(
                    error = %second.summary(),
                    detail = %second.detail(),
                    "fallback attempt failed"
                );
                PipelineOutcome::NotUnderstood {
                    message: NOT_UNDERSTOOD_MESSAGE.to_owned(),
                    error: second.summary(),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "query_pipeline_tests.rs"]
mod tests;
