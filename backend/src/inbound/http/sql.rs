//! Question answering endpoint.
//!
//! ```text
//! POST /v1/sql
//! Authorization: Basic <user:password>
//! Content-Type: application/x-www-form-urlencoded
//!
//! user_query=what is the Manufacturer of the Deep Fryer
//! ```
//!
//! Answers and apologies are both 200 responses; see [`PipelineOutcome`].

use actix_web::{post, web};
use serde::Deserialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use super::auth::AuthenticatedUser;
use super::state::HttpState;
use crate::domain::ports::PipelineOutcome;
use crate::domain::{ApiResult, Error, Question, TraceId};

/// Message returned when no usable question was submitted.
pub const MISSING_QUESTION_MESSAGE: &str = "Please provide a question in the question field.";

/// Form body for [`answer_question`].
#[derive(Debug, Deserialize, ToSchema)]
pub struct SqlQueryForm {
    /// Natural-language question about the view.
    #[schema(example = "what is the Manufacturer of the Deep Fryer")]
    #[serde(default)]
    pub user_query: Option<String>,
}

/// Answer a natural-language question against the view.
///
/// The pipeline runs on its own task so a panic inside it becomes a 500
/// rather than tearing down the worker.
#[utoipa::path(
    post,
    path = "/v1/sql",
    request_body(
        content = SqlQueryForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Answer, or an apology when the question could not be answered", body = PipelineOutcome),
        (status = 400, description = "No question supplied", body = Error),
        (status = 401, description = "Missing or invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["sql"],
    operation_id = "answerQuestion",
    security(("BasicAuth" = []))
)]
#[post("/v1/sql")]
pub async fn answer_question(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    form: Option<web::Form<SqlQueryForm>>,
) -> ApiResult<web::Json<PipelineOutcome>> {
    let raw = form.and_then(|form| form.into_inner().user_query);
    let question = Question::from_optional(raw).map_err(|_| {
        warn!(username = %user.username(), "user query not provided");
        Error::invalid_request(MISSING_QUESTION_MESSAGE)
    })?;

    let service = state.query.clone();
    let trace_id = TraceId::current().unwrap_or_else(TraceId::generate);
    let task = tokio::spawn(TraceId::scope(trace_id, async move {
        service.answer(&question).await
    }));
    let outcome = task.await.map_err(|err| {
        error!(error = %err, username = %user.username(), "query pipeline task failed");
        Error::internal(format!("query pipeline task failed: {err}"))
    })?;
    Ok(web::Json(outcome))
}
