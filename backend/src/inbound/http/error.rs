//! Rendering of domain errors as HTTP responses.
//!
//! Every error body is `{"message": ...}`. Internal failures are answered
//! with a fixed message and their detail goes to the log only, tagged with
//! the same trace id the client sees in the `trace-id` header. A 401 carries
//! a Basic `WWW-Authenticate` challenge.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use actix_web_httpauth::headers::www_authenticate::{WwwAuthenticate, basic::Basic};
use serde::Serialize;
use tracing::error;

use super::auth::AUTH_REALM;
use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TRACE_ID_HEADER;

/// Message sent to clients in place of any internal error detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

/// Text a client is allowed to see for `error`.
fn public_message(error: &Error) -> &str {
    match error.code() {
        ErrorCode::InternalError => INTERNAL_ERROR_MESSAGE,
        ErrorCode::InvalidRequest | ErrorCode::Unauthorized => error.message(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::InternalError {
            error!(
                trace_id = self.trace_id().unwrap_or("-"),
                detail = %self.message(),
                "answering with a redacted internal error"
            );
        }

        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        if self.code() == ErrorCode::Unauthorized {
            response.insert_header(WwwAuthenticate(Basic::with_realm(AUTH_REALM)));
        }
        response.json(ErrorBody {
            message: public_message(self),
        })
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(format!("request failed: {err}"))
    }
}
