//! Domain primitives, ports, and services.
//!
//! Purpose: hold everything that decides *what* the service does with a
//! question, independent of HTTP, the model provider, or the database.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifiers.
//! - Question: validated caller question.
//! - CredentialStore: the fixed account list guarding the endpoint.
//! - QueryPipeline: two-attempt driving service over the SQL gateway.
//! - SqlDatabaseChain: SQL gateway built from the model and view ports.

pub mod credentials;
pub mod error;
pub mod ports;
pub mod prompts;
pub mod query_pipeline;
pub mod question;
pub mod sql_chain;
mod trace_id;

pub use self::credentials::{CredentialStore, CredentialsParseError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::query_pipeline::{NOT_UNDERSTOOD_MESSAGE, QueryPipeline};
pub use self::question::{Question, QuestionValidationError};
pub use self::sql_chain::{SqlChainConfig, SqlDatabaseChain};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use sqlqa::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Unauthorized Access"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
