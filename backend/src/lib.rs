//! Natural-language question answering over a SQL reporting view.
//!
//! The HTTP adapter in [`inbound`] authenticates callers and hands each
//! question to the [`domain`] pipeline, which asks a completion model for SQL,
//! runs it read-only through [`outbound`], and phrases the rows as an answer.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod telemetry;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
