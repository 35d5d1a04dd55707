//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::CredentialStore;
use crate::domain::ports::QueryService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Question answering use-case.
    pub query: Arc<dyn QueryService>,
    /// Accounts allowed to call the query endpoint.
    pub credentials: Arc<CredentialStore>,
}

impl HttpState {
    /// Bundle the query service with the credential store.
    pub fn new(query: Arc<dyn QueryService>, credentials: Arc<CredentialStore>) -> Self {
        Self { query, credentials }
    }
}
