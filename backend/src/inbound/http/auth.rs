//! HTTP Basic authentication against the configured credential store.
//!
//! [`AuthenticatedUser`] is an extractor: listing it as a handler argument
//! rejects the request with 401 before the handler body runs.

use actix_web::dev::Payload;
use actix_web::http::header::Header;
use actix_web::{FromRequest, HttpRequest, web};
use actix_web_httpauth::headers::authorization::{Authorization, Basic};
use futures_util::future::{Ready, ready};
use tracing::{error, info, warn};

use super::state::HttpState;
use crate::domain::{CredentialStore, Error};

/// Message returned for every authentication failure.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized Access";

/// Realm advertised in the `WWW-Authenticate` challenge on 401 responses.
pub const AUTH_REALM: &str = "Authentication Required";

/// Caller whose Basic credentials matched the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    username: String,
}

impl AuthenticatedUser {
    /// Username the caller authenticated as.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }
}

/// Check Basic credentials from `req` against `store`.
pub fn authenticate(req: &HttpRequest, store: &CredentialStore) -> Result<AuthenticatedUser, Error> {
    let Ok(header) = Authorization::<Basic>::parse(req) else {
        warn!("unauthorised access attempt: missing or malformed credentials");
        return Err(Error::unauthorized(UNAUTHORIZED_MESSAGE));
    };
    let credentials = header.into_scheme();
    let username = credentials.user_id();
    let password = credentials.password().unwrap_or_default();
    if store.verify(username, password) {
        info!(username = %username, "authenticated");
        Ok(AuthenticatedUser {
            username: username.to_owned(),
        })
    } else {
        warn!(username = %username, "unauthorised access attempt");
        Err(Error::unauthorized(UNAUTHORIZED_MESSAGE))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<HttpState>>() else {
            error!("HTTP state missing from app data");
            return ready(Err(Error::internal("HTTP state is not configured")));
        };
        ready(authenticate(req, &state.credentials))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    fn basic(username: &'static str, password: &'static str) -> Authorization<Basic> {
        Authorization::from(Basic::new(username, Some(password)))
    }

    #[rstest]
    #[case("john doe", "john@12345", true)]
    #[case("john doe", "wrong", false)]
    #[case("someone", "john@12345", false)]
    #[case("john doe", "", false)]
    fn checks_credentials_against_the_store(
        #[case] username: &'static str,
        #[case] password: &'static str,
        #[case] accepted: bool,
    ) {
        let req = TestRequest::default()
            .insert_header(basic(username, password))
            .to_http_request();

        let result = authenticate(&req, &CredentialStore::fallback());

        match result {
            Ok(user) => {
                assert!(accepted, "expected rejection for {username}:{password}");
                assert_eq!(user.username(), "john doe");
            }
            Err(err) => {
                assert!(!accepted, "expected acceptance for {username}:{password}");
                assert_eq!(err.code(), ErrorCode::Unauthorized);
                assert_eq!(err.message(), UNAUTHORIZED_MESSAGE);
            }
        }
    }

    #[rstest]
    #[case::missing(None)]
    #[case::wrong_scheme(Some("Bearer abc"))]
    #[case::garbage(Some("Basic !!!"))]
    fn rejects_missing_or_malformed_headers(#[case] header: Option<&str>) {
        let mut req = TestRequest::default();
        if let Some(value) = header {
            req = req.insert_header((AUTHORIZATION, value));
        }

        let err = authenticate(&req.to_http_request(), &CredentialStore::fallback())
            .expect_err("rejected");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
