//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the question endpoint and the health probes
//! - **Schemas**: the form body, both outcome shapes, and the error body
//! - **Security**: HTTP basic authentication for `/v1/sql`
//!
//! The generated specification is served by Swagger UI in debug builds and
//! printed by the `openapi-dump` binary for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::Error;
use crate::domain::ports::PipelineOutcome;
use crate::inbound::http::sql::SqlQueryForm;

/// Enrich the generated document with the basic auth security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BasicAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Basic)
                    .description(Some("Username and password from the configured accounts."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "SQL question answering API",
        description = "Answers natural-language questions about a reporting view."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::sql::answer_question,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(SqlQueryForm, PipelineOutcome, Error)),
    tags(
        (name = "sql", description = "Natural-language questions answered with SQL"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
