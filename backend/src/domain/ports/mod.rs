//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod completion_client;
mod query_service;
mod sql_gateway;
mod view_database;

#[cfg(test)]
pub use completion_client::MockCompletionClient;
pub use completion_client::{CompletionClient, CompletionError, CompletionRequest};
pub use query_service::{PipelineOutcome, QueryService};
#[cfg(test)]
pub use sql_gateway::MockSqlGateway;
pub use sql_gateway::{GatewayAnswer, SqlGateway, SqlGatewayError};
#[cfg(test)]
pub use view_database::MockViewDatabase;
pub use view_database::{ColumnInfo, QueryRows, RelationInfo, ViewDatabase, ViewDatabaseError};

/// First line of `text`, without a trailing carriage return.
///
/// # Examples
/// ```
/// use sqlqa::domain::ports::first_line;
///
/// assert_eq!(first_line("bad column\r\nat line 1"), "bad column");
/// assert_eq!(first_line(""), "");
/// ```
pub fn first_line(text: &str) -> &str {
    text.split('\n')
        .next()
        .unwrap_or_default()
        .trim_end_matches('\r')
}
