//! Driven port for the reporting view the service answers questions from.
//!
//! Adapters expose two capabilities: describing the configured relations
//! (columns plus a few sample rows, used to ground SQL generation) and
//! running a single read-only query.

use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::define_port_error;

/// A column of a described relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name as stored in the catalogue.
    pub name: String,
    /// Database type name.
    pub data_type: String,
}

/// Schema and sample data for one table or view.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationInfo {
    /// Relation name.
    pub name: String,
    /// Columns in ordinal order.
    pub columns: Vec<ColumnInfo>,
    /// A handful of rows keyed by column name.
    pub sample_rows: Vec<Map<String, Value>>,
}

/// Rows returned by a read-only query, each a JSON object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryRows(pub Vec<Value>);

impl QueryRows {
    /// Number of rows returned.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the query matched nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for QueryRows {
    /// Compact JSON array, the form fed back to the model.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = Value::Array(self.0.clone());
        write!(f, "{rendered}")
    }
}

define_port_error! {
    /// Errors surfaced by the view database.
    pub enum ViewDatabaseError {
        /// No connection could be obtained.
        Connection { message: String } =>
            "database connection failed: {message}",
        /// The database rejected or failed the statement.
        Query { message: String } =>
            "{message}",
    }
}

/// Port for describing and querying the configured view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ViewDatabase: Send + Sync {
    /// Describe every relation the model may query.
    async fn describe(&self) -> Result<Vec<RelationInfo>, ViewDatabaseError>;

    /// Run `sql` in a read-only transaction and return its rows.
    async fn run_read_only(&self, sql: &str) -> Result<QueryRows, ViewDatabaseError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_rows_render_as_compact_json() {
        let rows = QueryRows(vec![json!({"Manufacturer": "Antunes"})]);
        assert_eq!(rows.to_string(), r#"[{"Manufacturer":"Antunes"}]"#);
        assert_eq!(QueryRows::default().to_string(), "[]");
    }

    #[test]
    fn query_errors_surface_the_database_message_first() {
        let err = ViewDatabaseError::query("column \"Foo\" does not exist\nLINE 1: SELECT \"Foo\"");
        assert_eq!(err.summary(), "column \"Foo\" does not exist");
    }
}
