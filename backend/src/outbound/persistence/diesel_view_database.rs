//! PostgreSQL-backed adapter for the view database port.
//!
//! Generated SQL is arbitrary, so rows are not mapped onto Diesel models.
//! Instead every statement is wrapped in a `json_agg` projection and the
//! database hands back one JSON text value holding all rows. Generated
//! statements are capped at [`MAX_RESULT_ROWS`] rows whatever their own
//! `LIMIT` says, so one answer prompt never carries the whole view.

use std::time::Duration;

use async_trait::async_trait;
use diesel::QueryableByName;
use diesel::sql_types::Text;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use serde_json::{Map, Value};
use tracing::debug;

use super::pool::{DbPool, PoolError};
use crate::domain::ports::{ColumnInfo, QueryRows, RelationInfo, ViewDatabase, ViewDatabaseError};
use crate::domain::sql_chain::quote_identifier;

/// Rows sampled per relation when describing the view.
pub const SAMPLE_ROWS: u32 = 3;

/// Upper bound on rows returned for one generated statement.
pub const MAX_RESULT_ROWS: u32 = 100;

const COLUMNS_SQL: &str = "SELECT column_name::text AS column_name, data_type::text AS data_type \
     FROM information_schema.columns \
     WHERE table_schema = current_schema() AND table_name = $1 \
     ORDER BY ordinal_position";

#[derive(QueryableByName)]
struct ColumnRow {
    #[diesel(sql_type = Text)]
    column_name: String,
    #[diesel(sql_type = Text)]
    data_type: String,
}

#[derive(QueryableByName)]
struct JsonRows {
    #[diesel(sql_type = Text)]
    payload: String,
}

/// Diesel-backed implementation of [`ViewDatabase`].
#[derive(Clone)]
pub struct DieselViewDatabase {
    pool: DbPool,
    relations: Vec<String>,
    statement_timeout: Duration,
}

impl DieselViewDatabase {
    /// Expose `relations` (tables or views) to the model.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pool = DbPool::new(PoolConfig::new(url)).await?;
    /// let view = DieselViewDatabase::new(pool, vec!["MyAiView".to_owned()], Duration::from_secs(30));
    /// ```
    pub fn new(pool: DbPool, relations: Vec<String>, statement_timeout: Duration) -> Self {
        Self {
            pool,
            relations,
            statement_timeout,
        }
    }
}

fn map_pool_error(error: PoolError) -> ViewDatabaseError {
    ViewDatabaseError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> ViewDatabaseError {
    ViewDatabaseError::query(error.to_string())
}

/// Wrap `sql` so it yields one text column holding a JSON array of rows.
fn json_rows_sql(sql: &str) -> String {
    format!("SELECT COALESCE(json_agg(result), '[]'::json)::text AS payload FROM ({sql}) AS result")
}

fn capped_rows_sql(sql: &str) -> String {
    json_rows_sql(&format!(
        "SELECT * FROM ({sql}) AS generated_query LIMIT {MAX_RESULT_ROWS}"
    ))
}

fn sample_rows_sql(relation: &str) -> String {
    json_rows_sql(&format!(
        "SELECT * FROM {} LIMIT {SAMPLE_ROWS}",
        quote_identifier(relation)
    ))
}

fn decode_rows(payload: &str) -> Result<Vec<Value>, ViewDatabaseError> {
    serde_json::from_str(payload)
        .map_err(|err| ViewDatabaseError::query(format!("could not decode result rows: {err}")))
}

fn into_objects(rows: Vec<Value>) -> Vec<Map<String, Value>> {
    rows.into_iter()
        .filter_map(|row| match row {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

#[async_trait]
impl ViewDatabase for DieselViewDatabase {
    async fn describe(&self) -> Result<Vec<RelationInfo>, ViewDatabaseError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut described = Vec::with_capacity(self.relations.len());
        for relation in &self.relations {
            let columns: Vec<ColumnRow> = diesel::sql_query(COLUMNS_SQL)
                .bind::<Text, _>(relation.as_str())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            if columns.is_empty() {
                return Err(ViewDatabaseError::query(format!(
                    "relation \"{relation}\" does not exist or has no visible columns"
                )));
            }
            let samples: JsonRows = diesel::sql_query(sample_rows_sql(relation))
                .get_result(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            described.push(RelationInfo {
                name: relation.clone(),
                columns: columns
                    .into_iter()
                    .map(|row| ColumnInfo {
                        name: row.column_name,
                        data_type: row.data_type,
                    })
                    .collect(),
                sample_rows: into_objects(decode_rows(&samples.payload)?),
            });
        }
        Ok(described)
    }

    async fn run_read_only(&self, sql: &str) -> Result<QueryRows, ViewDatabaseError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let wrapped = capped_rows_sql(sql);
        let timeout = format!(
            "SET LOCAL statement_timeout = {}",
            self.statement_timeout.as_millis()
        );
        debug!(relations = ?self.relations, "executing read-only statement");

        let rows: JsonRows = conn
            .transaction(|conn| {
                async move {
                    diesel::sql_query("SET TRANSACTION READ ONLY")
                        .execute(conn)
                        .await?;
                    diesel::sql_query(timeout).execute(conn).await?;
                    diesel::sql_query(wrapped).get_result(conn).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let rows = decode_rows(&rows.payload)?;
        if rows.len() >= MAX_RESULT_ROWS as usize {
            debug!(limit = MAX_RESULT_ROWS, "result truncated to the row cap");
        }
        Ok(QueryRows(rows))
    }
}
