//! SQL question answering over the configured view.
//!
//! [`SqlDatabaseChain`] implements [`SqlGateway`] in four steps: describe
//! the view, ask the model for a query (optionally asking it to double check
//! that query), run the query read-only, then ask the model to phrase the
//! rows as an answer. Every model call and database call is bounded by a
//! timeout.

mod extract;
mod templates;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

pub use extract::{SqlGuardError, ensure_read_only, extract_sql_query};
pub use templates::{
    SQL_RESULT_STOP, answer_prompt, generation_prompt, query_checker_prompt, quote_identifier,
    render_table_info,
};

use super::ports::{
    CompletionClient, CompletionRequest, GatewayAnswer, SqlGateway, SqlGatewayError,
    ViewDatabase,
};

/// Tunables for [`SqlDatabaseChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlChainConfig {
    /// Row cap suggested to the model.
    pub top_k: usize,
    /// Ask the model to double check generated SQL.
    pub use_query_checker: bool,
    /// Upper bound for one model call.
    pub llm_timeout: Duration,
    /// Upper bound for one database call.
    pub db_timeout: Duration,
}

impl Default for SqlChainConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            use_query_checker: true,
            llm_timeout: Duration::from_secs(60),
            db_timeout: Duration::from_secs(30),
        }
    }
}

/// Gateway backed by a completion model and the view database.
pub struct SqlDatabaseChain<C: ?Sized, D: ?Sized> {
    completion: Arc<C>,
    database: Arc<D>,
    config: SqlChainConfig,
}

impl<C: ?Sized, D: ?Sized> SqlDatabaseChain<C, D> {
    /// Assemble a chain.
    pub fn new(completion: Arc<C>, database: Arc<D>, config: SqlChainConfig) -> Self {
        Self {
            completion,
            database,
            config,
        }
    }
}

impl<C, D> SqlDatabaseChain<C, D>
where
    C: CompletionClient + ?Sized,
    D: ViewDatabase + ?Sized,
{
    async fn complete(
        &self,
        request: CompletionRequest,
        step: &str,
    ) -> Result<String, SqlGatewayError> {
        bounded(self.config.llm_timeout, step, self.completion.complete(&request))
            .await?
            .map_err(|err| SqlGatewayError::generation(err.to_string()))
    }

    async fn generate_sql(&self, generation: &str) -> Result<String, SqlGatewayError> {
        let raw = self
            .complete(
                CompletionRequest::new(generation).with_stop(SQL_RESULT_STOP),
                "generating SQL",
            )
            .await?;
        let sql = extract_sql_query(&raw);
        if !self.config.use_query_checker || sql.is_empty() {
            return Ok(sql);
        }
        let checked = self
            .complete(
                CompletionRequest::new(query_checker_prompt(&sql)),
                "checking the generated SQL",
            )
            .await?;
        Ok(extract_sql_query(&checked))
    }
}

#[async_trait]
impl<C, D> SqlGateway for SqlDatabaseChain<C, D>
where
    C: CompletionClient + ?Sized,
    D: ViewDatabase + ?Sized,
{
    async fn answer(&self, prompt: &str) -> Result<GatewayAnswer, SqlGatewayError> {
        let relations = bounded(
            self.config.db_timeout,
            "describing the view",
            self.database.describe(),
        )
        .await?
        .map_err(|err| SqlGatewayError::execution(err.to_string()))?;
        let generation = generation_prompt(
            &render_table_info(&relations),
            self.config.top_k,
            prompt,
        );

        let generated = self.generate_sql(&generation).await?;
        let sql = ensure_read_only(&generated)
            .map_err(|err| SqlGatewayError::rejected(err.to_string()))?
            .to_owned();
        debug!(sql = %sql, "running generated SQL");

        let rows = bounded(
            self.config.db_timeout,
            "running the generated SQL",
            self.database.run_read_only(&sql),
        )
        .await?
        .map_err(|err| SqlGatewayError::execution(err.to_string()))?;
        debug!(rows = rows.len(), "generated SQL returned");

        let answer = self
            .complete(
                CompletionRequest::new(answer_prompt(&generation, &sql, &rows)),
                "phrasing the answer",
            )
            .await?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(SqlGatewayError::generation("the model returned an empty answer"));
        }
        Ok(GatewayAnswer {
            answer: answer.to_owned(),
            sql,
        })
    }
}

async fn bounded<F: Future>(
    limit: Duration,
    step: &str,
    fut: F,
) -> Result<F::Output, SqlGatewayError> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| SqlGatewayError::timeout(step))
}
