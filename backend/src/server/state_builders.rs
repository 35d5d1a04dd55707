//! Builders turning [`Settings`] into the adapters behind [`HttpState`].

use std::io;
use std::sync::Arc;

use tracing::{info, warn};

use sqlqa::config::{ModelSettings, Settings};
use sqlqa::domain::{CredentialStore, QueryPipeline, SqlDatabaseChain};
use sqlqa::inbound::http::state::HttpState;
use sqlqa::outbound::completion::{CompletionProvider, HttpCompletionClient, SamplingOptions};
use sqlqa::outbound::persistence::{DbPool, DieselViewDatabase, PoolConfig};

/// Select Azure when its coordinates are complete, otherwise OpenAI.
pub(crate) fn completion_provider(model: &ModelSettings) -> CompletionProvider {
    match &model.azure {
        Some(azure) => CompletionProvider::Azure {
            endpoint: azure.endpoint.clone(),
            deployment: azure.deployment.clone(),
            api_version: azure.api_version.clone(),
        },
        None => CompletionProvider::OpenAi {
            base_url: model.base_url.clone(),
            model: model.model.clone(),
        },
    }
}

pub(crate) fn sampling_options(model: &ModelSettings) -> SamplingOptions {
    let defaults = SamplingOptions::default();
    SamplingOptions {
        temperature: model.temperature.unwrap_or(defaults.temperature),
        max_tokens: model.max_tokens.unwrap_or(defaults.max_tokens),
    }
}

/// The configured accounts, or the built-in one when none were given.
pub(crate) fn credential_store(settings: &Settings) -> CredentialStore {
    settings.credentials.clone().unwrap_or_else(|| {
        warn!("AUTH_USERS not set; accepting the built-in account only");
        CredentialStore::fallback()
    })
}

/// Wire the pool, view adapter, completion client, chain, and pipeline.
///
/// The pool connects lazily, so an unreachable database surfaces on the
/// first question rather than at startup.
///
/// # Errors
///
/// Returns [`io::Error`] when the database URL, pool, or HTTP client cannot
/// be built.
pub(crate) async fn build_http_state(settings: &Settings) -> io::Result<HttpState> {
    let database_url = settings.database.url().map_err(io::Error::other)?;
    let pool = DbPool::new(
        PoolConfig::new(database_url.as_str())
            .with_max_size(settings.database.pool_max_size)
            .with_connection_timeout(settings.chain.db_timeout),
    )
    .await
    .map_err(io::Error::other)?;
    let view = DieselViewDatabase::new(
        pool,
        settings.include_tables.clone(),
        settings.chain.db_timeout,
    );

    let provider = completion_provider(&settings.model);
    let azure = matches!(provider, CompletionProvider::Azure { .. });
    let completion = HttpCompletionClient::new(
        provider,
        settings.model.api_key.as_str(),
        sampling_options(&settings.model),
        settings.chain.llm_timeout,
    )
    .map_err(io::Error::other)?;
    info!(
        endpoint = %completion.endpoint(),
        azure,
        tables = ?settings.include_tables,
        "completion client ready"
    );

    let chain = SqlDatabaseChain::new(
        Arc::new(completion),
        Arc::new(view),
        settings.chain.clone(),
    );
    let pipeline = QueryPipeline::new(Arc::new(chain));
    Ok(HttpState::new(
        Arc::new(pipeline),
        Arc::new(credential_store(settings)),
    ))
}
