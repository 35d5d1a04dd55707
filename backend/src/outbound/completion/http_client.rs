//! Reqwest-backed completion client for OpenAI and Azure OpenAI.
//!
//! Transport details only: endpoint selection, authentication headers,
//! request serialisation, and HTTP error mapping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::{CompletionRequestDto, CompletionResponseDto};
use crate::domain::ports::{CompletionClient, CompletionError, CompletionRequest};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 256;

/// Where completions are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionProvider {
    /// OpenAI-compatible API; `base_url` defaults to the public endpoint.
    OpenAi { base_url: Option<Url>, model: Option<String> },
    /// Azure OpenAI deployment.
    Azure {
        endpoint: Url,
        deployment: String,
        api_version: String,
    },
}

/// Sampling settings shared by every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

enum Auth {
    Bearer,
    ApiKey,
}

/// Completion adapter performing one HTTP POST per call.
pub struct HttpCompletionClient {
    client: Client,
    endpoint: Url,
    model: Option<String>,
    auth: Auth,
    api_key: Zeroizing<String>,
    sampling: SamplingOptions,
}

impl HttpCompletionClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Rejected`] when the endpoint cannot be
    /// derived and [`CompletionError::Transport`] when the reqwest client
    /// cannot be constructed.
    pub fn new(
        provider: CompletionProvider,
        api_key: impl Into<String>,
        sampling: SamplingOptions,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let (endpoint, model, auth) = resolve_endpoint(provider)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CompletionError::transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            model,
            auth,
            api_key: Zeroizing::new(api_key.into()),
            sampling,
        })
    }

    /// Endpoint every request is posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn resolve_endpoint(
    provider: CompletionProvider,
) -> Result<(Url, Option<String>, Auth), CompletionError> {
    match provider {
        CompletionProvider::OpenAi { base_url, model } => {
            let base = match base_url {
                Some(url) => url,
                None => Url::parse(DEFAULT_OPENAI_BASE_URL)
                    .map_err(|err| CompletionError::rejected(err.to_string()))?,
            };
            let endpoint = with_trailing_slash(base)
                .join("completions")
                .map_err(|err| CompletionError::rejected(err.to_string()))?;
            let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_owned());
            Ok((endpoint, Some(model), Auth::Bearer))
        }
        CompletionProvider::Azure {
            endpoint,
            deployment,
            api_version,
        } => {
            let mut url = with_trailing_slash(endpoint);
            url.path_segments_mut()
                .map_err(|()| CompletionError::rejected("Azure endpoint cannot be a base URL"))?
                .pop_if_empty()
                .extend(["openai", "deployments", deployment.as_str(), "completions"]);
            url.query_pairs_mut()
                .append_pair("api-version", &api_version);
            Ok((url, None, Auth::ApiKey))
        }
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = CompletionRequestDto {
            model: self.model.as_deref(),
            prompt: &request.prompt,
            temperature: self.sampling.temperature,
            max_tokens: self.sampling.max_tokens,
            stop: &request.stop,
        };
        let builder = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        let builder = match self.auth {
            Auth::Bearer => builder.bearer_auth(self.api_key.as_str()),
            Auth::ApiKey => builder.header("api-key", self.api_key.as_str()),
        };
        let response = builder
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }
        parse_completion(bytes.as_ref())
    }
}

fn parse_completion(body: &[u8]) -> Result<String, CompletionError> {
    let decoded: CompletionResponseDto = serde_json::from_slice(body).map_err(|error| {
        CompletionError::decode(format!("invalid completion JSON payload: {error}"))
    })?;
    decoded.into_text().map_err(CompletionError::decode)
}

fn map_transport_error(error: reqwest::Error) -> CompletionError {
    if error.is_timeout() {
        CompletionError::timeout(error.to_string())
    } else {
        CompletionError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CompletionError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => CompletionError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CompletionError::timeout(message)
        }
        _ if status.is_client_error() => CompletionError::rejected(message),
        _ => CompletionError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
