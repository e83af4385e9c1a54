//! HTTP store over the project's `/types` endpoints.

use std::time::Duration;

use async_trait::async_trait;
use ctsync_core::{ChangeAction, DesiredType, PersistedType, RemoteError, RemoteStore, StoreError};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{ClientError, ClientResult, TokenCache};

/// Largest page the query endpoint serves.
pub const DEFAULT_PAGE_SIZE: u32 = 500;

const CORRELATION_HEADER: &str = "X-Correlation-ID";

/// Project and credentials for one store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub project_key: String,
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub api_url: String,
    /// Requested scopes; the client's default scopes when empty
    pub scopes: Vec<String>,
}

impl ClientConfig {
    pub fn new(
        project_key: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        auth_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            project_key: project_key.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_url: auth_url.into(),
            api_url: api_url.into(),
            scopes: Vec::new(),
        }
    }
}

/// Error envelope returned with non-2xx responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    message: String,
    #[serde(default)]
    correlation_id: Option<String>,
}

/// One page of a query response.
#[derive(Debug, Deserialize)]
struct PagedQueryResponse {
    count: u64,
    #[serde(default)]
    total: Option<u64>,
    results: Vec<PersistedType>,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    version: u64,
    actions: &'a [ChangeAction],
}

/// [`RemoteStore`] backed by the platform's HTTP API.
#[derive(Debug)]
pub struct HttpStore {
    http_client: reqwest::Client,
    token_cache: TokenCache,
    base_url: String,
    page_size: u32,
}

impl HttpStore {
    /// Create a store for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the project key is empty or the HTTP client cannot
    /// be created.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        if config.project_key.is_empty() {
            return Err(ClientError::Config("project key must not be empty".into()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            token_cache: TokenCache::new(config, http_client.clone()),
            http_client,
            base_url: format!(
                "{}/{}",
                config.api_url.trim_end_matches('/'),
                config.project_key
            ),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Use pages of `page_size` types when querying.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Returns the project URL all type endpoints hang off.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn types_url(&self) -> String {
        format!("{}/types", self.base_url)
    }

    fn type_url(&self, key: &str) -> String {
        format!("{}/types/key={}", self.base_url, key)
    }

    async fn request(&self, method: Method, url: &str) -> Result<RequestBuilder, StoreError> {
        let token = self.token_cache.get_token().await?;
        Ok(self.http_client.request(method, url).bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        let response = request.send().await.map_err(ClientError::from)?;
        if response.status() == StatusCode::UNAUTHORIZED {
            // Revoked before its expiry; the next request fetches a new one.
            self.token_cache.invalidate().await;
        }
        read_response(response).await
    }
}

/// Decode a success body, or classify the failure.
async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();
    let header_correlation_id = response
        .headers()
        .get(CORRELATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.text().await.map_err(ClientError::from)?;

    if status.is_success() {
        return serde_json::from_str(&body)
            .map_err(|e| StoreError::unexpected(format!("HTTP {}: invalid body: {}", status, e)));
    }

    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => {
            let correlation_id = header_correlation_id
                .or(envelope.correlation_id)
                .unwrap_or_default();
            Err(RemoteError::new(envelope.message, correlation_id).into())
        }
        Err(_) => Err(StoreError::unexpected(format!("HTTP {}", status))),
    }
}

#[async_trait]
impl RemoteStore for HttpStore {
    #[instrument(skip(self))]
    async fn query(&self) -> Result<Vec<PersistedType>, StoreError> {
        let mut types = Vec::new();
        let mut offset: u64 = 0;

        loop {
            let url = format!(
                "{}?limit={}&offset={}",
                self.types_url(),
                self.page_size,
                offset
            );
            let page: PagedQueryResponse = self.send(self.request(Method::GET, &url).await?).await?;
            debug!(offset, count = page.count, total = ?page.total, "Fetched page of types");

            let fetched = page.results.len() as u64;
            types.extend(page.results);
            offset += fetched;

            let done = match page.total {
                Some(total) => offset >= total,
                None => fetched < u64::from(self.page_size),
            };
            if done || fetched == 0 {
                break;
            }
        }

        Ok(types)
    }

    #[instrument(skip(self, draft), fields(key = %draft.key))]
    async fn create(&self, draft: &DesiredType) -> Result<PersistedType, StoreError> {
        let request = self.request(Method::POST, &self.types_url()).await?.json(draft);
        self.send(request).await
    }

    #[instrument(skip(self, actions), fields(actions = actions.len()))]
    async fn update(
        &self,
        key: &str,
        version: u64,
        actions: &[ChangeAction],
    ) -> Result<PersistedType, StoreError> {
        let request = self
            .request(Method::POST, &self.type_url(key))
            .await?
            .json(&UpdateRequest { version, actions });
        self.send(request).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str, version: u64) -> Result<(), StoreError> {
        let url = format!("{}?version={}", self.type_url(key), version);
        let _: serde_json::Value = self.send(self.request(Method::DELETE, &url).await?).await?;
        Ok(())
    }
}
