//! Chart Client: one POST per analyze call, non-2xx answers surfaced verbatim.

use jami_core::{
    api_base, resolve_api_base, BirthInput, ChartError, ChartResult, ChartService, ClientConfig, ANALYZE_PATH,
    HEALTH_PATH,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Header carrying the service API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Client for the chart computation service.
///
/// Performs exactly one request per call. No retries, no caching.
#[derive(Debug, Clone)]
pub struct ChartClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ChartClient {
    /// Client for an explicit base address, without timeout or API key.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: resolve_api_base(Some(base_url), None),
            api_key: None,
        }
    }

    /// Client configured from `config`; the base address is resolved now and kept.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ChartError> {
        Self::build(config.api_base(), config)
    }

    /// Client using the process-wide configuration and base address.
    pub fn from_env() -> Result<Self, ChartError> {
        Self::build(api_base().to_string(), ClientConfig::global())
    }

    fn build(base_url: String, config: &ClientConfig) -> Result<Self, ChartError> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http = builder.build().map_err(ChartError::network)?;
        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    /// `POST /api/v1/birth/analyze` with `input` as the JSON body.
    pub async fn analyze_birth(&self, input: &BirthInput) -> Result<ChartResult, ChartError> {
        let request = self.authorize(self.http.post(self.url(ANALYZE_PATH)).json(input));
        let response = request.send().await.map_err(ChartError::network)?;
        decode(response).await
    }

    /// `GET /health` on the computation service.
    pub async fn health(&self) -> Result<HealthStatus, ChartError> {
        let request = self.authorize(self.http.get(self.url(HEALTH_PATH)));
        let response = request.send().await.map_err(ChartError::network)?;
        decode(response).await
    }
}

/// Non-2xx: status plus body text. 2xx: the body must decode as `T`.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ChartError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.map_err(ChartError::network)?;
        return Err(ChartError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = response.bytes().await.map_err(ChartError::network)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait::async_trait]
impl ChartService for ChartClient {
    async fn analyze_birth(&self, input: &BirthInput) -> Result<ChartResult, ChartError> {
        ChartClient::analyze_birth(self, input).await
    }
}
