//! HTTP client for the Pinecone REST API
//!
//! Control-plane calls (`/indexes`) go to the configured controller host;
//! statistics go to the per-index data-plane host.

use super::VectorService;
use crate::core::config::{Config, ResolveMode};
use crate::core::error::{ProbeError, Result};
use crate::core::types::{IndexDescription, IndexHandle, IndexList, IndexStats};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

const API_KEY_HEADER: &str = "api-key";
const API_VERSION_HEADER: &str = "x-pinecone-api-version";

/// Session against the Pinecone service
#[derive(Debug, Clone)]
pub struct PineconeClient {
    http: Client,
    controller: String,
    index_host: Option<String>,
    resolve: ResolveMode,
}

impl PineconeClient {
    /// Create a session from configuration
    ///
    /// Fails with `ConfigurationMissing` when the API key is empty and
    /// with `ConfigError` when the hosts are malformed. No network
    /// traffic happens here.
    pub fn connect(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?;
        config.validate()?;

        let mut key = HeaderValue::from_str(api_key).map_err(|_| {
            ProbeError::ConfigError("API key contains characters not allowed in a header".into())
        })?;
        key.set_sensitive(true);

        let version = HeaderValue::from_str(&config.pinecone.api_version).map_err(|_| {
            ProbeError::ConfigError(format!(
                "Invalid API version '{}'",
                config.pinecone.api_version
            ))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(API_VERSION_HEADER, version);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("pinecheck/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.pinecone.timeout_sec {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        tracing::debug!(
            controller = %config.pinecone.controller_host,
            resolve = %config.probe.resolve,
            "Pinecone client initialized"
        );

        Ok(Self {
            http,
            controller: config.pinecone.controller_host.trim_end_matches('/').to_string(),
            index_host: config.pinecone.index_host.clone(),
            resolve: config.probe.resolve,
        })
    }

    /// Describe one index through the control plane
    pub async fn describe_index(&self, name: &str) -> Result<IndexDescription> {
        let url = format!("{}/indexes/{}", self.controller, name);
        tracing::debug!(%url, "Describing index");

        let response = self.http.get(&url).send().await?;
        let response = check_status(response, &format!("index '{name}'")).await?;
        Ok(response.json().await?)
    }

    async fn host_for(&self, handle: &IndexHandle) -> Result<String> {
        match &handle.host {
            Some(host) => Ok(host.clone()),
            None => Ok(self.describe_index(&handle.name).await?.host),
        }
    }
}

#[async_trait]
impl VectorService for PineconeClient {
    async fn index(&self, name: &str) -> Result<IndexHandle> {
        if name.trim().is_empty() {
            return Err(ProbeError::ConfigurationMissing(
                "index name is empty".to_string(),
            ));
        }

        if let Some(host) = &self.index_host {
            return Ok(IndexHandle::resolved(name, host.clone()));
        }

        match self.resolve {
            ResolveMode::Lazy => Ok(IndexHandle::unresolved(name)),
            ResolveMode::Eager => {
                let desc = self.describe_index(name).await?;
                tracing::info!("Connected to Pinecone index: {}", name);
                Ok(IndexHandle::resolved(name, desc.host))
            }
        }
    }

    async fn describe_stats(&self, handle: &IndexHandle) -> Result<IndexStats> {
        let host = self.host_for(handle).await?;
        let url = format!("{}/describe_index_stats", data_plane_url(&host));
        tracing::debug!(%url, "Requesting index stats");

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let response = check_status(response, &format!("stats for '{}'", handle.name)).await?;
        let stats: IndexStats = response.json().await?;

        tracing::debug!(
            total_vector_count = stats.total_vector_count,
            namespaces = stats.namespace_count(),
            "Retrieved index stats"
        );
        Ok(stats)
    }

    async fn list_indexes(&self) -> Result<Vec<IndexDescription>> {
        let url = format!("{}/indexes", self.controller);
        tracing::debug!(%url, "Listing indexes");

        let response = self.http.get(&url).send().await?;
        let response = check_status(response, "index list").await?;
        let list: IndexList = response.json().await?;
        Ok(list.indexes)
    }
}

/// Data-plane base URL; hosts from the control plane come without a scheme
fn data_plane_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

/// Map non-success statuses onto the probe's error kinds
async fn check_status(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!(%status, %body, "Request for {} failed", what);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProbeError::ConnectionFailure(
            format!("service rejected the API key (status {status})"),
        )),
        StatusCode::NOT_FOUND => Err(ProbeError::QueryFailure(format!("{what} not found"))),
        _ => Err(ProbeError::QueryFailure(format!(
            "{what} failed with status {status}: {}",
            body.trim()
        ))),
    }
}
