//! Pinecone vector store implementation (data plane, read side).

use async_trait::async_trait;
use std::collections::HashMap;

use mailgraph_core::error::{MailgraphError, MailgraphResult};
use mailgraph_core::traits::{IndexStats, VectorMatch, VectorStore, VectorStoreConfig};

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Control plane used to resolve an index name to its data plane host.
pub const DEFAULT_CONTROL_PLANE_URL: &str = "https://api.pinecone.io";

/// API version sent with every request.
pub const PINECONE_API_VERSION: &str = "2024-07";

/// Pinecone vector store implementation.
pub struct PineconeVectorStore {
    client: Client,
    headers: HeaderMap,
    index_host: String,
    config: VectorStoreConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PineconeMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<PineconeMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeStatsResponse {
    #[serde(default)]
    dimension: usize,
    #[serde(default)]
    total_vector_count: u64,
}

#[derive(Debug, Deserialize)]
struct DescribeIndexResponse {
    host: String,
}

impl PineconeVectorStore {
    /// Connect to the index named in `config`, resolving its host through
    /// the control plane when `config.host` is not set.
    pub async fn new(config: VectorStoreConfig) -> MailgraphResult<Self> {
        Self::with_control_plane(config, DEFAULT_CONTROL_PLANE_URL).await
    }

    /// Like [`PineconeVectorStore::new`] with an explicit control plane URL.
    pub async fn with_control_plane(
        config: VectorStoreConfig,
        control_plane_url: &str,
    ) -> MailgraphResult<Self> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            MailgraphError::Configuration(
                "Pinecone API key required. Set PINECONE_API_KEY or provide api_key.".to_string(),
            )
        })?;

        let headers = build_headers(api_key)?;
        let client = Client::new();

        let index_host = match config.host.as_deref() {
            Some(host) => normalize_host(host),
            None => {
                resolve_host(&client, &headers, control_plane_url, &config.index_name).await?
            }
        };

        info!(index = %config.index_name, host = %index_host, "Connected to Pinecone index");

        Ok(Self {
            client,
            headers,
            index_host,
            config,
        })
    }

    /// Data plane base URL.
    pub fn host(&self) -> &str {
        &self.index_host
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> MailgraphResult<Response> {
        let url = format!("{}{}", self.index_host, path);
        let response = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| MailgraphError::vector_connection(format!("Request to {} failed: {}", path, e)))?;

        check_status(response).await
    }
}

fn build_headers(api_key: &str) -> MailgraphResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Api-Key",
        HeaderValue::from_str(api_key).map_err(|_| {
            MailgraphError::Configuration("Pinecone API key is not a valid header value".to_string())
        })?,
    );
    headers.insert(
        "X-Pinecone-API-Version",
        HeaderValue::from_static(PINECONE_API_VERSION),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Hosts returned by the control plane carry no scheme.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

async fn resolve_host(
    client: &Client,
    headers: &HeaderMap,
    control_plane_url: &str,
    index_name: &str,
) -> MailgraphResult<String> {
    let url = format!(
        "{}/indexes/{}",
        control_plane_url.trim_end_matches('/'),
        index_name
    );
    debug!(%url, "Resolving Pinecone index host");

    let response = client
        .get(&url)
        .headers(headers.clone())
        .send()
        .await
        .map_err(|e| MailgraphError::vector_connection(format!("Failed to describe index: {}", e)))?;

    let described: DescribeIndexResponse = check_status(response)
        .await?
        .json()
        .await
        .map_err(|e| MailgraphError::parse(format!("Failed to parse index description: {}", e)))?;

    Ok(normalize_host(&described.host))
}

async fn check_status(response: Response) -> MailgraphResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(MailgraphError::from_http_status(status.as_u16(), &body))
}

#[async_trait]
impl VectorStore for PineconeVectorStore {
    async fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> MailgraphResult<Vec<VectorMatch>> {
        let request = QueryRequest {
            vector: query_vector,
            top_k,
            include_metadata,
            namespace: self.config.namespace.as_deref(),
        };

        let result: QueryResponse = self
            .post("/query", &request)
            .await?
            .json()
            .await
            .map_err(|e| MailgraphError::parse(format!("Failed to parse query response: {}", e)))?;

        debug!(matches = result.matches.len(), top_k, "Pinecone query returned");

        Ok(result
            .matches
            .into_iter()
            .map(|m| VectorMatch {
                id: m.id,
                score: m.score,
                metadata: m.metadata.unwrap_or_default(),
            })
            .collect())
    }

    async fn stats(&self) -> MailgraphResult<IndexStats> {
        let stats: DescribeStatsResponse = self
            .post("/describe_index_stats", &serde_json::json!({}))
            .await?
            .json()
            .await
            .map_err(|e| MailgraphError::parse(format!("Failed to parse index stats: {}", e)))?;

        Ok(IndexStats {
            name: self.config.index_name.clone(),
            dimension: stats.dimension,
            vector_count: stats.total_vector_count,
        })
    }

    fn index_name(&self) -> &str {
        &self.config.index_name
    }
}
