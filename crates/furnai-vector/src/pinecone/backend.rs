//! Pinecone backend implementation.

use async_trait::async_trait;
use reqwest::{Client as HttpClient, ClientBuilder, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::PineconeConfig;
use super::config::host_url;
use super::wire::{
    DescribeIndexResponse, DescribeStatsResponse, QueryRequest, QueryResponse, UpsertRequest,
    UpsertResponse,
};
use crate::error::{VectorError, VectorResult};
use crate::{
    IndexStats, QueryMatch, QueryOptions, TRACING_TARGET_PINECONE, VectorIndex, VectorRecord,
};

const API_KEY_HEADER: &str = "Api-Key";
const API_VERSION_HEADER: &str = "X-Pinecone-API-Version";

/// Pinecone backend implementation.
#[derive(Debug, Clone)]
pub struct PineconeBackend {
    http_client: HttpClient,
    host: Url,
    config: PineconeConfig,
}

impl PineconeBackend {
    /// Creates a new Pinecone backend.
    ///
    /// When no index host is configured it is looked up once through the
    /// control plane (`GET /indexes/{name}`).
    pub async fn new(config: &PineconeConfig) -> VectorResult<Self> {
        config.validate()?;

        let http_client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(concat!("furnai-vector/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VectorError::connection(format!("Failed to build HTTP client: {e}")))?;

        let host = match &config.index_host {
            Some(host) => host_url(host)?,
            None => Self::resolve_host(&http_client, config).await?,
        };

        tracing::info!(
            target: TRACING_TARGET_PINECONE,
            index = %config.index,
            host = %host,
            namespace = ?config.namespace,
            "Pinecone backend initialized"
        );

        Ok(Self {
            http_client,
            host,
            config: config.clone(),
        })
    }

    /// Returns the resolved data plane host.
    pub fn host(&self) -> &Url {
        &self.host
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &PineconeConfig {
        &self.config
    }

    async fn resolve_host(http_client: &HttpClient, config: &PineconeConfig) -> VectorResult<Url> {
        let control = host_url(&config.control_url)?;
        let url = control
            .join(&format!("indexes/{}", config.index))
            .map_err(|e| VectorError::invalid_config(format!("Invalid control plane URL: {e}")))?;

        tracing::debug!(
            target: TRACING_TARGET_PINECONE,
            index = %config.index,
            url = %url,
            "Resolving index host"
        );

        let request = http_client
            .get(url)
            .header(API_KEY_HEADER, &config.api_key)
            .header(API_VERSION_HEADER, &config.api_version);
        let response = request.send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(VectorError::index_not_found(&config.index));
        }

        let described: DescribeIndexResponse = Self::read_json(response).await?;
        host_url(&described.host)
    }

    /// Create a new request builder against the data plane.
    fn request(&self, method: Method, path: &str) -> VectorResult<RequestBuilder> {
        let url = self
            .host
            .join(path)
            .map_err(|e| VectorError::invalid_config(format!("Invalid request URL: {e}")))?;

        Ok(self
            .http_client
            .request(method, url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(API_VERSION_HEADER, &self.config.api_version))
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> VectorResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        Self::read_json(response).await
    }

    async fn read_json<R: DeserializeOwned>(response: Response) -> VectorResult<R> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(
                target: TRACING_TARGET_PINECONE,
                status = status.as_u16(),
                body = %body,
                "Pinecone request failed"
            );

            return Err(VectorError::api(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl VectorIndex for PineconeBackend {
    async fn query(
        &self,
        vector: Vec<f32>,
        top_k: usize,
        options: QueryOptions,
    ) -> VectorResult<Vec<QueryMatch>> {
        let body = QueryRequest {
            vector: &vector,
            top_k,
            include_metadata: options.include_metadata,
            include_values: false,
            namespace: options.namespace.as_deref().filter(|ns| !ns.is_empty()),
        };

        let response: QueryResponse = self.post("query", &body).await?;

        tracing::trace!(
            target: TRACING_TARGET_PINECONE,
            matches = response.matches.len(),
            "Query answered"
        );

        Ok(response.matches.into_iter().map(QueryMatch::from).collect())
    }

    async fn upsert(
        &self,
        records: Vec<VectorRecord>,
        namespace: Option<&str>,
    ) -> VectorResult<usize> {
        let body = UpsertRequest {
            vectors: &records,
            namespace: namespace.filter(|ns| !ns.is_empty()),
        };

        let response: UpsertResponse = self.post("vectors/upsert", &body).await?;
        Ok(response.upserted_count)
    }

    async fn describe_stats(&self) -> VectorResult<IndexStats> {
        let response: DescribeStatsResponse = self
            .post("describe_index_stats", &serde_json::json!({}))
            .await?;

        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn backend(server: &MockServer, namespace: &str) -> PineconeBackend {
        let config = PineconeConfig::new("pc-test", "products")
            .with_namespace(namespace)
            .with_index_host(server.uri());

        PineconeBackend::new(&config).await.unwrap()
    }

    #[tokio::test]
    async fn query_sends_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .and(header("api-key", "pc-test"))
            .and(header("x-pinecone-api-version", "2024-07"))
            .and(body_json(json!({
                "vector": [0.5, 0.25],
                "topK": 3,
                "includeMetadata": true,
                "includeValues": false,
                "namespace": "furniture"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "matches": [
                    { "id": "12", "score": 0.92, "metadata": { "title": "Oak Chair" } },
                    { "id": "4", "score": 0.81 }
                ],
                "namespace": "furniture"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend(&server, "furniture").await;
        let options = QueryOptions::new()
            .with_metadata()
            .with_namespace(backend.config().namespace.clone());
        let matches = backend.query(vec![0.5, 0.25], 3, options).await.unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "12");
        assert_eq!(matches[0].metadata["title"], "Oak Chair");
        assert!(matches[1].metadata.is_empty());
        assert_eq!(matches[1].values, None);
    }

    #[tokio::test]
    async fn upsert_omits_default_namespace() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/vectors/upsert"))
            .and(body_json(json!({
                "vectors": [
                    { "id": "0", "values": [1.0], "metadata": { "title": "Desk" } }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "upsertedCount": 1 })))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend(&server, "").await;
        let record = VectorRecord::new("0", vec![1.0]).with_field("title", json!("Desk"));
        let upserted = backend.upsert(vec![record], None).await.unwrap();

        assert_eq!(upserted, 1);
    }

    #[tokio::test]
    async fn describe_stats_parses_namespaces() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/describe_index_stats"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "namespaces": { "": { "vectorCount": 250 } },
                "dimension": 384,
                "indexFullness": 0.0,
                "totalVectorCount": 250
            })))
            .mount(&server)
            .await;

        let stats = backend(&server, "").await.describe_stats().await.unwrap();

        assert_eq!(stats.dimension, 384);
        assert_eq!(stats.total_vector_count, 250);
        assert_eq!(stats.namespaces[""].vector_count, 250);
    }

    #[tokio::test]
    async fn error_status_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("Vector dimension 2 does not match 384"),
            )
            .mount(&server)
            .await;

        let error = backend(&server, "")
            .await
            .query(vec![0.1, 0.2], 5, QueryOptions::new())
            .await
            .unwrap_err();

        match error {
            VectorError::Api { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("does not match"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn resolves_host_through_control_plane() {
        let data = MockServer::start().await;
        let control = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/indexes/products"))
            .and(header("api-key", "pc-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "products",
                "dimension": 384,
                "host": data.uri()
            })))
            .expect(1)
            .mount(&control)
            .await;

        let config = PineconeConfig::new("pc-test", "products").with_control_url(control.uri());
        let backend = PineconeBackend::new(&config).await.unwrap();

        assert_eq!(backend.host().as_str(), format!("{}/", data.uri()));
    }

    #[tokio::test]
    async fn missing_index_is_reported() {
        let control = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&control)
            .await;

        let config = PineconeConfig::new("pc-test", "missing").with_control_url(control.uri());
        let error = PineconeBackend::new(&config).await.unwrap_err();

        assert!(matches!(error, VectorError::IndexNotFound(name) if name == "missing"));
    }
}
