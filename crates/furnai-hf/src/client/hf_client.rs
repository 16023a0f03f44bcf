//! Hugging Face client implementation.

use reqwest::{Client as HttpClient, ClientBuilder, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{HfConfig, HfCredentials};
use crate::{Error, Result, TRACING_TARGET_CLIENT};

/// Body of a feature-extraction request.
#[derive(Debug, Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: &'a str,
}

/// Body of a feature-extraction response.
///
/// Sentence-transformers models answer with a batch of vectors even for a
/// single input; text-embeddings-inference servers may answer with the
/// vector alone.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeatureExtractionResponse {
    Batch(Vec<Vec<f32>>),
    Single(Vec<f32>),
}

impl FeatureExtractionResponse {
    fn into_embedding(self) -> Option<Vec<f32>> {
        match self {
            Self::Batch(batch) => batch.into_iter().next(),
            Self::Single(vector) if !vector.is_empty() => Some(vector),
            Self::Single(_) => None,
        }
    }
}

/// Client for the Hugging Face inference API.
#[derive(Debug, Clone)]
pub struct HfClient {
    http_client: HttpClient,
    base_url: Url,
    config: HfConfig,
    credentials: HfCredentials,
}

impl HfClient {
    /// Create a new client with the given configuration and credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be created.
    pub fn new(config: HfConfig, credentials: HfCredentials) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            base_url = %config.base_url,
            model = %config.model,
            "Creating Hugging Face client"
        );

        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::invalid_config(format!("Invalid base URL: {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            config,
            credentials,
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &HfConfig {
        &self.config
    }

    /// Get the credentials type (for debugging/logging purposes only).
    pub fn credentials_type(&self) -> &'static str {
        match &self.credentials {
            HfCredentials::BearerToken(_) => "bearer_token",
            HfCredentials::None => "none",
        }
    }

    /// Runs the feature-extraction pipeline on a single text.
    ///
    /// A non-success status is returned as [`Error::Api`] carrying the
    /// response body verbatim.
    pub async fn feature_extraction(&self, text: &str) -> Result<Vec<f32>> {
        let path = self.config.pipeline_path();
        let response = self
            .request(Method::POST, &path)?
            .json(&FeatureExtractionRequest { inputs: text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(
                target: TRACING_TARGET_CLIENT,
                status = status.as_u16(),
                body = %body,
                "Feature extraction failed"
            );

            return Err(Error::api_error(status.as_u16(), body));
        }

        let parsed: FeatureExtractionResponse = response.json().await?;
        parsed
            .into_embedding()
            .ok_or_else(|| Error::Response("no embedding in response".to_string()))
    }

    /// Add authentication headers to a request.
    fn add_auth_headers(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            HfCredentials::BearerToken(token) => request.bearer_auth(token),
            HfCredentials::None => request,
        }
    }

    /// Create a new request builder with base configuration.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| Error::invalid_config(format!("Invalid request URL: {e}")))?;

        let request = self.http_client.request(method, url);
        Ok(self.add_auth_headers(request))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer, credentials: HfCredentials) -> HfClient {
        let config = HfConfig::builder()
            .with_base_url(server.uri())
            .with_model("sentence-transformers/all-MiniLM-L6-v2")
            .build()
            .expect("valid config");

        HfClient::new(config, credentials).expect("valid client")
    }

    #[tokio::test]
    async fn sends_bearer_token_and_inputs() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(
                "/pipeline/feature-extraction/sentence-transformers/all-MiniLM-L6-v2",
            ))
            .and(header("authorization", "Bearer hf_test"))
            .and(body_json(serde_json::json!({ "inputs": "oak dining table" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![vec![0.1f32, 0.2, 0.3]]))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, HfCredentials::bearer_token("hf_test"));
        let vector = client.feature_extraction("oak dining table").await.unwrap();

        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn accepts_flat_vector() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![0.5f32, -0.5]))
            .mount(&server)
            .await;

        let client = client(&server, HfCredentials::none());
        let vector = client.feature_extraction("lamp").await.unwrap();

        assert_eq!(vector, vec![0.5, -0.5]);
    }

    #[tokio::test]
    async fn surfaces_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_string(r#"{"error":"Model is currently loading"}"#),
            )
            .mount(&server)
            .await;

        let client = client(&server, HfCredentials::bearer_token("hf_test"));
        let error = client.feature_extraction("sofa").await.unwrap_err();

        match error {
            Error::Api { status, body } => {
                assert_eq!(status, 503);
                assert!(body.contains("Model is currently loading"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_batch_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<Vec<f32>>::new()))
            .mount(&server)
            .await;

        let client = client(&server, HfCredentials::none());
        let error = client.feature_extraction("rug").await.unwrap_err();

        assert!(matches!(error, Error::Response(_)));
    }

    #[test]
    fn base_url_with_path_keeps_prefix() {
        let config = HfConfig::builder()
            .with_base_url("http://localhost:8080/hf")
            .build()
            .expect("valid config");
        let client = HfClient::new(config, HfCredentials::none()).unwrap();

        let request = client
            .request(Method::POST, "pipeline/feature-extraction/m")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/hf/pipeline/feature-extraction/m"
        );
        assert_eq!(client.credentials_type(), "none");
    }
}
