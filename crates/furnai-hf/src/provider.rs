//! Embedding provider implementation for the Hugging Face client.

use std::time::Instant;

use furnai_core::emb::EmbeddingProvider;
use furnai_core::{Error, ServiceHealth};

use crate::{HfClient, TRACING_TARGET_PROVIDER};

/// Text embedded by the health check.
const HEALTH_PROBE: &str = "health check";

#[async_trait::async_trait]
impl EmbeddingProvider for HfClient {
    async fn embed(&self, text: &str) -> furnai_core::Result<Vec<f32>> {
        if text.is_empty() {
            return Err(Error::invalid_input().with_message("Cannot embed empty text"));
        }

        tracing::debug!(
            target: TRACING_TARGET_PROVIDER,
            model = %self.config().model,
            "Requesting embedding"
        );

        let vector = self.feature_extraction(text).await?;
        Ok(vector)
    }

    async fn health_check(&self) -> furnai_core::Result<ServiceHealth> {
        let started_at = Instant::now();

        let health = match self.feature_extraction(HEALTH_PROBE).await {
            Ok(_) => ServiceHealth::healthy(),
            Err(error) => ServiceHealth::unhealthy(error.to_string()),
        };

        Ok(health.with_response_time(started_at.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use furnai_core::ErrorKind;
    use furnai_core::emb::EmbeddingService;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::{HfConfig, HfCredentials};

    use super::*;

    async fn service(status: u16, body: serde_json::Value) -> (MockServer, EmbeddingService) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;

        let config = HfConfig::builder()
            .with_base_url(server.uri())
            .build()
            .expect("valid config");
        let client = HfClient::new(config, HfCredentials::bearer_token("hf_test")).unwrap();

        (server, EmbeddingService::new(client))
    }

    #[tokio::test]
    async fn embeds_through_service() {
        let (_server, service) = service(200, serde_json::json!([[1.0, 2.0]])).await;
        assert_eq!(service.embed("bed frame").await.unwrap(), vec![1.0, 2.0]);
    }

    #[tokio::test]
    async fn upstream_failure_is_external_error() {
        let (_server, service) = service(500, serde_json::json!({ "error": "boom" })).await;
        let error = service.embed("bed frame").await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::ExternalError);
        assert!(error.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn health_reports_unhealthy_on_failure() {
        let (_server, service) = service(401, serde_json::json!({ "error": "bad token" })).await;
        let health = service.health_check().await.unwrap();

        assert!(!health.is_healthy());
        assert!(health.response.is_some());
    }
}
