//! HTTP Light Client Adapter
//!
//! Implements `LightClientTransport` over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::domain::DaError;
use crate::ports::outbound::LightClientTransport;

/// Connect timeout applied on top of the per-request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// reqwest-backed light client connection.
///
/// The body is handed back for every HTTP status because the light client
/// reports "Not found" and "Processing block" as plain-text bodies.
#[derive(Clone)]
pub struct HttpLightClient {
    client: Client,
}

impl HttpLightClient {
    /// Build a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, DaError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()?;
        Ok(Self { client })
    }

    async fn read_body(response: reqwest::Response) -> Result<String, DaError> {
        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await?;
        debug!(
            "[avail-da] {} answered {} ({} bytes)",
            url.path(),
            status,
            body.len()
        );
        Ok(body)
    }
}

#[async_trait]
impl LightClientTransport for HttpLightClient {
    async fn post_json(&self, url: Url, body: serde_json::Value) -> Result<String, DaError> {
        let response = self.client.post(url).json(&body).send().await?;
        Self::read_body(response).await
    }

    async fn get(&self, url: Url) -> Result<String, DaError> {
        let response = self.client.get(url).send().await?;
        Self::read_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_json_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/submit"))
            .and(body_json(serde_json::json!({"data": "YQ=="})))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let client = HttpLightClient::new(Duration::from_secs(5)).unwrap();
        let url = Url::parse(&format!("{}/v2/submit", server.uri())).unwrap();
        let body = client
            .post_json(url, serde_json::json!({"data": "YQ=="}))
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_error_status_still_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/blocks/7/data"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .mount(&server)
            .await;

        let client = HttpLightClient::new(Duration::from_secs(5)).unwrap();
        let url = Url::parse(&format!("{}/v2/blocks/7/data", server.uri())).unwrap();
        assert_eq!(client.get(url).await.unwrap(), "Not found");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = HttpLightClient::new(Duration::from_secs(1)).unwrap();
        let url = Url::parse("http://127.0.0.1:1/v2/submit").unwrap();
        let result = client.get(url).await;
        assert!(matches!(result, Err(DaError::Transport(_))));
    }
}
