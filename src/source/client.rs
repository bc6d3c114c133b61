//! Asset History REST Client
//!
//! HTTP client for the asset details endpoint. One `GET`, no parameters,
//! no retries.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::error::FetchError;
use super::SeriesSource;
use crate::series::RawPayload;

/// Default asset details endpoint
pub const DEFAULT_SOURCE_URL: &str =
    "https://api.multifarm.fi/jay_flamingo_random_6ix_vegas/get_asset_details/ETH_Convex_steth";

/// Configuration for the history client
#[derive(Debug, Clone)]
pub struct AssetClientConfig {
    /// Full URL of the asset details endpoint
    pub url: String,
    /// Request timeout in seconds, `0` waits indefinitely
    pub request_timeout_secs: u64,
}

impl Default for AssetClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// REST client for the asset history endpoint
pub struct AssetClient {
    client: Client,
    config: AssetClientConfig,
}

impl AssetClient {
    /// Create a new client with the given configuration
    pub fn new(config: AssetClientConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &AssetClientConfig {
        &self.config
    }
}

#[async_trait]
impl SeriesSource for AssetClient {
    async fn fetch(&self) -> Result<RawPayload, FetchError> {
        tracing::debug!(url = %self.config.url, "Fetching asset history");

        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(status = %status, error = %e, "Failed to read error body");
                    String::new()
                }
            };
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await.map_err(FetchError::from_transport)?;
        let payload = RawPayload::from_json(&body)?;

        tracing::info!(
            farm = %payload.farm,
            asset = %payload.asset,
            points = payload.tvl_staked_history.len(),
            "Fetched asset history"
        );

        Ok(payload)
    }

    fn describe(&self) -> String {
        self.config.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    const PAYLOAD: &str = r#"{
        "farm": "Convex",
        "asset": "ETH_Convex_steth",
        "tvlStakedHistory": [
            {"date": "2024-01-02T00:00:00Z", "value": 5},
            {"date": "2024-01-01T00:00:00Z", "value": 3}
        ]
    }"#;

    /// Serve `router` on an ephemeral local port and return its base URL
    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(url: String) -> AssetClient {
        AssetClient::new(AssetClientConfig {
            url,
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = AssetClientConfig::default();
        assert_eq!(config.url, DEFAULT_SOURCE_URL);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_zero_timeout_builds() {
        let client = AssetClient::new(AssetClientConfig {
            url: "http://localhost".to_string(),
            request_timeout_secs: 0,
        })
        .unwrap();
        assert_eq!(client.describe(), "http://localhost");
    }

    #[tokio::test]
    async fn test_fetch_payload() {
        let base = spawn_server(Router::new().route("/asset", get(|| async { PAYLOAD }))).await;
        let client = client_for(format!("{}/asset", base));

        let payload = client.fetch().await.unwrap();
        assert_eq!(payload.farm, "Convex");
        assert_eq!(payload.tvl_staked_history.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let base = spawn_server(Router::new().route(
            "/asset",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        ))
        .await;
        let client = client_for(format!("{}/asset", base));

        match client.fetch().await {
            Err(FetchError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_error_status_with_truncated_body() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // Promises 64 bytes of body, sends 7, then hangs up
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 502 Bad Gateway\r\ncontent-length: 64\r\n\r\npartial")
                .await;
            let _ = socket.shutdown().await;
        });

        let client = client_for(format!("http://{}/asset", addr));
        match client.fetch().await {
            Err(FetchError::Status { status, message }) => {
                assert_eq!(status, 502);
                assert!(message.is_empty());
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let base =
            spawn_server(Router::new().route("/asset", get(|| async { "<html></html>" }))).await;
        let client = client_for(format!("{}/asset", base));

        assert!(matches!(client.fetch().await, Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}/asset", addr));
        assert!(matches!(client.fetch().await, Err(FetchError::Unavailable)));
    }
}
