//! HTTP transport to the speaker backend.
//!
//! The coordinator talks to the backend only through [`Transport`], so tests
//! and alternative clients can substitute their own implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::TransportError;
use crate::protocol::{ApiReply, ApiRequest, Method};

/// Sends one request and returns the raw reply.
///
/// Implementations report any HTTP status as `Ok`; only failures to obtain a
/// reply at all are errors.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, TransportError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TransportError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                base_url,
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request {
                url: base_url.to_string(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, TransportError> {
        let url = self.url_for(request.path);
        debug!(request = %request.describe(), %url, "sending request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                TransportError::Timeout { url: url.clone() }
            } else {
                TransportError::Request {
                    url: url.clone(),
                    message: e.to_string(),
                }
            }
        };

        let response = builder.send().await.map_err(map_err)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_err)?;

        debug!(request = %request.describe(), status, bytes = body.len(), "received reply");
        Ok(ApiReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GroupSelector;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::net::Ipv4Addr;

    fn transport_for(server: &MockServer) -> HttpTransport {
        HttpTransport::new(&server.base_url(), Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(HttpTransport::new("not a url", Duration::from_secs(1)).is_err());
        assert!(HttpTransport::new("ftp://host", Duration::from_secs(1)).is_err());
        let t = HttpTransport::new("http://localhost:8888/", Duration::from_secs(1)).unwrap();
        assert_eq!(t.base_url(), "http://localhost:8888");
    }

    #[tokio::test]
    async fn test_get_speakers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/speakers");
                then.status(200).body(r#"[{"name":"Kitchen","ip":"10.0.0.1"}]"#);
            })
            .await;

        let reply = transport_for(&server)
            .send(ApiRequest::list_speakers())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(reply.status, 200);
        assert!(reply.body.contains("Kitchen"));
    }

    #[tokio::test]
    async fn test_add_speaker_sends_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/addSpeaker")
                    .query_param("ip", "192.168.1.50")
                    .query_param("name", "Living Room");
                then.status(500).json_body(json!({"message": "busy"}));
            })
            .await;

        let reply = transport_for(&server)
            .send(ApiRequest::add_speaker(
                Ipv4Addr::new(192, 168, 1, 50),
                Some("Living Room"),
            ))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(reply.status, 500);
    }

    #[tokio::test]
    async fn test_group_sends_json_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/group")
                    .json_body(json!({"speakerName": ["Kitchen", "Den"]}));
                then.status(200).body("OK");
            })
            .await;

        let names = vec!["Kitchen".to_string(), "Den".to_string()];
        let reply = transport_for(&server)
            .send(ApiRequest::group(&names))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(reply, ApiReply::new(200, "OK"));
    }

    #[tokio::test]
    async fn test_ungroup_named() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/ungroup")
                    .query_param("group_name", "Up stairs");
                then.status(200).body("Ungrouped");
            })
            .await;

        let reply = transport_for(&server)
            .send(ApiRequest::ungroup(&GroupSelector::Named(
                "Up stairs".to_string(),
            )))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(reply.body, "Ungrouped");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Nothing listens on port 9 locally.
        let transport = HttpTransport::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let result = transport.send(ApiRequest::status()).await;
        assert!(matches!(
            result,
            Err(TransportError::Request { .. }) | Err(TransportError::Timeout { .. })
        ));
    }
}
