//! HTTP client for making requests to torrent sites

use crate::config::OutgoingSettings;
use anyhow::{anyhow, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// HTTP client wrapper shared by all providers
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(settings.request_timeout()?)
            .gzip(true)
            .brotli(true);

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            user_agent: settings.user_agent.clone(),
        })
    }

    /// GET a URL and return the response body as text
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.send_get(url).await?;
        Ok(response.text().await?)
    }

    /// GET a URL and deserialize the JSON response body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let text = self.get_text(url).await?;
        serde_json::from_str(&text)
            .map_err(|e| anyhow!("Couldn't unmarshal response body from {}: {}", url, e))
    }

    async fn send_get(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json, text/html;q=0.9, */*;q=0.8")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP error: {} for {}", status.as_u16(), url));
        }
        Ok(response)
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_infinite_request_timeout_is_error() {
        let settings = OutgoingSettings {
            request_timeout: f64::INFINITY,
            ..Default::default()
        };
        let err = HttpClient::with_settings(&settings).err().unwrap();
        assert!(err.to_string().contains("outgoing.request_timeout"));
    }

    #[tokio::test]
    async fn test_get_json_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .and(header("User-Agent", "test-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .mount(&server)
            .await;

        let settings = OutgoingSettings {
            user_agent: "test-agent".to_string(),
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();
        let body: serde_json::Value = client
            .get_json(&format!("{}/data", server.uri()))
            .await
            .unwrap();

        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let err = client.get_text(&server.uri()).await.unwrap_err();

        assert!(err.to_string().contains("HTTP error: 503"));
    }
}
