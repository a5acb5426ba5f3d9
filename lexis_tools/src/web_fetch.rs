use anyhow::{Context, Result};
use async_trait::async_trait;
use lexis_core::{FetchError, Fetcher};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// HTTP fetcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebFetchConfig {
    /// Request timeout (seconds)
    #[serde(default = "WebFetchConfig::default_timeout")]
    pub timeout: u64,

    /// User-Agent header
    #[serde(default = "WebFetchConfig::default_user_agent")]
    pub user_agent: String,

    /// Maximum response size (bytes)
    #[serde(default = "WebFetchConfig::default_max_size")]
    pub max_size: usize,
}

impl WebFetchConfig {
    const fn default_timeout() -> u64 {
        10
    }

    fn default_user_agent() -> String {
        "Mozilla/5.0 (compatible; lexis/1.0)".to_string()
    }

    const fn default_max_size() -> usize {
        4_000_000 // 4MB, room for uncompressed audio clips
    }
}

impl Default for WebFetchConfig {
    fn default() -> Self {
        Self {
            timeout: Self::default_timeout(),
            user_agent: Self::default_user_agent(),
            max_size: Self::default_max_size(),
        }
    }
}

/// Shared HTTP client used by every source and by audio downloads.
pub struct HttpFetcher {
    client: Client,
    config: WebFetchConfig,
}

impl HttpFetcher {
    pub fn new(config: WebFetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        // Only support HTTP/HTTPS
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                message: "only http and https URLs are supported".to_string(),
            });
        }

        debug!("GET {url}");
        let response = self
            .client
            .get(parsed)
            .header("User-Agent", &self.config.user_agent)
            .send()
            .await
            .map_err(|e| classify(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if bytes.len() > self.config.max_size {
            return Err(FetchError::Body {
                url: url.to_string(),
                message: format!(
                    "response too large: {} bytes (max: {})",
                    bytes.len(),
                    self.config.max_size
                ),
            });
        }

        Ok(bytes.to_vec())
    }
}

/// Connection and timeout failures mean the network is unreachable; the
/// cascade treats those as a signal to stop going online.
fn classify(url: &str, e: &reqwest::Error) -> FetchError {
    if e.is_builder() {
        FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        }
    } else if e.is_connect() || e.is_timeout() {
        FetchError::Connectivity {
            url: url.to_string(),
            message: e.to_string(),
        }
    } else {
        FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let bytes = self.get(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.get(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_fetch_config_default() {
        let config = WebFetchConfig::default();
        assert_eq!(config.timeout, 10);
        assert_eq!(config.max_size, 4_000_000);
        assert!(config.user_agent.contains("lexis"));
    }

    #[test]
    fn test_http_fetcher_new() {
        assert!(HttpFetcher::new(WebFetchConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let Ok(fetcher) = HttpFetcher::new(WebFetchConfig::default()) else {
            panic!("Failed to create HttpFetcher");
        };
        let result = fetcher.fetch_text("not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_unsupported_scheme() {
        let Ok(fetcher) = HttpFetcher::new(WebFetchConfig::default()) else {
            panic!("Failed to create HttpFetcher");
        };
        let result = fetcher.fetch_bytes("ftp://example.com/cloud.wav").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_refused_connection_is_connectivity() {
        let Ok(fetcher) = HttpFetcher::new(WebFetchConfig {
            timeout: 2,
            ..WebFetchConfig::default()
        }) else {
            panic!("Failed to create HttpFetcher");
        };
        let Err(err) = fetcher.fetch_text("http://127.0.0.1:9/").await else {
            panic!("nothing listens on the discard port");
        };
        assert!(err.is_connectivity());
    }
}
