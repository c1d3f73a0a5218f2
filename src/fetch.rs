use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use crate::config::FetchConfig;
use crate::error::Error;

/// Source of page markup. The HTTP surface and the CLI only see this trait.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, Error>;
}

/// Fetches pages over HTTP(S), following redirects.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(cfg: &FetchConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .user_agent(cfg.user_agent.as_str())
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client, max_body_bytes: cfg.max_body_bytes })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, Error> {
        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            debug!("{} answered {}", url, status);
            return Err(Error::Status(status.as_u16()));
        }
        if response.content_length().is_some_and(|len| len > self.max_body_bytes as u64) {
            return Err(Error::BodyTooLarge { limit: self.max_body_bytes });
        }

        // Content-Length can be absent or wrong; enforce the limit while reading
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(Error::BodyTooLarge { limit: self.max_body_bytes });
            }
            body.extend_from_slice(&chunk);
        }
        debug!("fetched {} bytes from {}", body.len(), url);
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
