use reqwest::blocking::Client;
use tracing::debug;

use crate::app::ports::PageFetcher;
use crate::config::Config;
use crate::error::{Result, ScraperError};

/// Blocking HTTP GET with the configured timeout; any non-success status is an error.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "GET");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text()?;
        debug!(url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
