use std::time::Duration;

use reqwest::Client;

use super::error::XkcdError;
use super::types::Comic;

const API_URL: &str = "https://xkcd.com";

pub struct XkcdClient {
    client: Client,
    base_url: String,
}

impl XkcdClient {
    pub fn new() -> Self {
        Self::with_base_url(API_URL.to_string())
    }

    /// Create a client pointing at a custom base URL (useful for testing).
    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self { client, base_url }
    }

    /// Fetch a comic: the newest one when `number` is `None`, otherwise the
    /// comic with that exact number.
    pub async fn get(&self, number: Option<u32>) -> Result<Comic, XkcdError> {
        let url = match number {
            Some(n) => format!("{}/{}/info.0.json", self.base_url, n),
            None => format!("{}/info.0.json", self.base_url),
        };

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(XkcdError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let comic = response.json::<Comic>().await?;
        Ok(comic)
    }
}

impl Default for XkcdClient {
    fn default() -> Self {
        Self::new()
    }
}
