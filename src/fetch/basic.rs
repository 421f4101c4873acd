use std::time::Duration;

use super::client::HttpClient;
use async_trait::async_trait;

pub struct BasicClient(reqwest::Client);

impl BasicClient {
    /// Builds a client with the request and connect timeouts used for both providers.
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
