use crate::core::ResourceClient;
use crate::domain::model::HttpResponse;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::Client;
use std::time::Duration;

const CONTENT_TYPE_JSON: &str = "application/json";

/// reqwest 的 Client 內部以 Arc 共用連線池，可安全地跨請求重用
#[derive(Debug, Clone)]
pub struct HttpResourceClient {
    client: Client,
}

impl HttpResourceClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        tracing::debug!("Sending request to {}", url);

        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        tracing::debug!("Response status {} ({} bytes) from {}", status, body.len(), url);

        Ok(HttpResponse { body, status })
    }
}
