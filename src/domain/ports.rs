use crate::domain::model::{HttpResponse, OutboundMessage, Record, ResourceKind};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// 單次 GET；只有連線層級的錯誤才回傳 Err，狀態碼由呼叫端判斷
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_all(
        &self,
        kind: ResourceKind,
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>>;
}

#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, message: &OutboundMessage) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn brokers(&self) -> &[String];
    fn topic(&self) -> &str;
    fn compression(&self) -> &str;
    fn bind_addr(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn send_timeout(&self) -> Duration;
}
