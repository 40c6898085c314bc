use crate::core::{Fetcher, Record, ResourceClient, ResourceKind};
use crate::domain::model::PageEnvelope;
use crate::domain::model::{Character, Location};
use crate::utils::error::{MigrationError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

const PAGE_PARAM: &str = "page";

/// 依照上游回傳的 `next` 游標逐頁抓取資料
pub struct DataFetcher<C: ResourceClient> {
    client: C,
    base_url: String,
}

impl<C: ResourceClient> DataFetcher<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn first_page_url(&self, kind: ResourceKind) -> String {
        format!(
            "{}{}?{}=1",
            self.base_url.trim_end_matches('/'),
            kind.path(),
            PAGE_PARAM
        )
    }

    async fn fetch_pages<T>(
        &self,
        kind: ResourceKind,
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>>
    where
        T: DeserializeOwned + Into<Record> + Send,
    {
        let mut records = Vec::new();
        let mut next_url = Some(self.first_page_url(kind));
        let mut pages = 0usize;

        while let Some(url) = next_url.take() {
            if cancel.is_cancelled() {
                return Err(MigrationError::Cancelled {
                    stage: format!("fetching {} page {}", kind, pages + 1),
                });
            }

            let body = self.fetch(&url).await?;
            let page: PageEnvelope<T> = serde_json::from_slice(&body)
                .map_err(|source| MigrationError::Decode {
                    url: url.clone(),
                    source,
                })?;

            pages += 1;
            tracing::debug!(
                "Fetched {} page {} with {} results",
                kind,
                pages,
                page.results.len()
            );

            next_url = page
                .info
                .next_cursor()
                .map(|next| resolve_next(&self.base_url, next));
            records.extend(page.results.into_iter().map(Into::into));
        }

        tracing::info!("Fetched {} {} records from {} pages", records.len(), kind, pages);
        Ok(records)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .await
            .map_err(|e| MigrationError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(MigrationError::Transport {
                url: url.to_string(),
                reason: format!("unexpected status {}", response.status),
            });
        }

        Ok(response.body)
    }
}

#[async_trait]
impl<C: ResourceClient> Fetcher for DataFetcher<C> {
    async fn fetch_all(
        &self,
        kind: ResourceKind,
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>> {
        match kind {
            ResourceKind::Character => self.fetch_pages::<Character>(kind, cancel).await,
            ResourceKind::Location => self.fetch_pages::<Location>(kind, cancel).await,
        }
    }
}

/// 絕對網址原樣使用；相對路徑接在 base URL 之後
pub fn resolve_next(base_url: &str, next: &str) -> String {
    if Url::parse(next).is_ok() {
        return next.to_string();
    }

    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        next.trim_start_matches('/')
    )
}
