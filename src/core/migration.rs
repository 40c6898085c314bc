use crate::core::{Fetcher, Publisher, ResourceKind};
use crate::domain::model::{MigrationResult, OutboundMessage, PublishFailure};
use crate::utils::error::{MigrationError, Result};
use tokio_util::sync::CancellationToken;

pub struct MigrationEngine<F: Fetcher, P: Publisher> {
    fetcher: F,
    publisher: P,
}

impl<F: Fetcher, P: Publisher> MigrationEngine<F, P> {
    pub fn new(fetcher: F, publisher: P) -> Self {
        Self { fetcher, publisher }
    }

    /// 抓取全部資料後逐筆發送；單筆發送失敗只記錄，不中斷迴圈
    pub async fn migrate(
        &self,
        kind: ResourceKind,
        cancel: &CancellationToken,
    ) -> Result<MigrationResult> {
        tracing::info!("Starting {} migration", kind);

        let records = self.fetcher.fetch_all(kind, cancel).await?;
        let total = records.len();
        let mut result = MigrationResult::default();

        for (index, record) in records.into_iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::warn!(
                    "{} migration cancelled after {} of {} records",
                    kind,
                    index,
                    total
                );
                return Err(MigrationError::Cancelled {
                    stage: format!("publishing {} record {} of {}", kind, index + 1, total),
                });
            }

            let message = OutboundMessage::for_record(kind, record);
            match self.publisher.publish(&message).await {
                Ok(()) => result.published_count += 1,
                Err(e) => {
                    // key 已在 failure 本身，reason 只保留 broker 的錯誤訊息
                    let reason = match e {
                        MigrationError::Publish { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    let failure = PublishFailure {
                        key: message.key.clone(),
                        kind,
                        reason,
                    };
                    tracing::warn!("{}", failure);
                    result.failures.push(failure);
                }
            }
        }

        tracing::info!(
            "Finished {} migration: {} published, {} failed",
            kind,
            result.published_count,
            result.failures.len()
        );
        Ok(result)
    }
}
