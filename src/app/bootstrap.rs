use crate::adapters::{HttpResourceClient, KafkaPublisher};
use crate::core::fetcher::DataFetcher;
use crate::core::migration::MigrationEngine;
use crate::core::ConfigProvider;
use crate::utils::error::Result;

pub type DefaultEngine = MigrationEngine<DataFetcher<HttpResourceClient>, KafkaPublisher>;

/// 程式啟動時一次建立所有相依元件，之後以 Arc 共用
pub fn build_engine<C: ConfigProvider + ?Sized>(config: &C) -> Result<DefaultEngine> {
    tracing::info!(
        "Upstream: {} | Kafka brokers: {} | Kafka topic: {}",
        config.base_url(),
        config.brokers().join(","),
        config.topic()
    );

    let client = HttpResourceClient::new(config.request_timeout())?;
    let fetcher = DataFetcher::new(client, config.base_url());
    let publisher = KafkaPublisher::new(
        config.brokers(),
        config.topic(),
        config.compression(),
        config.send_timeout(),
    )?;

    Ok(MigrationEngine::new(fetcher, publisher))
}
