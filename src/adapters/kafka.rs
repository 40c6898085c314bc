use crate::core::{OutboundMessage, Publisher};
use crate::utils::error::{MigrationError, Result};
use async_trait::async_trait;
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::ClientConfig;
use std::time::Duration;
use uuid::Uuid;

const SOCKET_TIMEOUT_MS: &str = "10000";

/// 已編碼、可直接交給 producer 的訊息
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedMessage {
    pub key: String,
    pub payload: Vec<u8>,
    pub headers: Vec<(String, String)>,
}

/// payload 以 JSON 編碼；header 依名稱排序以確保輸出穩定
pub fn encode_message(message: &OutboundMessage) -> Result<EncodedMessage> {
    let payload = serde_json::to_vec(&message.payload).map_err(|e| MigrationError::Publish {
        key: message.key.clone(),
        reason: format!("unable to encode payload: {}", e),
    })?;

    let mut headers: Vec<(String, String)> = message
        .headers
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    headers.sort();

    Ok(EncodedMessage {
        key: message.key.clone(),
        payload,
        headers,
    })
}

pub fn producer_config(
    brokers: &[String],
    compression: &str,
    send_timeout: Duration,
) -> ClientConfig {
    let mut config = ClientConfig::new();
    config
        .set("bootstrap.servers", brokers.join(","))
        .set("client.id", Uuid::new_v4().to_string())
        .set("compression.type", compression)
        .set("message.timeout.ms", send_timeout.as_millis().to_string())
        .set("socket.timeout.ms", SOCKET_TIMEOUT_MS);
    config
}

pub struct KafkaPublisher {
    producer: FutureProducer,
    topic: String,
    send_timeout: Duration,
}

impl KafkaPublisher {
    pub fn new(
        brokers: &[String],
        topic: &str,
        compression: &str,
        send_timeout: Duration,
    ) -> Result<Self> {
        let producer: FutureProducer =
            producer_config(brokers, compression, send_timeout).create()?;

        tracing::info!(
            "Kafka producer ready for topic '{}' on {}",
            topic,
            brokers.join(",")
        );

        Ok(Self {
            producer,
            topic: topic.to_string(),
            send_timeout,
        })
    }
}

#[async_trait]
impl Publisher for KafkaPublisher {
    async fn publish(&self, message: &OutboundMessage) -> Result<()> {
        let encoded = encode_message(message)?;

        let headers = encoded
            .headers
            .iter()
            .fold(OwnedHeaders::new(), |headers, (key, value)| {
                headers.insert(Header {
                    key: key.as_str(),
                    value: Some(value.as_str()),
                })
            });

        let record = FutureRecord::to(&self.topic)
            .key(encoded.key.as_str())
            .payload(encoded.payload.as_slice())
            .headers(headers);

        tracing::info!("Publishing message with key: {}", encoded.key);

        // 等待 broker 回報送達結果才返回
        let (partition, offset) = self
            .producer
            .send(record, self.send_timeout)
            .await
            .map_err(|(err, _)| MigrationError::Publish {
                key: encoded.key.clone(),
                reason: err.to_string(),
            })?;

        tracing::debug!(
            "Delivered key {} to {} [{}] at offset {}",
            encoded.key,
            self.topic,
            partition,
            offset
        );
        Ok(())
    }
}
