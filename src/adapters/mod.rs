// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod kafka;

pub use http::HttpResourceClient;
pub use kafka::KafkaPublisher;
