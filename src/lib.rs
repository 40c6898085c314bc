pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::TomlConfig;

pub use adapters::{HttpResourceClient, KafkaPublisher};
pub use self::core::{fetcher::DataFetcher, migration::MigrationEngine};
pub use domain::model::{MigrationResult, OutboundMessage, Record, ResourceKind};
pub use utils::error::{MigrationError, Result};
