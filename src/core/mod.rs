pub mod fetcher;
pub mod migration;

pub use crate::domain::model::{MigrationResult, OutboundMessage, Record, ResourceKind};
pub use crate::domain::ports::{ConfigProvider, Fetcher, Publisher, ResourceClient};
pub use crate::utils::error::Result;
