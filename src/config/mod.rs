#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::{MigrationError, Result};
use crate::utils::validation::{
    validate_brokers, validate_compression, validate_range, validate_socket_addr, validate_url,
};

pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_COMPRESSION: &str = "snappy";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const MAX_TIMEOUT_SECS: u64 = 300;

/// 所有設定來源共用的檢查
pub fn validate_settings<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url("base_url", config.base_url())?;
    validate_brokers("brokers", config.brokers())?;

    if config.topic().trim().is_empty() {
        return Err(MigrationError::MissingConfigError {
            field: "topic".to_string(),
        });
    }

    validate_compression("compression", config.compression())?;
    validate_socket_addr("bind", config.bind_addr())?;
    validate_range(
        "request_timeout_secs",
        config.request_timeout().as_secs(),
        1,
        MAX_TIMEOUT_SECS,
    )?;
    validate_range(
        "send_timeout_secs",
        config.send_timeout().as_secs(),
        1,
        MAX_TIMEOUT_SECS,
    )?;

    tracing::debug!("Configuration validation passed");
    Ok(())
}
