use crate::utils::error::{MigrationError, Result};
use std::net::SocketAddr;
use url::Url;

pub const SUPPORTED_COMPRESSION: &[&str] = &["none", "gzip", "snappy", "lz4", "zstd"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(MigrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MigrationError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MigrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// 每個 broker 都必須是 host:port 格式
pub fn validate_brokers(field_name: &str, brokers: &[String]) -> Result<()> {
    if brokers.is_empty() {
        return Err(MigrationError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for broker in brokers {
        let valid = match broker.trim().rsplit_once(':') {
            Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
            None => false,
        };

        if !valid {
            return Err(MigrationError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: broker.clone(),
                reason: "Broker must be in host:port format".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_compression(field_name: &str, codec: &str) -> Result<()> {
    if !SUPPORTED_COMPRESSION.contains(&codec) {
        return Err(MigrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: codec.to_string(),
            reason: format!(
                "Unsupported compression. Valid values: {}",
                SUPPORTED_COMPRESSION.join(", ")
            ),
        });
    }
    Ok(())
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<()> {
    addr.parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|e| MigrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(MigrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
