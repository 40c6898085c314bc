use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Unable to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record with key {key} not published: {reason}")]
    Publish { key: String, reason: String },

    #[error("HTTP client error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Migration cancelled during {stage}")]
    Cancelled { stage: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Server error: {message}")]
    Server { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 上游 API 讀取失敗
    Fetch,
    /// 單筆訊息發送失敗
    Publish,
    Cancelled,
    Config,
    Runtime,
}

impl MigrationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MigrationError::Transport { .. }
            | MigrationError::Decode { .. }
            | MigrationError::Request(_) => ErrorCategory::Fetch,
            MigrationError::Publish { .. } | MigrationError::Kafka(_) => ErrorCategory::Publish,
            MigrationError::Cancelled { .. } => ErrorCategory::Cancelled,
            MigrationError::ConfigError { .. }
            | MigrationError::ConfigValidationError { .. }
            | MigrationError::InvalidConfigValueError { .. }
            | MigrationError::MissingConfigError { .. } => ErrorCategory::Config,
            MigrationError::IoError(_) | MigrationError::Server { .. } => ErrorCategory::Runtime,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Fetch => {
                "Check that the upstream API base URL is reachable and returns JSON pages"
            }
            ErrorCategory::Publish => {
                "Check that the Kafka brokers are reachable and the topic exists"
            }
            ErrorCategory::Cancelled => {
                "The migration was interrupted; trigger it again once the service is up"
            }
            ErrorCategory::Config => {
                "Review the command line flags, environment variables or TOML file"
            }
            ErrorCategory::Runtime => "Check the bind address and local system resources",
        }
    }
}

pub type Result<T> = std::result::Result<T, MigrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let transport = MigrationError::Transport {
            url: "http://api/character?page=1".to_string(),
            reason: "unexpected status 500".to_string(),
        };
        assert_eq!(transport.category(), ErrorCategory::Fetch);

        let decode = MigrationError::Decode {
            url: "http://api/character?page=1".to_string(),
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };
        assert_eq!(decode.category(), ErrorCategory::Fetch);

        let publish = MigrationError::Publish {
            key: "7".to_string(),
            reason: "broker down".to_string(),
        };
        assert_eq!(publish.category(), ErrorCategory::Publish);

        let missing = MigrationError::MissingConfigError {
            field: "topic".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_transport_error_names_url() {
        let err = MigrationError::Transport {
            url: "http://api/location?page=3".to_string(),
            reason: "connection refused".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("http://api/location?page=3"));
        assert!(message.contains("connection refused"));
    }
}
