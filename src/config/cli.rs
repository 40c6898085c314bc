use crate::config::{validate_settings, DEFAULT_BASE_URL, DEFAULT_BIND_ADDR, DEFAULT_COMPRESSION};
use crate::core::{ConfigProvider, ResourceKind};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "character-migration")]
#[command(about = "Republish Rick and Morty API records to a Kafka topic")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(long, env = "RICK_AND_MORTY_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "KAFKA_BROKERS", value_delimiter = ',')]
    pub brokers: Vec<String>,

    #[arg(long, env = "KAFKA_TOPIC")]
    pub topic: Option<String>,

    #[arg(long, env = "KAFKA_COMPRESSION", default_value = DEFAULT_COMPRESSION)]
    pub compression: String,

    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "SEND_TIMEOUT_SECS", default_value_t = 10)]
    pub send_timeout_secs: u64,

    /// Load settings from a TOML file instead of flags and environment
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the HTTP migration triggers (default)
    Serve,
    /// Run a single migration in the foreground and exit
    Migrate {
        /// character or location
        kind: ResourceKind,
    },
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn brokers(&self) -> &[String] {
        &self.brokers
    }

    fn topic(&self) -> &str {
        self.topic.as_deref().unwrap_or_default()
    }

    fn compression(&self) -> &str {
        &self.compression
    }

    fn bind_addr(&self) -> &str {
        &self.bind
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = CliConfig::try_parse_from([
            "character-migration",
            "--base-url",
            "http://localhost:3000/api",
            "--brokers",
            "kafka-1:9092,kafka-2:9092",
            "--topic",
            "rick-and-morty",
            "migrate",
            "location",
        ])
        .unwrap();

        assert_eq!(config.base_url(), "http://localhost:3000/api");
        assert_eq!(config.brokers(), ["kafka-1:9092", "kafka-2:9092"]);
        assert_eq!(config.topic(), "rick-and-morty");
        assert_eq!(config.compression(), "snappy");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(matches!(
            config.command(),
            Command::Migrate {
                kind: ResourceKind::Location
            }
        ));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_command_is_serve() {
        let config = CliConfig::try_parse_from([
            "character-migration",
            "--brokers",
            "localhost:9092",
            "--topic",
            "records",
        ])
        .unwrap();

        assert!(matches!(config.command(), Command::Serve));
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_topic_fails_validation() {
        let config = CliConfig::try_parse_from([
            "character-migration",
            "--brokers",
            "localhost:9092",
            "--topic",
            "",
        ])
        .unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let result = CliConfig::try_parse_from(["character-migration", "migrate", "episode"]);
        assert!(result.is_err());
    }
}
