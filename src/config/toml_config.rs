use crate::config::{
    validate_settings, DEFAULT_BASE_URL, DEFAULT_BIND_ADDR, DEFAULT_COMPRESSION,
    DEFAULT_TIMEOUT_SECS,
};
use crate::core::ConfigProvider;
use crate::utils::error::{MigrationError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    pub broker: BrokerConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    #[serde(deserialize_with = "string_or_list")]
    pub brokers: Vec<String>,
    pub topic: String,
    pub compression: Option<String>,
    pub send_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_bind() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

/// broker 清單可寫成陣列，或是像 KAFKA_BROKERS 一樣以逗號分隔的字串
fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Brokers {
        List(Vec<String>),
        Csv(String),
    }

    let brokers = match Brokers::deserialize(deserializer)? {
        Brokers::List(list) => list,
        Brokers::Csv(csv) => csv.split(',').map(str::to_string).collect(),
    };

    Ok(brokers
        .into_iter()
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .collect())
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MigrationError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MigrationError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${KAFKA_BROKERS})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MigrationError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.source.base_url
    }

    fn brokers(&self) -> &[String] {
        &self.broker.brokers
    }

    fn topic(&self) -> &str {
        &self.broker.topic
    }

    fn compression(&self) -> &str {
        self.broker
            .compression
            .as_deref()
            .unwrap_or(DEFAULT_COMPRESSION)
    }

    fn bind_addr(&self) -> &str {
        &self.server.bind
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.source
                .request_timeout_secs
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    fn send_timeout(&self) -> Duration {
        Duration::from_secs(
            self.broker
                .send_timeout_secs
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}
