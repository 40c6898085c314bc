use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 上游 API 支援的資源種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Character,
    Location,
}

impl ResourceKind {
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Character => "/character",
            ResourceKind::Location => "/location",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Character => "character",
            ResourceKind::Location => "location",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "character" | "characters" => Ok(ResourceKind::Character),
            "location" | "locations" => Ok(ResourceKind::Location),
            other => Err(format!("unknown resource kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub pages: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

impl PageInfo {
    /// `null`、缺少或空字串都代表最後一頁
    pub fn next_cursor(&self) -> Option<&str> {
        self.next.as_deref().filter(|next| !next.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageEnvelope<T> {
    pub info: PageInfo,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// 角色資料中 origin / location 的參照
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRef {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub species: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub origin: LocationRef,
    #[serde(default)]
    pub location: LocationRef,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub dimension: String,
    #[serde(default)]
    pub residents: Vec<String>,
    #[serde(default)]
    pub url: String,
    pub created: DateTime<Utc>,
}

/// 序列化時不加變體標籤，消費端看到的是上游原本的 JSON 結構
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Character(Character),
    Location(Location),
}

impl Record {
    pub fn id(&self) -> i64 {
        match self {
            Record::Character(character) => character.id,
            Record::Location(location) => location.id,
        }
    }

    pub fn key(&self) -> String {
        self.id().to_string()
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Record::Character(_) => ResourceKind::Character,
            Record::Location(_) => ResourceKind::Location,
        }
    }
}

impl From<Character> for Record {
    fn from(character: Character) -> Self {
        Record::Character(character)
    }
}

impl From<Location> for Record {
    fn from(location: Location) -> Self {
        Record::Location(location)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub body: Vec<u8>,
    pub status: u16,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

pub const HEADER_TYPE: &str = "Type";
pub const HEADER_SOURCE_ID: &str = "SourceId";

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub payload: Record,
    pub headers: HashMap<String, String>,
    pub key: String,
}

impl OutboundMessage {
    pub fn for_record(kind: ResourceKind, record: Record) -> Self {
        let key = record.key();
        let headers = HashMap::from([
            (HEADER_TYPE.to_string(), kind.as_str().to_string()),
            (HEADER_SOURCE_ID.to_string(), key.clone()),
        ]);

        Self {
            payload: record,
            headers,
            key,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishFailure {
    pub key: String,
    pub kind: ResourceKind,
    pub reason: String,
}

impl fmt::Display for PublishFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} with id: {} not published to kafka. error: {}",
            self.kind, self.key, self.reason
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationResult {
    pub published_count: usize,
    pub failures: Vec<PublishFailure>,
}

impl MigrationResult {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.published_count + self.failures.len()
    }
}
