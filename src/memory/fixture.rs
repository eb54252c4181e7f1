use super::{MemoryRecord, MemoryStore};
use crate::config::FormConfig;
use crate::error::ConfigError;
use crate::schema::FormHints;
use serde::{Deserialize, Serialize};
use std::fs;

/// A record, its relation targets and the settings to build its form with,
/// as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub config: FormConfig,
    pub record: MemoryRecord,
    pub tables: MemoryStore,
    /// Caller overrides layered over the record's own hints.
    pub hints: FormHints,
}

impl Fixture {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::JsonParseError(e.to_string()))
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }
}
