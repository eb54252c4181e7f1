use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;

/// How reconstructed dates are written back onto a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStorage {
    /// `YYYY-MM-DD`, `HH:MM:SS` and `YYYY-MM-DD HH:MM:SS` text.
    #[default]
    Iso,
    /// Unix timestamp in seconds (UTC).
    Timestamp,
}

/// What to do when submitted date or time parts do not form a valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidDatePolicy {
    /// Fail the submission with `BindError::InvalidDate` / `BindError::InvalidTime`.
    #[default]
    Reject,
    /// Replace the value with the current date/time and log a warning.
    CoerceToNow,
}

/// Settings shared by form assembly and submission binding.
///
/// Build it once and pass it by reference. Every field has a default, so a
/// JSON file only needs to name the settings it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Default label field for relation option lists.
    pub select_display_field: Option<String>,
    /// Default sort field for relation option lists.
    pub select_order_field: Option<String>,
    pub date_element_format: String,
    pub time_element_format: String,
    pub datetime_element_format: String,
    pub date_storage: DateStorage,
    pub add_form_header: bool,
    pub form_header_text: Option<String>,
    pub submit_text: String,
    pub rule_violation_message: String,
    /// `{label}` is replaced by the field label.
    pub required_rule_message: String,
    pub validate_on_process: bool,
    pub invalid_date_policy: InvalidDatePolicy,
    /// Render date, time, date-time and boolean fields as textareas instead of typed widgets.
    pub collapse_untyped_fields: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            select_display_field: None,
            select_order_field: None,
            date_element_format: "d-m-Y".to_string(),
            time_element_format: "H:i:s".to_string(),
            datetime_element_format: "d-m-Y H:i:s".to_string(),
            date_storage: DateStorage::Iso,
            add_form_header: true,
            form_header_text: None,
            submit_text: "Submit".to_string(),
            rule_violation_message: "The value you have entered is not valid.".to_string(),
            required_rule_message: "The field {label} is required.".to_string(),
            validate_on_process: false,
            invalid_date_policy: InvalidDatePolicy::Reject,
            collapse_untyped_fields: false,
        }
    }
}

impl FormConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::JsonParseError(e.to_string()))
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    pub fn with_display_field(mut self, field: impl Into<String>) -> Self {
        self.select_display_field = Some(field.into());
        self
    }

    pub fn with_order_field(mut self, field: impl Into<String>) -> Self {
        self.select_order_field = Some(field.into());
        self
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_on_process = enabled;
        self
    }

    pub fn with_invalid_date_policy(mut self, policy: InvalidDatePolicy) -> Self {
        self.invalid_date_policy = policy;
        self
    }

    pub fn with_date_storage(mut self, storage: DateStorage) -> Self {
        self.date_storage = storage;
        self
    }

    pub(crate) fn required_message(&self, label: &str) -> String {
        self.required_rule_message.replace("{label}", label)
    }
}
