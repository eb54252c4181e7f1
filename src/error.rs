use crate::value::{DateParts, TimeParts};
use itertools::Itertools;
use thiserror::Error;

/// Errors reported by a record or relation collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Record '{table}' has no field named '{field}'")]
    UnknownField { table: String, field: String },

    #[error("{operation} on '{table}' failed: {message}")]
    Persistence {
        table: String,
        operation: String,
        message: String,
    },

    #[error("Query on '{table}' failed: {message}")]
    Query { table: String, message: String },
}

/// Errors that can occur while binding submitted values back onto a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    #[error("Field '{field}' received {parts}, which is not a valid calendar date")]
    InvalidDate { field: String, parts: DateParts },

    #[error("Field '{field}' received {parts}, which is not a valid time of day")]
    InvalidTime { field: String, parts: TimeParts },

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Errors that can occur while loading a `FormConfig`.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Failed to parse configuration JSON: {0}")]
    JsonParseError(String),

    #[error("Could not read configuration file '{path}': {message}")]
    Io { path: String, message: String },
}

/// Non-fatal configuration and override problems found while assembling a form.
///
/// These never abort assembly. They are logged and collected on the finished
/// `FormSpec` so a caller can surface them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormWarning {
    #[error(
        "Field order override lists {found} fields but the record has {expected}; using natural order"
    )]
    OrderLengthMismatch { expected: usize, found: usize },

    #[error("Field order override names '{0}', which is not a field of this record; using natural order")]
    OrderUnknownField(String),

    #[error("Field order override lists '{0}' more than once; using natural order")]
    OrderDuplicateField(String),

    #[error("Relation target '{table}' of field '{field}' is not a known record type")]
    UnresolvedRelation { field: String, table: String },

    #[error("Loading options for field '{field}' from '{table}' failed: {message}")]
    RelationQueryFailed {
        field: String,
        table: String,
        message: String,
    },
}

/// Business-rule violations reported by `Record::validate`.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("Validation failed: {}", summarize(.errors))]
pub struct ValidationErrors {
    errors: Vec<(String, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against a field. Several messages per field are kept in order.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push((field.into(), message.into()));
    }

    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add(field, message);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// All messages recorded for `field`, in the order they were added.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

fn summarize(errors: &[(String, String)]) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .join("; ")
}
