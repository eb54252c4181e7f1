use crate::value::Value;
use crate::widget::WidgetSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared storage type of a record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Integer,
    ShortText,
    LongText,
    Date,
    Time,
    DateTime,
    Boolean,
    /// Any type the engine has no dedicated handling for.
    Other(String),
}

impl FieldType {
    /// Parses a type name. Unknown names become `FieldType::Other`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => FieldType::Integer,
            "str" | "string" | "short_text" | "shorttext" => FieldType::ShortText,
            "txt" | "text" | "long_text" | "longtext" => FieldType::LongText,
            "date" => FieldType::Date,
            "time" => FieldType::Time,
            "datetime" | "date_time" | "timestamp" => FieldType::DateTime,
            "bool" | "boolean" => FieldType::Boolean,
            _ => FieldType::Other(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Integer => "integer",
            FieldType::ShortText => "short_text",
            FieldType::LongText => "long_text",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::DateTime => "datetime",
            FieldType::Boolean => "boolean",
            FieldType::Other(name) => name,
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        FieldType::parse(&name)
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A foreign-key reference from a field to the key field of another record type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Relation {
    pub table: String,
    pub key: String,
}

impl Relation {
    pub fn new(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Parses the `table:key` link notation.
    pub fn parse(link: &str) -> Option<Self> {
        let (table, key) = link.split_once(':')?;
        let (table, key) = (table.trim(), key.trim());
        if table.is_empty() || key.is_empty() {
            return None;
        }
        Some(Self::new(table, key))
    }
}

impl TryFrom<String> for Relation {
    type Error = String;

    fn try_from(link: String) -> Result<Self, Self::Error> {
        Relation::parse(&link).ok_or_else(|| format!("'{}' is not a 'table:key' link", link))
    }
}

impl From<Relation> for String {
    fn from(relation: Relation) -> Self {
        relation.to_string()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.table, self.key)
    }
}

/// Forces a field to be treated as a date or as long text, whatever its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Date,
    Text,
}

/// Alternative presentations a field can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presentation {
    /// Relation options rendered as a radio set instead of a select.
    Radio,
    /// Read-only display of the current value.
    Static,
}

/// Everything the inference engine knows about one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    pub primary_key: bool,
    pub relation: Option<Relation>,
    /// A predefined widget that replaces inference for this field.
    pub widget: Option<WidgetSpec>,
    pub label: Option<String>,
    pub classification: Option<Classification>,
    pub presentation: Option<Presentation>,
    pub required: bool,
    pub group: Option<String>,
    /// The record's current in-memory value.
    pub value: Value,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            primary_key: false,
            relation: None,
            widget: None,
            label: None,
            classification: None,
            presentation: None,
            required: false,
            group: None,
            value: Value::Null,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relation = Some(relation);
        self
    }

    pub fn with_widget(mut self, widget: WidgetSpec) -> Self {
        self.widget = Some(widget);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn classified_as(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn presented_as(mut self, presentation: Presentation) -> Self {
        self.presentation = Some(presentation);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// The label override, or the field name with its first letter upper-cased.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => capitalize(&self.name),
        }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
