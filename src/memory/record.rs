use crate::error::{RecordError, ValidationErrors};
use crate::schema::{FieldType, FormHints, FormHooks, Record, Relation};
use crate::value::Value;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

/// A persistence call made on a `MemoryRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum JournalEntry {
    Insert { id: Value },
    Update { key: Value },
}

/// A record held entirely in memory, declared in code or loaded from JSON.
///
/// Inserts assign sequential integer identities to an empty key field and every
/// persistence call is appended to `journal`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryRecord {
    pub table: String,
    pub columns: Vec<Column>,
    pub keys: Vec<String>,
    pub primary_key: Option<String>,
    pub links: AHashMap<String, Relation>,
    pub values: AHashMap<String, Value>,
    pub hints: FormHints,
    /// Fields that fail validation while null or blank.
    pub not_null: Vec<String>,
    /// Makes every insert and update fail.
    pub read_only: bool,
    pub last_id: i64,
    pub journal: Vec<JournalEntry>,
}

impl MemoryRecord {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn column(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.columns.push(Column {
            name: name.into(),
            field_type,
        });
        self
    }

    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.keys.push(name.into());
        self
    }

    pub fn with_primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = Some(name.into());
        self
    }

    pub fn link(mut self, field: impl Into<String>, relation: Relation) -> Self {
        self.links.insert(field.into(), relation);
        self
    }

    pub fn value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    pub fn with_hints(mut self, hints: FormHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn not_null(mut self, field: impl Into<String>) -> Self {
        self.not_null.push(field.into());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    fn declares(&self, field: &str) -> bool {
        self.columns.iter().any(|column| column.name == field)
    }

    fn check_writable(&self, operation: &str) -> Result<(), RecordError> {
        if self.read_only {
            return Err(RecordError::Persistence {
                table: self.table.clone(),
                operation: operation.to_string(),
                message: "record is read-only".to_string(),
            });
        }
        Ok(())
    }
}

impl FormHooks for MemoryRecord {}

impl Record for MemoryRecord {
    fn table_name(&self) -> &str {
        &self.table
    }

    fn fields(&self) -> Vec<(String, FieldType)> {
        self.columns
            .iter()
            .map(|column| (column.name.clone(), column.field_type.clone()))
            .collect()
    }

    fn keys(&self) -> Vec<String> {
        self.keys.clone()
    }

    fn primary_key(&self) -> Option<String> {
        self.primary_key.clone()
    }

    fn links(&self) -> AHashMap<String, Relation> {
        self.links.clone()
    }

    fn get(&self, field: &str) -> Option<Value> {
        self.declares(field)
            .then(|| self.values.get(field).cloned().unwrap_or_default())
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), RecordError> {
        if !self.declares(field) {
            return Err(RecordError::UnknownField {
                table: self.table.clone(),
                field: field.to_string(),
            });
        }
        self.values.insert(field.to_string(), value);
        Ok(())
    }

    fn insert(&mut self) -> Result<Value, RecordError> {
        self.check_writable("Insert")?;
        let key = self.key_field();
        let existing = key.as_ref().and_then(|key| self.get(key));

        let id = match existing {
            Some(value) if !value.is_empty() => value,
            _ => {
                self.last_id += 1;
                let id = Value::Integer(self.last_id);
                if let Some(key) = key {
                    self.values.insert(key, id.clone());
                }
                id
            }
        };
        self.journal.push(JournalEntry::Insert { id: id.clone() });
        Ok(id)
    }

    fn update(&mut self) -> Result<(), RecordError> {
        self.check_writable("Update")?;
        let key = self
            .key_field()
            .and_then(|key| self.get(&key))
            .unwrap_or_default();
        self.journal.push(JournalEntry::Update { key });
        Ok(())
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let errors = self
            .not_null
            .iter()
            .filter(|field| match self.values.get(field.as_str()) {
                None | Some(Value::Null) => true,
                Some(Value::Text(text)) => text.trim().is_empty(),
                Some(_) => false,
            })
            .fold(ValidationErrors::new(), |errors, field| {
                errors.with(field.clone(), format!("{} must not be empty", field))
            });
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn form_hints(&self) -> FormHints {
        self.hints.clone()
    }
}
