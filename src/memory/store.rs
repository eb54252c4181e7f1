use crate::error::RecordError;
use crate::schema::{FormHints, RelationSource, RelationTable, Row};
use crate::value::Value;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// The rows of one record type, used as a relation target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryTable {
    #[serde(skip)]
    pub name: String,
    pub keys: Vec<String>,
    pub primary_key: Option<String>,
    pub hints: FormHints,
    pub rows: Vec<Row>,
}

impl MemoryTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.keys.push(name.into());
        self
    }

    pub fn with_hints(mut self, hints: FormHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn row<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.rows.push(
            values
                .into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        );
        self
    }
}

impl RelationTable for MemoryTable {
    fn keys(&self) -> Vec<String> {
        self.keys.clone()
    }

    fn primary_key(&self) -> Option<String> {
        self.primary_key.clone()
    }

    fn form_hints(&self) -> FormHints {
        self.hints.clone()
    }

    /// Stable sort; rows missing `field` sort as null. Sorting by a field no row has fails.
    fn rows_ordered_by(&self, field: &str) -> Result<Vec<Row>, RecordError> {
        if !self.rows.is_empty() && self.rows.iter().all(|row| !row.contains_key(field)) {
            return Err(RecordError::Query {
                table: self.name.clone(),
                message: format!("unknown column '{}'", field),
            });
        }
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            let null = Value::Null;
            a.get(field)
                .unwrap_or(&null)
                .sort_cmp(b.get(field).unwrap_or(&null))
        });
        Ok(rows)
    }
}

/// Record types by table name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "AHashMap<String, MemoryTable>", into = "AHashMap<String, MemoryTable>")]
pub struct MemoryStore {
    tables: AHashMap<String, MemoryTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `table` under its own name, replacing any table of the same name.
    pub fn with_table(mut self, table: MemoryTable) -> Self {
        self.tables.insert(table.name.clone(), table);
        self
    }

    pub fn get(&self, name: &str) -> Option<&MemoryTable> {
        self.tables.get(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl RelationSource for MemoryStore {
    fn table(&self, table: &str) -> Option<Box<dyn RelationTable + '_>> {
        self.tables
            .get(table)
            .map(|found| Box::new(found) as Box<dyn RelationTable + '_>)
    }
}

impl From<AHashMap<String, MemoryTable>> for MemoryStore {
    fn from(tables: AHashMap<String, MemoryTable>) -> Self {
        let tables = tables
            .into_iter()
            .map(|(name, mut table)| {
                table.name = name.clone();
                (name, table)
            })
            .collect();
        Self { tables }
    }
}

impl From<MemoryStore> for AHashMap<String, MemoryTable> {
    fn from(store: MemoryStore) -> Self {
        store.tables
    }
}
