use super::{FieldType, FormHints, Relation};
use crate::config::FormConfig;
use crate::error::{RecordError, ValidationErrors};
use crate::form::FormSpec;
use crate::value::{PostedValues, Value};
use ahash::AHashMap;

/// One row of a relation target, keyed by field name.
pub type Row = AHashMap<String, Value>;

/// Optional hooks a record type can implement to take part in form generation
/// and submission. Every hook defaults to doing nothing.
pub trait FormHooks {
    /// Runs before inference. Predefined widgets or other hints added here are honoured.
    fn pre_generate_form(&self, _hints: &mut FormHints) {}

    /// Returning `Some` bypasses assembly entirely and uses the given form as is.
    fn custom_form(&self, _config: &FormConfig) -> Option<FormSpec> {
        None
    }

    /// Runs on the finished form, including a custom one.
    fn post_generate_form(&self, _form: &mut FormSpec) {}

    /// Receives the raw submitted values before anything is assigned.
    fn pre_process(&mut self, _values: &PostedValues) {}

    /// Receives the raw submitted values after persistence (or after validation blocked it).
    fn post_process(&mut self, _values: &PostedValues) {}
}

/// A record: one row of a backing table, with schema reflection and persistence.
pub trait Record: FormHooks {
    fn table_name(&self) -> &str;

    /// Field names and declared types, in schema order.
    fn fields(&self) -> Vec<(String, FieldType)>;

    /// Key field names, in schema order.
    fn keys(&self) -> Vec<String>;

    /// An explicitly declared primary key, which wins over the first entry of `keys`.
    fn primary_key(&self) -> Option<String> {
        None
    }

    /// Foreign-key relations, keyed by field name.
    fn links(&self) -> AHashMap<String, Relation> {
        AHashMap::new()
    }

    /// The current value of `field`, or `None` if the record has no such field.
    fn get(&self, field: &str) -> Option<Value>;

    /// Whether a submitted value for `field` may be assigned to this record.
    fn has_field(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), RecordError>;

    /// Persists the record as a new row and returns its identity.
    fn insert(&mut self) -> Result<Value, RecordError>;

    fn update(&mut self) -> Result<(), RecordError>;

    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }

    /// Form hints declared by the record type itself.
    fn form_hints(&self) -> FormHints {
        FormHints::default()
    }

    /// The field that decides between insert and update.
    fn key_field(&self) -> Option<String> {
        self.primary_key().or_else(|| self.keys().into_iter().next())
    }
}

/// Resolves relation targets by table name.
pub trait RelationSource {
    /// Returns `None` when `table` is not a known record type.
    fn table(&self, table: &str) -> Option<Box<dyn RelationTable + '_>>;
}

/// A queryable record type that relation options are loaded from.
pub trait RelationTable {
    fn keys(&self) -> Vec<String>;

    fn primary_key(&self) -> Option<String> {
        None
    }

    fn form_hints(&self) -> FormHints {
        FormHints::default()
    }

    /// All rows, sorted by `field`.
    fn rows_ordered_by(&self, field: &str) -> Result<Vec<Row>, RecordError>;

    fn key_field(&self) -> Option<String> {
        self.primary_key().or_else(|| self.keys().into_iter().next())
    }
}

impl<T: RelationTable + ?Sized> RelationTable for &T {
    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }

    fn primary_key(&self) -> Option<String> {
        (**self).primary_key()
    }

    fn form_hints(&self) -> FormHints {
        (**self).form_hints()
    }

    fn rows_ordered_by(&self, field: &str) -> Result<Vec<Row>, RecordError> {
        (**self).rows_ordered_by(field)
    }
}

/// A source that knows no record types. Every relation resolves to an empty option list.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRelations;

impl RelationSource for NoRelations {
    fn table(&self, _table: &str) -> Option<Box<dyn RelationTable + '_>> {
        None
    }
}
