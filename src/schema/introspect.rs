use super::{Classification, FieldDescriptor, FormHints, Presentation, Record};
use crate::error::FormWarning;
use crate::value::Value;
use ahash::AHashSet;
use tracing::debug;

/// The introspected shape of one record, with its hints folded into each field.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub table: String,
    /// Fields in natural (schema) order.
    pub fields: Vec<FieldDescriptor>,
}

/// Reads field metadata, keys, relations and current values off a record.
pub struct SchemaIntrospector;

impl SchemaIntrospector {
    pub fn introspect<R: Record + ?Sized>(record: &R, hints: &FormHints) -> Schema {
        let keys = record.keys();
        let links = record.links();

        let fields = record
            .fields()
            .into_iter()
            .map(|(name, field_type)| {
                let classification = if listed(&hints.date_fields, &name) {
                    Some(Classification::Date)
                } else if listed(&hints.text_fields, &name) {
                    Some(Classification::Text)
                } else {
                    None
                };
                let presentation = if listed(&hints.static_fields, &name) {
                    Some(Presentation::Static)
                } else if listed(&hints.radio_fields, &name) {
                    Some(Presentation::Radio)
                } else {
                    None
                };

                FieldDescriptor {
                    primary_key: keys.contains(&name),
                    relation: links.get(&name).cloned(),
                    widget: hints.widgets.get(&name).cloned(),
                    label: hints.labels.get(&name).cloned(),
                    classification,
                    presentation,
                    required: listed(&hints.required_fields, &name),
                    group: hints.groups.get(&name).cloned(),
                    value: record.get(&name).unwrap_or(Value::Null),
                    ..FieldDescriptor::new(name, field_type)
                }
            })
            .collect();

        Schema {
            table: record.table_name().to_string(),
            fields,
        }
    }
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Orders the fields by `order` if it is an exact permutation of the field names.
    ///
    /// Without an override the natural order is returned. An override that is not a
    /// permutation is never partially applied: the warning tells the caller to fall back.
    pub fn resolve_order(&self, order: Option<&[String]>) -> Result<Vec<&FieldDescriptor>, FormWarning> {
        let Some(order) = order else {
            return Ok(self.fields.iter().collect());
        };

        if order.len() != self.fields.len() {
            return Err(FormWarning::OrderLengthMismatch {
                expected: self.fields.len(),
                found: order.len(),
            });
        }

        let mut seen = AHashSet::with_capacity(order.len());
        let mut ordered = Vec::with_capacity(order.len());
        for name in order {
            if !seen.insert(name.as_str()) {
                return Err(FormWarning::OrderDuplicateField(name.clone()));
            }
            let field = self
                .field(name)
                .ok_or_else(|| FormWarning::OrderUnknownField(name.clone()))?;
            ordered.push(field);
        }

        debug!(table = %self.table, "reordering form elements");
        Ok(ordered)
    }
}

fn listed(list: &[String], name: &str) -> bool {
    list.iter().any(|entry| entry == name)
}
