use super::SelectOption;
use crate::config::FormConfig;
use crate::error::{FormWarning, RecordError};
use crate::schema::{Relation, RelationSource};
use crate::value::Value;
use tracing::{debug, warn};

/// Builds the option list of a relation field from the rows of its target record type.
pub struct OptionListResolver<'a> {
    config: &'a FormConfig,
    source: &'a dyn RelationSource,
}

enum LoadError {
    UnknownTable,
    Query(RecordError),
}

impl<'a> OptionListResolver<'a> {
    pub fn new(config: &'a FormConfig, source: &'a dyn RelationSource) -> Self {
        Self { config, source }
    }

    /// Returns `(key, label)` options in the order of the resolved sort field.
    ///
    /// The label field is `display_field` if given, else the target type's
    /// `select_display_field`, else the configured default, else the target key.
    /// The sort field is the target type's `select_order_field`, else the configured
    /// default, else the label field. An unknown target or a failed query yields an
    /// empty list.
    pub fn resolve(&self, relation: &Relation, display_field: Option<&str>) -> Vec<SelectOption> {
        let mut warnings = Vec::new();
        self.resolve_for_field(&relation.key, relation, display_field, &mut warnings)
    }

    /// Like `resolve`, but records why the list came back empty.
    pub(crate) fn resolve_for_field(
        &self,
        field: &str,
        relation: &Relation,
        display_field: Option<&str>,
        warnings: &mut Vec<FormWarning>,
    ) -> Vec<SelectOption> {
        match self.load(relation, display_field) {
            Ok(options) => options,
            Err(LoadError::UnknownTable) => {
                warn!(field, table = %relation.table, "relation target is not a record type");
                warnings.push(FormWarning::UnresolvedRelation {
                    field: field.to_string(),
                    table: relation.table.clone(),
                });
                Vec::new()
            }
            Err(LoadError::Query(err)) => {
                warn!(field, table = %relation.table, error = %err, "loading relation options failed");
                warnings.push(FormWarning::RelationQueryFailed {
                    field: field.to_string(),
                    table: relation.table.clone(),
                    message: err.to_string(),
                });
                Vec::new()
            }
        }
    }

    fn load(
        &self,
        relation: &Relation,
        display_field: Option<&str>,
    ) -> Result<Vec<SelectOption>, LoadError> {
        let table = self
            .source
            .table(&relation.table)
            .ok_or(LoadError::UnknownTable)?;
        let hints = table.form_hints();
        let key = table.key_field().unwrap_or_else(|| relation.key.clone());

        let label_field = display_field
            .map(str::to_string)
            .or(hints.select_display_field)
            .or_else(|| self.config.select_display_field.clone())
            .unwrap_or_else(|| key.clone());
        let order = hints
            .select_order_field
            .or_else(|| self.config.select_order_field.clone())
            .unwrap_or_else(|| label_field.clone());

        debug!(table = %relation.table, %key, %label_field, %order, "loading relation options");
        let rows = table.rows_ordered_by(&order).map_err(LoadError::Query)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let value = row.get(&key).cloned().unwrap_or(Value::Null);
                let label = row
                    .get(&label_field)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                SelectOption { value, label }
            })
            .collect())
    }
}
