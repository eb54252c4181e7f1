use crate::widget::WidgetSpec;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Group key that places the submit button. `groups["__submit__"] = "g"` puts it in group `g`.
pub const SUBMIT_GROUP: &str = "__submit__";

/// Per-record-type overrides for form generation.
///
/// A record type declares its own hints through `Record::form_hints`; a caller
/// can layer more on top when assembling a form. Field names that do not exist
/// on the record are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormHints {
    /// Predefined widgets used verbatim instead of inferring one.
    pub widgets: AHashMap<String, WidgetSpec>,
    pub labels: AHashMap<String, String>,
    pub date_fields: Vec<String>,
    pub text_fields: Vec<String>,
    pub radio_fields: Vec<String>,
    pub static_fields: Vec<String>,
    pub required_fields: Vec<String>,
    /// A complete field order. Ignored unless it is a permutation of the record's fields.
    pub order: Option<Vec<String>>,
    /// Field name to group key.
    pub groups: AHashMap<String, String>,
    /// Label field used when this record type is the target of a relation.
    pub select_display_field: Option<String>,
    /// Sort field used when this record type is the target of a relation.
    pub select_order_field: Option<String>,
    pub date_element_format: Option<String>,
}

impl FormHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers `other` on top of `self`; entries in `other` win.
    pub fn merge(&mut self, other: FormHints) {
        self.widgets.extend(other.widgets);
        self.labels.extend(other.labels);
        self.groups.extend(other.groups);
        extend_unique(&mut self.date_fields, other.date_fields);
        extend_unique(&mut self.text_fields, other.text_fields);
        extend_unique(&mut self.radio_fields, other.radio_fields);
        extend_unique(&mut self.static_fields, other.static_fields);
        extend_unique(&mut self.required_fields, other.required_fields);
        if other.order.is_some() {
            self.order = other.order;
        }
        if other.select_display_field.is_some() {
            self.select_display_field = other.select_display_field;
        }
        if other.select_order_field.is_some() {
            self.select_order_field = other.select_order_field;
        }
        if other.date_element_format.is_some() {
            self.date_element_format = other.date_element_format;
        }
    }

    pub fn with_widget(mut self, field: impl Into<String>, widget: WidgetSpec) -> Self {
        self.widgets.insert(field.into(), widget);
        self
    }

    pub fn with_label(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(field.into(), label.into());
        self
    }

    pub fn date_field(mut self, field: impl Into<String>) -> Self {
        self.date_fields.push(field.into());
        self
    }

    pub fn text_field(mut self, field: impl Into<String>) -> Self {
        self.text_fields.push(field.into());
        self
    }

    pub fn radio_field(mut self, field: impl Into<String>) -> Self {
        self.radio_fields.push(field.into());
        self
    }

    pub fn static_field(mut self, field: impl Into<String>) -> Self {
        self.static_fields.push(field.into());
        self
    }

    pub fn required_field(mut self, field: impl Into<String>) -> Self {
        self.required_fields.push(field.into());
        self
    }

    pub fn with_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_group(mut self, field: impl Into<String>, group: impl Into<String>) -> Self {
        self.groups.insert(field.into(), group.into());
        self
    }

    /// Places the submit button inside `group`.
    pub fn with_submit_group(self, group: impl Into<String>) -> Self {
        self.with_group(SUBMIT_GROUP, group)
    }

    pub fn with_display_field(mut self, field: impl Into<String>) -> Self {
        self.select_display_field = Some(field.into());
        self
    }

    pub fn with_order_field(mut self, field: impl Into<String>) -> Self {
        self.select_order_field = Some(field.into());
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_element_format = Some(format.into());
        self
    }
}

fn extend_unique(target: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}
