use super::{OptionListResolver, RuleKind, ValidationRule, WidgetKind, WidgetSpec};
use crate::config::FormConfig;
use crate::error::FormWarning;
use crate::schema::{Classification, FieldDescriptor, FieldType, Presentation, RelationSource};

/// Maps one field descriptor to one widget.
///
/// Decision order, first match wins:
/// 1. a predefined widget is used verbatim;
/// 2. a static presentation renders the value read-only;
/// 3. a date or text classification gives a date group or a textarea;
/// 4. otherwise the declared type decides, with relation fields becoming selects.
///
/// Primary keys are always hidden, whatever the steps above produced.
pub struct WidgetInference<'a> {
    config: &'a FormConfig,
    options: OptionListResolver<'a>,
    date_format: Option<String>,
}

impl<'a> WidgetInference<'a> {
    pub fn new(config: &'a FormConfig, source: &'a dyn RelationSource) -> Self {
        Self {
            config,
            options: OptionListResolver::new(config, source),
            date_format: None,
        }
    }

    /// Overrides the configured date element format, e.g. with a record type's own.
    pub fn with_date_format(mut self, format: Option<String>) -> Self {
        self.date_format = format;
        self
    }

    pub fn infer(&self, field: &FieldDescriptor) -> WidgetSpec {
        let mut warnings = Vec::new();
        self.infer_reporting(field, &mut warnings)
    }

    /// Like `infer`, collecting non-fatal problems (e.g. an unresolvable relation).
    pub fn infer_reporting(
        &self,
        field: &FieldDescriptor,
        warnings: &mut Vec<FormWarning>,
    ) -> WidgetSpec {
        let label = field.display_label();

        if field.primary_key {
            return WidgetSpec::hidden(&field.name, label);
        }
        // Predefined widgets carry their own rules; `required` is not added to them.
        if let Some(predefined) = &field.widget {
            return predefined.clone();
        }

        let mut widget = self.infer_by_type(field, label, warnings);
        if field.required {
            let message = self.config.required_message(&widget.label);
            widget.rules.push(ValidationRule::new(RuleKind::Required, message));
        }
        widget
    }

    fn infer_by_type(
        &self,
        field: &FieldDescriptor,
        label: String,
        warnings: &mut Vec<FormWarning>,
    ) -> WidgetSpec {
        let name = field.name.as_str();

        if field.presentation == Some(Presentation::Static) {
            return WidgetSpec::new(name, label, WidgetKind::Static);
        }
        match field.classification {
            Some(Classification::Date) => return self.temporal(name, label, WidgetKind::DateGroup),
            Some(Classification::Text) => return WidgetSpec::new(name, label, WidgetKind::Textarea),
            None => {}
        }

        match &field.field_type {
            FieldType::Integer => match &field.relation {
                Some(relation) => {
                    let options = self
                        .options
                        .resolve_for_field(name, relation, None, warnings);
                    let kind = if field.presentation == Some(Presentation::Radio) {
                        WidgetKind::RadioGroup
                    } else {
                        WidgetKind::Select
                    };
                    WidgetSpec::new(name, label, kind).with_options(options)
                }
                None => WidgetSpec::new(name, label, WidgetKind::Text).with_rule(
                    ValidationRule::new(RuleKind::Numeric, &self.config.rule_violation_message),
                ),
            },
            FieldType::Date | FieldType::Time | FieldType::DateTime | FieldType::Boolean
                if self.config.collapse_untyped_fields =>
            {
                WidgetSpec::new(name, label, WidgetKind::Textarea)
            }
            FieldType::Date => self.temporal(name, label, WidgetKind::DateGroup),
            FieldType::Time => self.temporal(name, label, WidgetKind::TimeGroup),
            FieldType::DateTime => self.temporal(name, label, WidgetKind::DateTimeGroup),
            FieldType::Boolean => WidgetSpec::new(name, label, WidgetKind::Checkbox),
            FieldType::LongText => WidgetSpec::new(name, label, WidgetKind::Textarea),
            FieldType::ShortText if field.value.contains_line_break() => {
                WidgetSpec::new(name, label, WidgetKind::Textarea)
            }
            FieldType::ShortText | FieldType::Other(_) => {
                WidgetSpec::new(name, label, WidgetKind::Text)
            }
        }
    }

    fn temporal(&self, name: &str, label: String, kind: WidgetKind) -> WidgetSpec {
        let format = match kind {
            WidgetKind::TimeGroup => &self.config.time_element_format,
            WidgetKind::DateTimeGroup => &self.config.datetime_element_format,
            _ => self
                .date_format
                .as_ref()
                .unwrap_or(&self.config.date_element_format),
        };
        WidgetSpec::new(name, label, kind).with_format(format.clone())
    }
}
