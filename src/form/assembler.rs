use super::{FormItem, FormSpec, SubmitButton, WidgetGroup};
use crate::binding::clock::{Clock, SystemClock};
use crate::binding::dates;
use crate::config::FormConfig;
use crate::schema::{
    FieldDescriptor, FormHints, NoRelations, Record, RelationSource, SUBMIT_GROUP, Schema,
    SchemaIntrospector,
};
use crate::value::FormValue;
use crate::widget::{WidgetInference, WidgetKind, WidgetSpec};
use tracing::{debug, warn};

/// Turns a record into a complete form.
pub struct FormAssembler<'a> {
    config: &'a FormConfig,
    relations: &'a dyn RelationSource,
    clock: Box<dyn Clock + 'a>,
    hints: FormHints,
}

pub struct FormAssemblerBuilder<'a> {
    config: &'a FormConfig,
    relations: &'a dyn RelationSource,
    clock: Box<dyn Clock + 'a>,
    hints: FormHints,
}

impl<'a> FormAssemblerBuilder<'a> {
    pub fn new(config: &'a FormConfig) -> Self {
        Self {
            config,
            relations: &NoRelations,
            clock: Box::new(SystemClock),
            hints: FormHints::default(),
        }
    }

    /// Where relation fields load their options from.
    pub fn with_relations(mut self, relations: &'a dyn RelationSource) -> Self {
        self.relations = relations;
        self
    }

    /// Clock used when a stored date cannot be read and today is shown instead.
    pub fn with_clock(mut self, clock: impl Clock + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Hints applied to every form this assembler builds, beneath per-call overrides.
    pub fn with_hints(mut self, hints: FormHints) -> Self {
        self.hints.merge(hints);
        self
    }

    pub fn build(self) -> FormAssembler<'a> {
        FormAssembler {
            config: self.config,
            relations: self.relations,
            clock: self.clock,
            hints: self.hints,
        }
    }
}

impl<'a> FormAssembler<'a> {
    pub fn builder(config: &'a FormConfig) -> FormAssemblerBuilder<'a> {
        FormAssemblerBuilder::new(config)
    }

    pub fn new(config: &'a FormConfig) -> Self {
        Self::builder(config).build()
    }

    /// Builds the form for `record`.
    ///
    /// Hints are layered as record type, then assembler, then `overrides`, and the
    /// record's `pre_generate_form` hook sees the merged result. A form returned by
    /// `custom_form` replaces assembly; `post_generate_form` runs either way.
    pub fn assemble<R: Record + ?Sized>(&self, record: &R, overrides: FormHints) -> FormSpec {
        let mut hints = record.form_hints();
        hints.merge(self.hints.clone());
        hints.merge(overrides);
        record.pre_generate_form(&mut hints);

        let mut form = match record.custom_form(self.config) {
            Some(form) => {
                debug!(table = record.table_name(), "using custom form");
                form
            }
            None => self.generate(record, &hints),
        };
        record.post_generate_form(&mut form);
        form
    }

    fn generate<R: Record + ?Sized>(&self, record: &R, hints: &FormHints) -> FormSpec {
        let schema = SchemaIntrospector::introspect(record, hints);
        let mut form = FormSpec::new(schema.table.clone());

        let fields = match schema.resolve_order(hints.order.as_deref()) {
            Ok(fields) => fields,
            Err(warning) => {
                warn!(table = %schema.table, %warning, "ignoring field order override");
                form.warnings.push(warning);
                schema.fields.iter().collect()
            }
        };

        if self.config.add_form_header {
            form.header = Some(self.header_text(&schema));
        }

        let inference = WidgetInference::new(self.config, self.relations)
            .with_date_format(hints.date_element_format.clone());

        let mut grouped: Vec<(String, Vec<WidgetSpec>)> = Vec::new();
        for field in fields {
            let mut widget = inference.infer_reporting(field, &mut form.warnings);
            form.defaults
                .insert(field.name.clone(), self.default_value(field, &widget.kind));

            match &field.group {
                Some(key) => {
                    widget.group = Some(key.clone());
                    match grouped.iter_mut().find(|(existing, _)| existing == key) {
                        Some((_, members)) => members.push(widget),
                        None => grouped.push((key.clone(), vec![widget])),
                    }
                }
                None => form.items.push(FormItem::Widget(widget)),
            }
        }

        let mut submit = Some(SubmitButton::new(&self.config.submit_text));
        let submit_group = hints.groups.get(SUBMIT_GROUP);
        for (key, mut widgets) in grouped {
            if widgets.len() == 1 {
                let mut widget = widgets.remove(0);
                widget.group = None;
                form.items.push(FormItem::Widget(widget));
                continue;
            }
            let group_submit = if submit_group == Some(&key) {
                submit.take()
            } else {
                None
            };
            form.items.push(FormItem::Group(WidgetGroup {
                key,
                widgets,
                submit: group_submit,
            }));
        }
        form.submit = submit;

        debug!(
            table = %schema.table,
            widgets = form.widgets().count(),
            warnings = form.warnings.len(),
            "assembled form"
        );
        form
    }

    fn header_text(&self, schema: &Schema) -> String {
        self.config
            .form_header_text
            .clone()
            .unwrap_or_else(|| schema.table.clone())
    }

    /// The field's current value in the shape its widget submits.
    fn default_value(&self, field: &FieldDescriptor, kind: &WidgetKind) -> FormValue {
        match kind {
            WidgetKind::DateGroup => dates::split_date(&field.value, self.clock.now()),
            WidgetKind::TimeGroup => dates::split_time(&field.value, self.clock.now()),
            WidgetKind::DateTimeGroup => dates::split_datetime(&field.value, self.clock.now()),
            _ => FormValue::Scalar(field.value.clone()),
        }
    }
}

