//! Common test utilities for building records, relation targets and submissions.
use chrono::{NaiveDate, NaiveDateTime};
use katagami::memory::{MemoryRecord, MemoryStore, MemoryTable};
use katagami::prelude::*;
use std::cell::RefCell;

/// The instant every `FixedClock` in the tests is frozen at: 2024-03-15 10:30:00.
#[allow(dead_code)]
pub fn frozen_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .and_then(|date| date.and_hms_opt(10, 30, 0))
        .expect("valid fixed instant")
}

#[allow(dead_code)]
pub fn fixed_clock() -> FixedClock {
    FixedClock(frozen_now())
}

/// Three categories inserted out of label order: (3,"C"), (1,"A"), (2,"B").
#[allow(dead_code)]
pub fn category_table() -> MemoryTable {
    MemoryTable::new("categories")
        .key("id")
        .row([("id", Value::from(3)), ("name", Value::from("C"))])
        .row([("id", Value::from(1)), ("name", Value::from("A"))])
        .row([("id", Value::from(2)), ("name", Value::from("B"))])
}

#[allow(dead_code)]
pub fn category_store() -> MemoryStore {
    MemoryStore::new().with_table(category_table())
}

/// A product record with one field of every declared type and a category relation.
#[allow(dead_code)]
pub fn product_record() -> MemoryRecord {
    MemoryRecord::new("product")
        .column("id", FieldType::Integer)
        .column("name", FieldType::ShortText)
        .column("description", FieldType::LongText)
        .column("status", FieldType::Integer)
        .column("category_id", FieldType::Integer)
        .column("released", FieldType::Date)
        .column("opens", FieldType::Time)
        .column("updated", FieldType::DateTime)
        .column("active", FieldType::Boolean)
        .column("price", FieldType::Other("decimal".to_string()))
        .key("id")
        .link("category_id", Relation::new("categories", "id"))
}

/// The product record as loaded from an existing row.
#[allow(dead_code)]
pub fn stored_product() -> MemoryRecord {
    product_record()
        .value("id", 7)
        .value("name", "Lamp")
        .value("description", "Warm light")
        .value("status", 1)
        .value("category_id", 2)
        .value("released", "2021-06-30")
        .value("opens", "08:15:00")
        .value("updated", "2023-01-02 03:04:05")
        .value("active", true)
        .value("price", "12.50")
}

/// Configuration that labels relation options by `name`.
#[allow(dead_code)]
pub fn named_config() -> FormConfig {
    FormConfig::default().with_display_field("name")
}

/// A record that delegates to a `MemoryRecord` and records every hook call.
#[allow(dead_code)]
pub struct HookedRecord {
    pub inner: MemoryRecord,
    pub calls: RefCell<Vec<&'static str>>,
    pub injected: Option<(String, WidgetSpec)>,
    pub replacement: Option<FormSpec>,
    pub dropped_widget: Option<String>,
    pub failures: Option<ValidationErrors>,
    pub seen_by_pre_process: Option<PostedValues>,
    pub seen_by_post_process: Option<PostedValues>,
}

#[allow(dead_code)]
impl HookedRecord {
    pub fn new(inner: MemoryRecord) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
            injected: None,
            replacement: None,
            dropped_widget: None,
            failures: None,
            seen_by_pre_process: None,
            seen_by_post_process: None,
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

impl FormHooks for HookedRecord {
    fn pre_generate_form(&self, hints: &mut FormHints) {
        self.calls.borrow_mut().push("pre_generate_form");
        if let Some((field, widget)) = &self.injected {
            hints.widgets.insert(field.clone(), widget.clone());
        }
    }

    fn custom_form(&self, _config: &FormConfig) -> Option<FormSpec> {
        self.calls.borrow_mut().push("custom_form");
        self.replacement.clone()
    }

    fn post_generate_form(&self, form: &mut FormSpec) {
        self.calls.borrow_mut().push("post_generate_form");
        if let Some(name) = &self.dropped_widget {
            form.remove_widget(name);
        }
    }

    fn pre_process(&mut self, values: &PostedValues) {
        self.calls.borrow_mut().push("pre_process");
        self.seen_by_pre_process = Some(values.clone());
    }

    fn post_process(&mut self, values: &PostedValues) {
        self.calls.borrow_mut().push("post_process");
        self.seen_by_post_process = Some(values.clone());
    }
}

impl Record for HookedRecord {
    fn table_name(&self) -> &str {
        self.inner.table_name()
    }

    fn fields(&self) -> Vec<(String, FieldType)> {
        self.inner.fields()
    }

    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    fn links(&self) -> ahash::AHashMap<String, Relation> {
        self.inner.links()
    }

    fn get(&self, field: &str) -> Option<Value> {
        self.inner.get(field)
    }

    fn set(&mut self, field: &str, value: Value) -> std::result::Result<(), RecordError> {
        self.inner.set(field, value)
    }

    fn insert(&mut self) -> std::result::Result<Value, RecordError> {
        self.calls.borrow_mut().push("insert");
        self.inner.insert()
    }

    fn update(&mut self) -> std::result::Result<(), RecordError> {
        self.calls.borrow_mut().push("update");
        self.inner.update()
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        match &self.failures {
            Some(errors) => Err(errors.clone()),
            None => Ok(()),
        }
    }

    fn form_hints(&self) -> FormHints {
        self.inner.form_hints()
    }
}

/// A field descriptor the way introspection would build it for a plain column.
#[allow(dead_code)]
pub fn field(name: &str, field_type: FieldType) -> katagami::schema::FieldDescriptor {
    katagami::schema::FieldDescriptor::new(name, field_type)
}
