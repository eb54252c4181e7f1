//! Integration tests for Katagami
//!
//! End-to-end tests: assemble a form, submit it back, load fixtures from JSON.
//!
mod common;
use common::*;
use katagami::memory::{Fixture, JournalEntry};
use katagami::prelude::*;

const FIXTURE_JSON: &str = r#"{
    "config": { "select_display_field": "name", "validate_on_process": true },
    "record": {
        "table": "product",
        "columns": [
            { "name": "id", "type": "int" },
            { "name": "name", "type": "str" },
            { "name": "category_id", "type": "int" },
            { "name": "released", "type": "date" }
        ],
        "keys": ["id"],
        "links": { "category_id": "categories:id" },
        "not_null": ["name"]
    },
    "tables": {
        "categories": {
            "keys": ["id"],
            "rows": [
                { "id": 2, "name": "B" },
                { "id": 1, "name": "A" }
            ]
        }
    },
    "hints": { "labels": { "category_id": "Category" } }
}"#;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_unedited_form_round_trips() {
        let config = named_config();
        let store = category_store();
        let original = stored_product();
        let form = FormAssembler::builder(&config)
            .with_relations(&store)
            .build()
            .assemble(&original, FormHints::default());

        let mut target = product_record();
        let outcome = SubmissionBinder::new(&config)
            .process(&mut target, &form.defaults)
            .expect("defaults should bind");

        assert_eq!(outcome, SubmissionOutcome::Updated);
        assert_eq!(target.values, original.values);
    }

    #[test]
    fn test_round_trip_with_timestamp_storage() {
        let config = FormConfig::default().with_date_storage(DateStorage::Timestamp);
        let original = product_record()
            .value("id", 1)
            .value("released", 1_612_137_600_i64);
        let form = FormAssembler::new(&config).assemble(&original, FormHints::default());

        assert_eq!(
            form.default_value("released"),
            Some(&FormValue::Date(DateParts::new(2021, 2, 1)))
        );

        let mut target = product_record();
        SubmissionBinder::new(&config)
            .process(&mut target, &form.defaults)
            .expect("defaults should bind");

        assert_eq!(target.get("released"), Some(Value::Integer(1_612_137_600)));
    }

    #[test]
    fn test_fixture_form_and_submission() {
        let mut fixture = Fixture::from_json_str(FIXTURE_JSON).expect("fixture should parse");

        let form = FormAssembler::builder(&fixture.config)
            .with_relations(&fixture.tables)
            .build()
            .assemble(&fixture.record, fixture.hints.clone());

        let category = form.widget("category_id").expect("category widget");
        assert_eq!(category.label, "Category");
        assert_eq!(
            category.options,
            vec![SelectOption::new(1, "A"), SelectOption::new(2, "B")]
        );

        let posted: PostedValues = serde_json::from_str(
            r#"{
                "name": "Desk",
                "category_id": 2,
                "released": { "d": "30", "m": "6", "Y": "2021" },
                "__submit__": "Submit"
            }"#,
        )
        .expect("posted values should parse");
        assert_eq!(
            posted.get("released"),
            Some(&FormValue::Date(DateParts::new(2021, 6, 30)))
        );

        let outcome = SubmissionBinder::new(&fixture.config)
            .process(&mut fixture.record, &posted)
            .expect("submission should bind");

        assert_eq!(outcome, SubmissionOutcome::Inserted { id: Value::Integer(1) });
        assert_eq!(fixture.record.get("released"), Some(Value::from("2021-06-30")));
        assert_eq!(
            fixture.record.journal,
            vec![JournalEntry::Insert { id: Value::Integer(1) }]
        );
    }

    #[test]
    fn test_fixture_validation_rejects_blank_name() {
        let mut fixture = Fixture::from_json_str(FIXTURE_JSON).expect("fixture should parse");
        let posted = PostedValues::new().with("category_id", 1);

        let outcome = SubmissionBinder::new(&fixture.config)
            .process(&mut fixture.record, &posted)
            .expect("rejection is not an error");

        assert!(!outcome.attempted_persistence());
        assert!(fixture.record.journal.is_empty());
    }

    #[test]
    fn test_bad_fixture_reports_parse_error() {
        let result = Fixture::from_json_str("{ \"record\": 5 }");
        assert!(matches!(result, Err(ConfigError::JsonParseError(_))));

        let result = Fixture::from_file("/nonexistent/fixture.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_config_from_json_keeps_defaults() {
        let config = FormConfig::from_json_str(
            r#"{ "submit_text": "Save", "invalid_date_policy": "coerce_to_now" }"#,
        )
        .expect("config should parse");

        assert_eq!(config.submit_text, "Save");
        assert_eq!(config.invalid_date_policy, InvalidDatePolicy::CoerceToNow);
        assert_eq!(config.date_element_format, "d-m-Y");
        assert!(config.add_form_header);
    }

    #[test]
    fn test_form_serializes_for_renderers() {
        let config = named_config();
        let store = category_store();
        let form = FormAssembler::builder(&config)
            .with_relations(&store)
            .build()
            .assemble(&stored_product(), FormHints::new().with_group("name", "g").with_group("status", "g"));

        let json = serde_json::to_value(&form).expect("form should serialize");

        assert_eq!(json["name"], "product");
        assert_eq!(json["items"][0]["item"], "widget");
        assert_eq!(json["items"][0]["kind"], "hidden");
        let last = json["items"]
            .as_array()
            .and_then(|items| items.last())
            .expect("items");
        assert_eq!(last["item"], "group");
        assert_eq!(last["key"], "g");
        assert_eq!(json["submit"]["name"], "__submit__");
        assert_eq!(json["defaults"]["released"]["day"], 30);
    }

    #[test]
    fn test_outline_lists_every_element() {
        let config = named_config();
        let store = category_store();
        let form = FormAssembler::builder(&config)
            .with_relations(&store)
            .build()
            .assemble(&stored_product(), FormHints::default());

        let outline = format_form(&form);

        assert!(outline.starts_with("Form: product\n"));
        assert!(outline.contains("Header: product"));
        assert!(outline.contains("[hidden] Id (id) = \"7\""));
        assert!(outline.contains("[date] Released (released) = 2021-06-30 <d-m-Y>"));
        assert!(outline.contains("[text] Status (status) = \"1\" {numeric}"));
        assert!(outline.contains("1 => A"));
        assert!(outline.trim_end().ends_with("└── [submit] Submit"));
    }
}
