//! Widget inference tests
//!
//! Checks the decision order that maps a field descriptor to a widget.
//!
mod common;
use common::*;
use katagami::prelude::*;
use katagami::schema::{Classification, Presentation};
use katagami::widget::WidgetInference;

#[cfg(test)]
mod inference_tests {
    use super::*;

    #[test]
    fn test_plain_integer_becomes_numeric_text() {
        let config = FormConfig::default();
        let inference = WidgetInference::new(&config, &NoRelations);

        let widget = inference.infer(&field("status", FieldType::Integer));

        assert_eq!(widget.kind, WidgetKind::Text);
        assert_eq!(widget.label, "Status");
        assert_eq!(widget.rules.len(), 1);
        assert_eq!(widget.rules[0].kind, RuleKind::Numeric);
        assert_eq!(widget.rules[0].message, config.rule_violation_message);
    }

    #[test]
    fn test_relation_becomes_select_in_label_order() {
        let config = named_config();
        let store = category_store();
        let inference = WidgetInference::new(&config, &store);
        let descriptor = field("category_id", FieldType::Integer)
            .with_relation(Relation::new("categories", "id"));

        let widget = inference.infer(&descriptor);

        assert_eq!(widget.kind, WidgetKind::Select);
        assert_eq!(
            widget.options,
            vec![
                SelectOption::new(1, "A"),
                SelectOption::new(2, "B"),
                SelectOption::new(3, "C"),
            ]
        );
        assert!(widget.rules.is_empty());
    }

    #[test]
    fn test_radio_presentation_keeps_options() {
        let config = named_config();
        let store = category_store();
        let inference = WidgetInference::new(&config, &store);
        let descriptor = field("category_id", FieldType::Integer)
            .with_relation(Relation::new("categories", "id"))
            .presented_as(Presentation::Radio);

        let widget = inference.infer(&descriptor);

        assert_eq!(widget.kind, WidgetKind::RadioGroup);
        assert_eq!(widget.options.len(), 3);
        assert_eq!(widget.options[0].label, "A");
    }

    #[test]
    fn test_unknown_relation_target_gives_empty_select_and_warning() {
        let config = named_config();
        let inference = WidgetInference::new(&config, &NoRelations);
        let descriptor = field("owner_id", FieldType::Integer)
            .with_relation(Relation::new("owners", "id"));

        let mut warnings = Vec::new();
        let widget = inference.infer_reporting(&descriptor, &mut warnings);

        assert_eq!(widget.kind, WidgetKind::Select);
        assert!(widget.options.is_empty());
        assert_eq!(
            warnings,
            vec![FormWarning::UnresolvedRelation {
                field: "owner_id".to_string(),
                table: "owners".to_string(),
            }]
        );
    }

    #[test]
    fn test_primary_key_is_always_hidden() {
        let config = FormConfig::default();
        let inference = WidgetInference::new(&config, &NoRelations);

        let plain = field("id", FieldType::Integer).primary_key();
        let dated = field("id", FieldType::Date)
            .primary_key()
            .classified_as(Classification::Date);
        let predefined = field("id", FieldType::ShortText)
            .primary_key()
            .with_widget(WidgetSpec::new("id", "Id", WidgetKind::Textarea));

        for descriptor in [plain, dated, predefined] {
            let widget = inference.infer(&descriptor);
            assert_eq!(widget.kind, WidgetKind::Hidden, "{:?}", descriptor);
            assert!(widget.rules.is_empty());
        }
    }

    #[test]
    fn test_predefined_widget_is_used_verbatim() {
        let config = FormConfig::default();
        let inference = WidgetInference::new(&config, &NoRelations);
        let custom = WidgetSpec::new("status", "State", WidgetKind::Custom("slider".to_string()))
            .with_rule(ValidationRule::new(RuleKind::Custom("range".to_string()), "0-10").with_parameter("0,10"));
        let descriptor = field("status", FieldType::Integer)
            .required()
            .with_widget(custom.clone());

        assert_eq!(inference.infer(&descriptor), custom);
    }

    #[test]
    fn test_required_hint_leaves_predefined_rules_alone() {
        let config = FormConfig::default();
        let inference = WidgetInference::new(&config, &NoRelations);
        let descriptor = field("name", FieldType::ShortText)
            .required()
            .with_widget(WidgetSpec::new("name", "Name", WidgetKind::Text));

        let widget = inference.infer(&descriptor);

        assert_eq!(widget.kind, WidgetKind::Text);
        assert!(widget.rules.is_empty());
    }

    #[test]
    fn test_classification_overrides_declared_type() {
        let config = FormConfig::default();
        let inference = WidgetInference::new(&config, &NoRelations);

        let as_date = inference.infer(
            &field("shipped", FieldType::ShortText).classified_as(Classification::Date),
        );
        assert_eq!(as_date.kind, WidgetKind::DateGroup);
        assert_eq!(as_date.format.as_deref(), Some("d-m-Y"));

        let as_text = inference
            .infer(&field("code", FieldType::Integer).classified_as(Classification::Text));
        assert_eq!(as_text.kind, WidgetKind::Textarea);
        assert!(as_text.rules.is_empty());
    }

    #[test]
    fn test_record_date_format_overrides_config() {
        let config = FormConfig::default();
        let inference =
            WidgetInference::new(&config, &NoRelations).with_date_format(Some("Y/m/d".to_string()));

        let widget = inference.infer(&field("released", FieldType::Date));

        assert_eq!(widget.format.as_deref(), Some("Y/m/d"));
    }

    #[test]
    fn test_temporal_and_boolean_types_get_typed_widgets() {
        let config = FormConfig::default();
        let inference = WidgetInference::new(&config, &NoRelations);

        let cases = [
            (FieldType::Date, WidgetKind::DateGroup, Some("d-m-Y")),
            (FieldType::Time, WidgetKind::TimeGroup, Some("H:i:s")),
            (FieldType::DateTime, WidgetKind::DateTimeGroup, Some("d-m-Y H:i:s")),
            (FieldType::Boolean, WidgetKind::Checkbox, None),
        ];
        for (field_type, kind, format) in cases {
            let widget = inference.infer(&field("f", field_type.clone()));
            assert_eq!(widget.kind, kind, "{}", field_type);
            assert_eq!(widget.format.as_deref(), format, "{}", field_type);
            assert_eq!(widget.kind.is_temporal(), format.is_some());
        }
    }

    #[test]
    fn test_collapsed_types_render_as_textarea() {
        let config = FormConfig {
            collapse_untyped_fields: true,
            ..FormConfig::default()
        };
        let inference = WidgetInference::new(&config, &NoRelations);

        for field_type in [
            FieldType::Date,
            FieldType::Time,
            FieldType::DateTime,
            FieldType::Boolean,
        ] {
            let widget = inference.infer(&field("f", field_type.clone()));
            assert_eq!(widget.kind, WidgetKind::Textarea, "{}", field_type);
        }
    }

    #[test]
    fn test_text_types() {
        let config = FormConfig::default();
        let inference = WidgetInference::new(&config, &NoRelations);

        assert_eq!(
            inference.infer(&field("notes", FieldType::LongText)).kind,
            WidgetKind::Textarea
        );
        assert_eq!(
            inference
                .infer(&field("name", FieldType::ShortText).with_value("one line"))
                .kind,
            WidgetKind::Text
        );
        assert_eq!(
            inference
                .infer(&field("name", FieldType::ShortText).with_value("two\nlines"))
                .kind,
            WidgetKind::Textarea
        );
        assert_eq!(
            inference
                .infer(&field("price", FieldType::Other("decimal".to_string())))
                .kind,
            WidgetKind::Text
        );
    }

    #[test]
    fn test_required_field_gets_labelled_rule() {
        let config = FormConfig::default();
        let inference = WidgetInference::new(&config, &NoRelations);

        let widget = inference.infer(
            &field("status", FieldType::Integer)
                .with_label("Current state")
                .required(),
        );

        assert_eq!(widget.label, "Current state");
        let kinds: Vec<_> = widget.rules.iter().map(|rule| rule.kind.clone()).collect();
        assert_eq!(kinds, vec![RuleKind::Numeric, RuleKind::Required]);
        assert_eq!(widget.rules[1].message, "The field Current state is required.");
    }

    #[test]
    fn test_static_presentation() {
        let config = FormConfig::default();
        let inference = WidgetInference::new(&config, &NoRelations);

        let widget = inference.infer(
            &field("created", FieldType::Date).presented_as(Presentation::Static),
        );

        assert_eq!(widget.kind, WidgetKind::Static);
        assert!(widget.format.is_none());
    }

    #[test]
    fn test_inference_is_idempotent() {
        let config = named_config();
        let store = category_store();
        let inference = WidgetInference::new(&config, &store);
        let descriptor = field("category_id", FieldType::Integer)
            .with_relation(Relation::new("categories", "id"))
            .required();

        assert_eq!(inference.infer(&descriptor), inference.infer(&descriptor));
    }
}
