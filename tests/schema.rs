//! Stored-schema conversion and static-text token substitution.
mod common;
use formflow::prelude::*;

#[test]
fn stored_form_converts_and_preserves_field_order() {
    let json = r#"{
        "id": "part-exchange",
        "staticText": ["Valuations by {dealer.name}"],
        "fields": [
            {"fieldName": "reg", "label": "Registration", "type": "TEXT", "required": true},
            {"fieldName": "mileage", "label": "Mileage", "type": "NUMBER", "required": false},
            {"fieldName": "condition", "label": "Condition", "type": "DROPDOWN",
             "required": true, "options": {"choices": ["Excellent", "Good", "Poor"]}},
            {"fieldName": "licence", "label": "Driving licence", "type": "LICENCE_SCAN",
             "required": true, "extractionSourceKey": "licence_number"}
        ]
    }"#;

    let form = FormDefinition::from_json(json).unwrap();
    assert_eq!(form.id, "part-exchange");
    let order: Vec<&str> = form.fields.iter().map(|f| f.field_name.as_str()).collect();
    assert_eq!(order, ["reg", "mileage", "condition", "licence"]);

    let condition = form.field("condition").unwrap();
    assert_eq!(condition.field_type, FieldType::Dropdown);
    assert_eq!(condition.choices, ["Excellent", "Good", "Poor"]);

    let licence = form.field("licence").unwrap();
    assert_eq!(
        licence.extraction_source_key.as_deref(),
        Some("licence_number")
    );
}

#[test]
fn unknown_type_tag_falls_back_to_text_control() {
    let json = r#"{
        "id": "f",
        "fields": [
            {"fieldName": "widget", "label": "Widget", "type": "HOLOGRAM_PICKER", "required": false}
        ]
    }"#;

    let form = FormDefinition::from_json(json).unwrap();
    let widget = form.field("widget").unwrap();
    assert_eq!(widget.field_type, FieldType::Unknown);

    let session = FormSession::new(form);
    let plan = session.render_plan();
    assert_eq!(
        plan[0].control,
        RenderControl::TextInput { multiline: false }
    );
}

#[test]
fn duplicate_field_names_are_rejected() {
    let json = r#"{
        "id": "f",
        "fields": [
            {"fieldName": "reg", "label": "A", "type": "TEXT", "required": false},
            {"fieldName": "reg", "label": "B", "type": "TEXT", "required": false}
        ]
    }"#;

    let err = FormDefinition::from_json(json).unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateFieldName(name) if name == "reg"));
}

#[test]
fn choice_field_without_choices_is_rejected() {
    let json = r#"{
        "id": "f",
        "fields": [
            {"fieldName": "pick", "label": "Pick", "type": "RADIO", "required": true}
        ]
    }"#;

    let err = FormDefinition::from_json(json).unwrap_err();
    assert!(matches!(err, SchemaError::MissingChoices { field } if field == "pick"));
}

#[test]
fn empty_field_name_is_rejected_with_position() {
    let json = r#"{
        "id": "f",
        "fields": [
            {"fieldName": "ok", "label": "Ok", "type": "TEXT", "required": false},
            {"fieldName": "", "label": "Broken", "type": "TEXT", "required": false}
        ]
    }"#;

    let err = FormDefinition::from_json(json).unwrap_err();
    assert!(matches!(err, SchemaError::EmptyFieldName { index: 1 }));
}

#[test]
fn dealer_tokens_substitute_known_keys_and_keep_unknown_ones() {
    let dealer = DealerProfile {
        name: "Hilltop Motors".to_string(),
        address: "1 Forecourt Way".to_string(),
        phone: "01632 960000".to_string(),
        email: "sales@hilltop.example".to_string(),
    };

    assert_eq!(
        substitute_tokens("Sold by {dealer.name}, call {dealer.phone}", &dealer),
        "Sold by Hilltop Motors, call 01632 960000"
    );
    // Typos stay visible instead of vanishing.
    assert_eq!(
        substitute_tokens("See {dealer.fax} for details", &dealer),
        "See {dealer.fax} for details"
    );
    // An unterminated placeholder is emitted verbatim.
    assert_eq!(
        substitute_tokens("Broken {dealer.name", &dealer),
        "Broken {dealer.name"
    );
}

#[test]
fn static_text_renders_in_order() {
    let dealer = DealerProfile {
        name: "Hilltop Motors".to_string(),
        ..DealerProfile::default()
    };
    let form = common::appraisal_form();
    let rendered = formflow::schema::render_static_text(&form.static_text, &dealer);
    assert_eq!(rendered, ["Sold by Hilltop Motors, "]);
}
