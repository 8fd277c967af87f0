//! Integration tests validating JSON drafts against the profile schema.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use profile_form::{
    FieldPath, FormDraft, SchemaError, SchemaLimits, SelectedFile, TechField, UserSchema,
    Validation,
};
use rstest::{fixture, rstest};
use serde_json::json;

fn draft_from(value: &serde_json::Value) -> FormDraft {
    let mut draft = FormDraft::from_json(&value.to_string()).expect("draft parses");
    draft.avatar = vec![SelectedFile::from_metadata("me.jpg", "image/jpeg", 2048)];
    draft
}

#[fixture]
fn valid_json() -> serde_json::Value {
    json!({
        "name": "grace  hopper",
        "email": " Grace@Navy.MIL",
        "password": "cobol!",
        "techs": [
            {"title": "COBOL", "knowledge": 99},
            {"title": "FLOW-MATIC", "knowledge": "75.5"}
        ]
    })
}

#[rstest]
fn valid_draft_is_normalized(valid_json: serde_json::Value) {
    let schema = UserSchema::default();
    let mut value = valid_json;
    value["email"] = json!("Grace@Navy.MIL");

    let user = schema
        .validate(&draft_from(&value))
        .expect("schema is complete")
        .into_result()
        .expect("draft is valid");

    assert_eq!(user.name(), "Grace  Hopper");
    assert_eq!(user.email(), "grace@navy.mil");
    let levels: Vec<f64> = user.techs().iter().map(|tech| tech.knowledge()).collect();
    assert_eq!(levels, vec![99.0, 75.5]);
}

#[rstest]
fn surrounding_whitespace_fails_email_format(valid_json: serde_json::Value) {
    let validation = UserSchema::default()
        .validate(&draft_from(&valid_json))
        .expect("schema is complete");

    let errors = validation.errors().expect("draft is invalid");
    assert_eq!(
        errors.message(&FieldPath::Email),
        Some("invalid email format")
    );
}

#[rstest]
#[case::stricter_password(SchemaLimits { min_password_length: 10, ..SchemaLimits::default() }, FieldPath::Password, "minimum 10 characters")]
#[case::more_technologies(SchemaLimits { min_techs: 3, ..SchemaLimits::default() }, FieldPath::Techs, "insert at least 3 technologies")]
fn limits_shape_messages(
    valid_json: serde_json::Value,
    #[case] limits: SchemaLimits,
    #[case] path: FieldPath,
    #[case] expected: &str,
) {
    let mut value = valid_json;
    value["email"] = json!("grace@navy.mil");

    let validation = UserSchema::standard(&limits)
        .validate(&draft_from(&value))
        .expect("schema is complete");

    let errors = validation.errors().expect("draft is invalid");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.message(&path), Some(expected));
}

#[rstest]
fn every_failing_field_is_reported() {
    let draft = FormDraft::from_json(
        &json!({
            "name": "   ",
            "email": "nope",
            "password": "abc",
            "techs": [{"title": "", "knowledge": "lots"}]
        })
        .to_string(),
    )
    .expect("draft parses");

    let validation = UserSchema::default()
        .validate(&draft)
        .expect("schema is complete");

    let Validation::Invalid(errors) = validation else {
        panic!("expected an invalid draft");
    };
    let paths: Vec<FieldPath> = errors.iter().map(|(path, _)| *path).collect();
    assert_eq!(
        paths,
        vec![
            FieldPath::Avatar,
            FieldPath::Name,
            FieldPath::Email,
            FieldPath::Password,
            FieldPath::Techs,
            FieldPath::tech(0, TechField::Title),
            FieldPath::tech(0, TechField::Knowledge),
        ]
    );
}

#[rstest]
#[case::unknown_field(r#"{"name": "a", "email": "b", "password": "c", "techs": [], "age": 3}"#)]
#[case::wrong_shape(r#"{"name": 1}"#)]
#[case::not_json("name=ada")]
fn malformed_drafts_are_refused(#[case] json: &str) {
    let error = FormDraft::from_json(json).expect_err("draft is malformed");
    assert!(matches!(error, SchemaError::MalformedDraft { .. }), "{error}");
}
