use courier_model::ModelError;

#[test]
fn error_display_key_not_found() {
    let err = ModelError::KeyNotFound("unknown_field".into());
    let msg = format!("{err}");
    assert!(msg.contains("key not found"));
    assert!(msg.contains("unknown_field"));
}

#[test]
fn error_display_not_a_mapping() {
    let err = ModelError::NotAMapping {
        type_name: "User".into(),
        found: "array",
    };
    let msg = format!("{err}");
    assert!(msg.contains("User"));
    assert!(msg.contains("array"));
}

#[test]
fn error_display_type_mismatch() {
    let err = ModelError::TypeMismatch {
        alias: "user".into(),
        expected: "User".into(),
        found: "Chat".into(),
    };
    assert_eq!(format!("{err}"), "field user expects User, got Chat");
}

#[test]
fn error_display_wrong_type() {
    let err = ModelError::WrongType {
        expected: "User".into(),
        found: "MessageEntity".into(),
    };
    assert_eq!(
        format!("{err}"),
        "expected an object of type User, got MessageEntity"
    );
}

#[test]
fn error_display_not_configured() {
    let err = ModelError::NotConfigured {
        what: "Bot",
        hint: "set it".into(),
    };
    assert!(format!("{err}").contains("Bot is not configured"));
}

#[test]
fn error_from_serde_json() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: ModelError = json_err.into();
    assert!(format!("{err}").contains("serialization error"));
}
