use courier_entities::{MessageEntity, MessageEntityType, User};
use courier_model::{ModelError, ObjectType, Value};
use pretty_assertions::assert_eq;
use serde_json::{Value as JsonValue, json};

fn entity(data: JsonValue) -> MessageEntity {
    MessageEntity::from_json(data).unwrap()
}

// ── Construction & fields ────────────────────────────────────────

#[test]
fn fields_accessible() {
    let e = entity(json!({"type": "text_link", "offset": 2, "length": 3, "url": "https://x.y"}));
    assert_eq!(e.kind(), Some("text_link"));
    assert_eq!(e.entity_type(), Some(MessageEntityType::TextLink));
    assert_eq!(e.offset(), 2);
    assert_eq!(e.length(), 3);
    assert_eq!(e.url(), Some("https://x.y"));
    assert!(e.user().is_none());
}

#[test]
fn offset_and_length_default_to_zero() {
    let mut e = entity(json!({"type": "bold"}));
    assert_eq!(e.offset(), 0);
    assert_eq!(e.length(), 0);
    assert_eq!(
        JsonValue::Object(e.to_primitive()),
        json!({"type": "bold", "offset": 0, "length": 0})
    );
}

#[test]
fn unknown_type_tag_is_kept() {
    let e = entity(json!({"type": "spoiler"}));
    assert_eq!(e.kind(), Some("spoiler"));
    assert_eq!(e.entity_type(), None);
}

#[test]
fn nested_user_is_typed() {
    let e = entity(json!({
        "type": "text_mention",
        "offset": 0,
        "length": 4,
        "user": {"id": 42, "is_bot": false, "first_name": "Jane"}
    }));
    let user = e.user().unwrap();
    assert_eq!(user.id(), Some(42));
    assert_eq!(user.first_name(), Some("Jane"));

    let raw = e.as_object().value_of("user").and_then(Value::as_object).unwrap();
    assert!(raw.schema().is_a(&User::schema()));
    assert_eq!(raw.conf().parent().unwrap().to_string(), "MessageEntity.user");
}

#[test]
fn unmodeled_fields_survive_export() {
    let mut e = entity(json!({"type": "pre", "offset": 0, "length": 1, "language": "rust"}));
    assert_eq!(e.to_primitive()["language"], "rust");
    let err = e.as_object_mut().set("language", "go").unwrap_err();
    assert!(matches!(err, ModelError::KeyNotFound(_)));
}

#[test]
fn as_text_renders_json() {
    let mut e = entity(json!({"type": "bold", "offset": 1, "length": 2}));
    assert_eq!(e.as_text().unwrap(), r#"{"type":"bold","offset":1,"length":2}"#);
}

// ── Equality ─────────────────────────────────────────────────────

#[test]
fn equal_entities_compare_equal() {
    let a = entity(json!({"type": "bold", "offset": 1, "length": 2}));
    let b = entity(json!({"length": 2, "type": "bold", "offset": 1}));
    assert_eq!(a, b);
}

#[test]
fn entity_and_user_with_same_values_differ() {
    let e = entity(json!({"type": "bold"}));
    let u = User::from_json(json!({"type": "bold", "offset": 0, "length": 0})).unwrap();
    // Identical value sets, so only the type tells them apart.
    assert_eq!(e.as_object().values(), u.as_object().values());
    assert_eq!(
        e.as_object().structural_hash(),
        u.as_object().structural_hash()
    );
    assert_ne!(e.as_object(), u.as_object());
}

// ── Text extraction ──────────────────────────────────────────────

#[test]
fn get_text_ascii() {
    let e = entity(json!({"type": "bold", "offset": 6, "length": 5}));
    assert_eq!(e.get_text("Hello world!"), "world");
}

#[test]
fn get_text_counts_utf16_units() {
    // The emoji is two UTF-16 code units.
    let text = "😀 hi there";
    let e = entity(json!({"type": "italic", "offset": 3, "length": 2}));
    assert_eq!(e.get_text(text), "hi");
}

#[test]
fn get_text_clamps_out_of_range() {
    let e = entity(json!({"type": "code", "offset": 4, "length": 100}));
    assert_eq!(e.get_text("abcdef"), "ef");
    let past_end = entity(json!({"type": "code", "offset": 50, "length": 2}));
    assert_eq!(past_end.get_text("abc"), "");
}
