use courier_entities::register_all;
use courier_model::{StructuredObject, registry};
use serde_json::json;

#[test]
fn entity_types_are_registered() {
    register_all();
    let names = registry::type_names();
    assert!(names.contains(&"User".to_owned()));
    assert!(names.contains(&"MessageEntity".to_owned()));
}

#[test]
fn build_by_type_name() {
    register_all();
    let schema = registry::lookup("MessageEntity").unwrap();
    let mut obj =
        StructuredObject::from_json(schema, json!({"type": "url", "offset": 0, "length": 3}))
            .unwrap();
    assert_eq!(obj.to_primitive()["type"], "url");
}
