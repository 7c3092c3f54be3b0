use courier_entities::{EntityError, MessageEntityType};
use pretty_assertions::assert_eq;

#[test]
fn wire_tags_are_snake_case() {
    assert_eq!(MessageEntityType::BotCommand.as_str(), "bot_command");
    assert_eq!(MessageEntityType::PhoneNumber.to_string(), "phone_number");
    assert_eq!(MessageEntityType::TextMention.as_str(), "text_mention");
}

#[test]
fn parse_every_tag() {
    for kind in MessageEntityType::ALL {
        assert_eq!(kind.as_str().parse::<MessageEntityType>().unwrap(), kind);
    }
}

#[test]
fn parse_unknown_tag_fails() {
    let err = "blink".parse::<MessageEntityType>().unwrap_err();
    assert!(matches!(err, EntityError::UnknownEntityType(ref s) if s == "blink"));
}

#[test]
fn serde_matches_wire_tag() {
    for kind in MessageEntityType::ALL {
        let json = serde_json::to_value(kind).unwrap();
        assert_eq!(json, serde_json::Value::String(kind.as_str().to_owned()));
        let back: MessageEntityType = serde_json::from_value(json).unwrap();
        assert_eq!(back, kind);
    }
}

#[test]
fn compares_with_str() {
    assert!(MessageEntityType::Hashtag == *"hashtag");
}
