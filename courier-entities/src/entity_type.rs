use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EntityError;

/// Kind of a special entity inside message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageEntityType {
    /// `@username`
    Mention,
    Hashtag,
    Cashtag,
    BotCommand,
    Url,
    Email,
    PhoneNumber,
    Bold,
    Italic,
    /// Monowidth string.
    Code,
    /// Monowidth block.
    Pre,
    /// Clickable text URL.
    TextLink,
    /// Mention of a user without a username.
    TextMention,
}

impl MessageEntityType {
    pub const ALL: [Self; 13] = [
        Self::Mention,
        Self::Hashtag,
        Self::Cashtag,
        Self::BotCommand,
        Self::Url,
        Self::Email,
        Self::PhoneNumber,
        Self::Bold,
        Self::Italic,
        Self::Code,
        Self::Pre,
        Self::TextLink,
        Self::TextMention,
    ];

    /// Wire tag, in snake case.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mention => "mention",
            Self::Hashtag => "hashtag",
            Self::Cashtag => "cashtag",
            Self::BotCommand => "bot_command",
            Self::Url => "url",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Code => "code",
            Self::Pre => "pre",
            Self::TextLink => "text_link",
            Self::TextMention => "text_mention",
        }
    }
}

impl fmt::Display for MessageEntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageEntityType {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EntityError::UnknownEntityType(s.to_owned()))
    }
}

impl PartialEq<str> for MessageEntityType {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}
