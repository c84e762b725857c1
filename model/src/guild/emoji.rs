use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Snowflake;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Emoji {
    pub id: Option<Snowflake>,
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    pub require_colons: Option<bool>,
    pub managed: Option<bool>,
    pub animated: Option<bool>,
    pub available: Option<bool>,
}

impl Emoji {
    pub fn to_partial(&self) -> PartialEmoji {
        PartialEmoji {
            id: self.id,
            name: self.name.clone(),
            animated: self.animated.unwrap_or(false),
        }
    }
}

// very dodgy but works for our use case
impl PartialEq for Emoji {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(self_id), Some(other_id)) = (self.id, other.id) {
            return self_id == other_id;
        }

        false
    }
}

/// Either a custom emoji (id set) or a unicode emoji (name only).
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct PartialEmoji {
    pub id: Option<Snowflake>,
    pub name: Option<String>,
    #[serde(default)]
    pub animated: bool,
}

impl PartialEmoji {
    pub fn unicode(emoji: impl Into<String>) -> PartialEmoji {
        PartialEmoji {
            id: None,
            name: Some(emoji.into()),
            animated: false,
        }
    }

    pub fn custom(name: impl Into<String>, id: Snowflake, animated: bool) -> PartialEmoji {
        PartialEmoji {
            id: Some(id),
            name: Some(name.into()),
            animated,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.id.is_some()
    }

    // <a:name:id>, <:name:id>, a:name:id or name:id
    fn parse_custom(s: &str) -> Option<PartialEmoji> {
        let inner = s.strip_prefix('<').unwrap_or(s);
        let inner = inner.strip_suffix('>').unwrap_or(inner);

        let parts: Vec<&str> = inner.split(':').collect();
        let (animated, name, id) = match parts.as_slice() {
            [name, id] | ["", name, id] => (false, *name, *id),
            ["a", name, id] => (true, *name, *id),
            _ => return None,
        };

        let valid_name =
            !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        let valid_id = (13..=20).contains(&id.len()) && id.chars().all(|c| c.is_ascii_digit());

        if !valid_name || !valid_id {
            return None;
        }

        Some(PartialEmoji::custom(name, Snowflake(id.parse().ok()?), animated))
    }
}

impl FromStr for PartialEmoji {
    type Err = ParseEmojiError;

    /// Parses the chat syntax for custom emojis, falling back to treating the input as a
    /// unicode emoji. A trailing variation selector is stripped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(emoji) = PartialEmoji::parse_custom(s) {
            return Ok(emoji);
        }

        let name = s.trim_end_matches('\u{fe0f}');
        if name.is_empty() {
            return Err(ParseEmojiError(s.to_owned()));
        }

        Ok(PartialEmoji::unicode(name))
    }
}

impl fmt::Display for PartialEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("_");
        match self.id {
            Some(id) if self.animated => write!(f, "<a:{}:{}>", name, id),
            Some(id) => write!(f, "<:{}:{}>", name, id),
            None => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseEmojiError(pub String);

impl fmt::Display for ParseEmojiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid emoji {:?}", self.0)
    }
}

impl std::error::Error for ParseEmojiError {}
