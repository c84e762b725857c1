use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::guild::PartialEmoji;
use crate::Snowflake;

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, Eq, PartialEq)]
#[repr(u8)]
pub enum ForumSortOrder {
    LatestActivity = 0,
    CreationDate = 1,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, Eq, PartialEq)]
#[repr(u8)]
pub enum ForumLayout {
    NotSet = 0,
    ListView = 1,
    GalleryView = 2,
}

/// Emoji reference in the shape used by forum tags and default reactions.
/// Exactly one of the two fields is set, the other is sent as `null`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct DefaultReaction {
    #[serde(serialize_with = "Snowflake::serialize_option_to_int")]
    pub emoji_id: Option<Snowflake>,
    pub emoji_name: Option<String>,
}

impl From<&PartialEmoji> for DefaultReaction {
    fn from(emoji: &PartialEmoji) -> Self {
        match emoji.id {
            Some(id) => DefaultReaction {
                emoji_id: Some(id),
                emoji_name: None,
            },
            None => DefaultReaction {
                emoji_id: None,
                emoji_name: emoji.name.clone(),
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct ForumTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    pub name: String,
    #[serde(default)]
    pub moderated: bool,
    #[serde(flatten)]
    pub emoji: DefaultReaction,
}

impl ForumTag {
    pub fn new(name: impl Into<String>) -> ForumTag {
        ForumTag {
            id: None,
            name: name.into(),
            moderated: false,
            emoji: DefaultReaction::default(),
        }
    }

    pub fn moderated(mut self, moderated: bool) -> ForumTag {
        self.moderated = moderated;
        self
    }

    pub fn emoji(mut self, emoji: &PartialEmoji) -> ForumTag {
        self.emoji = DefaultReaction::from(emoji);
        self
    }
}
