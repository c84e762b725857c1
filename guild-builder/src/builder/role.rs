use model::guild::RoleTags;
use model::{Colour, PermissionBitSet, Snowflake};

use crate::payload::RolePayload;
use crate::{bytes_to_base64_data, Result};

pub const DEFAULT_ROLE_NAME: &str = "new role";

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DisplayIcon {
    /// Raw image bytes, uploaded as the role icon.
    Image(Vec<u8>),
    UnicodeEmoji(String),
}

impl From<Vec<u8>> for DisplayIcon {
    fn from(data: Vec<u8>) -> Self {
        DisplayIcon::Image(data)
    }
}

impl From<&str> for DisplayIcon {
    fn from(emoji: &str) -> Self {
        DisplayIcon::UnicodeEmoji(emoji.to_owned())
    }
}

impl From<String> for DisplayIcon {
    fn from(emoji: String) -> Self {
        DisplayIcon::UnicodeEmoji(emoji)
    }
}

/// Role definition passed to `CreateGuild::add_role`.
#[derive(Debug, Clone, Default)]
pub struct NewRole {
    name: Option<String>,
    permissions: Option<PermissionBitSet>,
    colour: Option<Colour>,
    hoist: Option<bool>,
    display_icon: Option<DisplayIcon>,
    mentionable: Option<bool>,
    tags: Option<RoleTags>,
}

impl NewRole {
    pub fn new(name: impl Into<String>) -> NewRole {
        NewRole {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn permissions(mut self, permissions: impl Into<PermissionBitSet>) -> NewRole {
        self.permissions = Some(permissions.into());
        self
    }

    pub fn colour(mut self, colour: impl Into<Colour>) -> NewRole {
        self.colour = Some(colour.into());
        self
    }

    pub fn color(self, color: impl Into<Colour>) -> NewRole {
        self.colour(color)
    }

    pub fn hoist(mut self, hoist: bool) -> NewRole {
        self.hoist = Some(hoist);
        self
    }

    pub fn display_icon(mut self, icon: impl Into<DisplayIcon>) -> NewRole {
        self.display_icon = Some(icon.into());
        self
    }

    pub fn mentionable(mut self, mentionable: bool) -> NewRole {
        self.mentionable = Some(mentionable);
        self
    }

    pub fn tags(mut self, tags: RoleTags) -> NewRole {
        self.tags = Some(tags);
        self
    }

    pub(crate) fn into_pending(self, id: Snowflake) -> Result<PendingRole> {
        let (icon, unicode_emoji) = match self.display_icon {
            Some(DisplayIcon::Image(data)) => (Some(bytes_to_base64_data(&data)?), None),
            Some(DisplayIcon::UnicodeEmoji(emoji)) => (None, Some(emoji)),
            None => (None, None),
        };

        Ok(PendingRole {
            id,
            name: self.name.unwrap_or_else(|| DEFAULT_ROLE_NAME.to_owned()),
            colour: self.colour.unwrap_or_default(),
            hoist: self.hoist.unwrap_or(false),
            icon,
            unicode_emoji,
            permissions: self.permissions.unwrap_or_default(),
            tags: self.tags,
            mentionable: self.mentionable,
        })
    }
}

/// A role stored on the builder, keyed by its placeholder id.
#[derive(Debug, Clone)]
pub struct PendingRole {
    id: Snowflake,
    name: String,
    colour: Colour,
    hoist: bool,
    icon: Option<String>,
    unicode_emoji: Option<String>,
    permissions: PermissionBitSet,
    tags: Option<RoleTags>,
    mentionable: Option<bool>,
}

impl PendingRole {
    pub fn id(&self) -> Snowflake {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn permissions(&self) -> PermissionBitSet {
        self.permissions
    }

    pub fn to_payload(&self) -> RolePayload {
        RolePayload {
            id: self.id,
            name: self.name.clone(),
            hoist: self.hoist,
            permissions: self.permissions,
            color: self.colour,
            icon: self.icon.clone(),
            unicode_emoji: self.unicode_emoji.clone(),
            tags: self.tags.clone(),
            mentionable: self.mentionable,
        }
    }
}
