use serde::{Deserialize, Serialize};

use crate::{Colour, ImageHash, PermissionBitSet, Snowflake};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Role {
    pub id: Snowflake,
    pub name: String,
    pub color: Colour,
    pub hoist: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<ImageHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unicode_emoji: Option<String>,
    pub position: u16,
    pub permissions: PermissionBitSet,
    pub managed: bool,
    pub mentionable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<RoleTags>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct RoleTags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_listing_id: Option<Snowflake>,
}
