use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::{Emoji, Role, SystemChannelFlags};
use crate::{ImageHash, Snowflake};

/// Guild object as returned by the REST API. Gateway-only fields (members, presences,
/// voice states) are never present here.
#[derive(Serialize, Deserialize, Debug)]
pub struct Guild {
    pub id: Snowflake,
    pub name: Box<str>,
    pub icon: Option<ImageHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splash: Option<ImageHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery_splash: Option<ImageHash>,
    pub owner_id: Snowflake,
    #[serde(default)]
    pub afk_channel_id: Option<Snowflake>,
    pub afk_timeout: u16,
    #[serde(default)]
    pub widget_enabled: bool,
    #[serde(default)]
    pub widget_channel_id: Option<Snowflake>,
    pub verification_level: VerificationLevel,
    pub default_message_notifications: DefaultMessageNotifications,
    pub explicit_content_filter: ExplicitContentFilterLevel,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub emojis: Vec<Emoji>,
    #[serde(default)]
    pub features: Vec<Box<str>>,
    #[serde(default)]
    pub mfa_level: MFALevel,
    #[serde(default)]
    pub application_id: Option<Snowflake>,
    #[serde(default)]
    pub system_channel_id: Option<Snowflake>,
    #[serde(default)]
    pub system_channel_flags: SystemChannelFlags,
    #[serde(default)]
    pub rules_channel_id: Option<Snowflake>,
    #[serde(default)]
    pub max_members: Option<u32>,
    #[serde(default)]
    pub vanity_url_code: Option<Box<str>>,
    #[serde(default)]
    pub description: Option<Box<str>>,
    #[serde(default)]
    pub banner: Option<ImageHash>,
    #[serde(default)]
    pub premium_tier: PremiumTier,
    #[serde(default)]
    pub preferred_locale: Option<Box<str>>,
    #[serde(default)]
    pub public_updates_channel_id: Option<Snowflake>,
    #[serde(default)]
    pub nsfw_level: NsfwLevel,
    #[serde(default)]
    pub premium_progress_bar_enabled: bool,
}

impl Guild {
    pub fn role(&self, id: Snowflake) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }
}

impl PartialEq for Guild {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Copy, Clone, Eq, PartialEq, Default)]
#[repr(u8)]
pub enum VerificationLevel {
    #[default]
    None = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    VeryHigh = 4,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Copy, Clone, Eq, PartialEq, Default)]
#[repr(u8)]
pub enum DefaultMessageNotifications {
    #[default]
    AllMessages = 0,
    OnlyMentions = 1,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Copy, Clone, Eq, PartialEq, Default)]
#[repr(u8)]
pub enum ExplicitContentFilterLevel {
    #[default]
    Disabled = 0,
    MembersWithoutRoles = 1,
    AllMembers = 2,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Copy, Clone, Eq, PartialEq, Default)]
#[repr(u8)]
pub enum MFALevel {
    #[default]
    None = 0,
    Elevated = 1,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Copy, Clone, Eq, PartialEq, Default)]
#[repr(u8)]
pub enum PremiumTier {
    #[default]
    None = 0,
    TierOne = 1,
    TierTwo = 2,
    TierThree = 3,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Copy, Clone, Eq, PartialEq, Default)]
#[repr(u8)]
pub enum NsfwLevel {
    #[default]
    Default = 0,
    Explicit = 1,
    Safe = 2,
    AgeRestricted = 3,
}
