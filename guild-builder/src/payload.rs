//! Request bodies for guild creation. Every optional field is omitted unless it was set.

use serde::Serialize;

use model::channel::{
    ChannelType, DefaultReaction, ForumLayout, ForumSortOrder, ForumTag, PermissionOverwrite,
    ThreadArchiveDuration, VideoQualityMode,
};
use model::guild::{
    DefaultMessageNotifications, ExplicitContentFilterLevel, RoleTags, SystemChannelFlags,
    VerificationLevel,
};
use model::{Colour, PermissionBitSet, Snowflake};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GuildPayload {
    pub name: String,
    pub verification_level: VerificationLevel,
    pub default_message_notifications: DefaultMessageNotifications,
    pub explicit_content_filter: ExplicitContentFilterLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afk_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_channel_flags: Option<SystemChannelFlags>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "Snowflake::serialize_option_to_int"
    )]
    pub afk_channel_id: Option<Snowflake>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "Snowflake::serialize_option_to_int"
    )]
    pub system_channel_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<ChannelPayload>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<RolePayload>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChannelPayload {
    #[serde(serialize_with = "Snowflake::serialize_to_int")]
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub name: String,
    #[serde(flatten)]
    pub options: ChannelOptionsPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u16>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permission_overwrites: Vec<PermissionOverwrite>,
}

/// Kind-specific channel fields, merged into the channel object.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ChannelOptionsPayload {
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "Snowflake::serialize_option_to_int"
    )]
    pub parent_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_user: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_auto_archive_duration: Option<ThreadArchiveDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_thread_rate_limit_per_user: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_limit: Option<u16>,
    // Some(None) is sent as an explicit null (automatic region)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtc_region: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_quality_mode: Option<VideoQualityMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort_order: Option<ForumSortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_reaction_emoji: Option<DefaultReaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_forum_layout: Option<ForumLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_tags: Option<Vec<ForumTag>>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RolePayload {
    #[serde(serialize_with = "Snowflake::serialize_to_int")]
    pub id: Snowflake,
    pub name: String,
    pub hoist: bool,
    pub permissions: PermissionBitSet,
    pub color: Colour,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unicode_emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<RoleTags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentionable: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_are_merged_into_channel() {
        let channel = ChannelPayload {
            id: Snowflake(4),
            channel_type: ChannelType::GuildVoice,
            name: "Lounge".to_owned(),
            options: ChannelOptionsPayload {
                parent_id: Some(Snowflake(1)),
                rtc_region: Some(None),
                ..Default::default()
            },
            position: Some(2),
            permission_overwrites: Vec::new(),
        };

        assert_eq!(
            serde_json::to_value(&channel).unwrap(),
            json!({
                "id": 4,
                "type": 2,
                "name": "Lounge",
                "parent_id": 1,
                "rtc_region": null,
                "position": 2
            })
        );
    }
}
