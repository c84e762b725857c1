//! JSON guild templates, turned into a `CreateGuild` by resolving template keys to
//! placeholder ids.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use model::channel::{
    ChannelType, ForumLayout, ForumSortOrder, ForumTag, ThreadArchiveDuration, VideoQualityMode,
};
use model::guild::{
    DefaultMessageNotifications, ExplicitContentFilterLevel, SystemChannelFlags,
    VerificationLevel,
};
use model::{Colour, PermissionBitSet, Snowflake};

use crate::builder::{
    ChannelOption, NewChannel, NewRole, OverwritePermissions, OverwriteTarget,
};
use crate::{CreateGuild, Error, Result};

#[derive(Deserialize, Debug)]
pub struct GuildTemplate {
    pub name: String,
    #[serde(default)]
    pub afk_timeout: Option<u32>,
    #[serde(default)]
    pub verification_level: Option<VerificationLevel>,
    #[serde(default)]
    pub default_message_notifications: Option<DefaultMessageNotifications>,
    #[serde(default)]
    pub explicit_content_filter: Option<ExplicitContentFilterLevel>,
    #[serde(default)]
    pub system_channel_flags: Option<SystemChannelFlags>,
    #[serde(default)]
    pub roles: Vec<RoleTemplate>,
    #[serde(default)]
    pub channels: Vec<ChannelTemplate>,
}

#[derive(Deserialize, Debug)]
pub struct RoleTemplate {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub permissions: Option<PermissionBitSet>,
    #[serde(default, alias = "color")]
    pub colour: Option<Colour>,
    #[serde(default)]
    pub hoist: Option<bool>,
    #[serde(default)]
    pub mentionable: Option<bool>,
    #[serde(default)]
    pub unicode_emoji: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ChannelTemplate {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub name: String,
    #[serde(default)]
    pub position: Option<u16>,
    /// Key of a category declared earlier in the template.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub overwrites: Vec<OverwriteTemplate>,

    #[serde(default)]
    pub news: Option<bool>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub slowmode_delay: Option<u16>,
    #[serde(default)]
    pub nsfw: Option<bool>,
    #[serde(default)]
    pub default_auto_archive_duration: Option<ThreadArchiveDuration>,
    #[serde(default)]
    pub default_thread_slowmode_delay: Option<u16>,
    #[serde(default)]
    pub system_channel: Option<bool>,
    #[serde(default)]
    pub bitrate: Option<u32>,
    #[serde(default)]
    pub user_limit: Option<u16>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub rtc_region: Option<Option<String>>,
    #[serde(default)]
    pub video_quality_mode: Option<VideoQualityMode>,
    #[serde(default)]
    pub afk_channel: Option<bool>,
    #[serde(default)]
    pub default_sort_order: Option<ForumSortOrder>,
    #[serde(default)]
    pub default_reaction_emoji: Option<String>,
    #[serde(default)]
    pub default_layout: Option<ForumLayout>,
    #[serde(default)]
    pub available_tags: Option<Vec<ForumTag>>,
}

/// Targets either a template role (`role`) or an existing user (`member`).
#[derive(Deserialize, Debug)]
pub struct OverwriteTemplate {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub member: Option<Snowflake>,
    #[serde(default)]
    pub allow: PermissionBitSet,
    #[serde(default)]
    pub deny: PermissionBitSet,
}

// Keeps an explicit `null` apart from a missing field.
fn deserialize_nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl GuildTemplate {
    pub fn from_path(path: impl AsRef<Path>) -> Result<GuildTemplate> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn apply(&self) -> Result<CreateGuild> {
        let mut guild = CreateGuild::new(self.name.as_str());

        if let Some(timeout) = self.afk_timeout {
            guild = guild.afk_timeout(timeout);
        }
        if let Some(level) = self.verification_level {
            guild = guild.verification_level(level);
        }
        if let Some(level) = self.default_message_notifications {
            guild = guild.default_message_notifications(level);
        }
        if let Some(level) = self.explicit_content_filter {
            guild = guild.explicit_content_filter(level);
        }
        if let Some(flags) = self.system_channel_flags {
            guild = guild.system_channel_flags(flags);
        }

        let mut roles: HashMap<&str, Snowflake> = HashMap::new();
        for role in &self.roles {
            ensure_unique(&roles, &role.key)?;
            let id = guild.add_role(role.to_new_role())?;
            roles.insert(role.key.as_str(), id);
        }

        let mut channels: HashMap<&str, Snowflake> = HashMap::new();
        for channel in &self.channels {
            if let Some(key) = &channel.key {
                ensure_unique(&channels, key)?;
            }

            let id = guild.add_channel(channel.to_new_channel(&roles, &channels)?)?;
            if let Some(key) = &channel.key {
                channels.insert(key.as_str(), id);
            }
        }

        Ok(guild)
    }
}

impl RoleTemplate {
    fn to_new_role(&self) -> NewRole {
        let mut role = match &self.name {
            Some(name) => NewRole::new(name.as_str()),
            None => NewRole::default(),
        };

        if let Some(permissions) = self.permissions {
            role = role.permissions(permissions);
        }
        if let Some(colour) = self.colour {
            role = role.colour(colour);
        }
        if let Some(hoist) = self.hoist {
            role = role.hoist(hoist);
        }
        if let Some(mentionable) = self.mentionable {
            role = role.mentionable(mentionable);
        }
        if let Some(emoji) = &self.unicode_emoji {
            role = role.display_icon(emoji.as_str());
        }

        role
    }
}

fn ensure_unique(keys: &HashMap<&str, Snowflake>, key: &str) -> Result<()> {
    if keys.contains_key(key) {
        return Error::DuplicateTemplateKey(key.to_owned()).into();
    }

    Ok(())
}

fn resolve(keys: &HashMap<&str, Snowflake>, key: &str) -> Result<Snowflake> {
    keys.get(key)
        .copied()
        .ok_or_else(|| Error::UnknownTemplateKey(key.to_owned()))
}

impl ChannelTemplate {
    fn options(&self) -> Vec<ChannelOption> {
        let mut options = Vec::new();

        if let Some(v) = self.news {
            options.push(ChannelOption::News(v));
        }
        if let Some(v) = &self.topic {
            options.push(ChannelOption::Topic(v.clone()));
        }
        if let Some(v) = self.slowmode_delay {
            options.push(ChannelOption::SlowmodeDelay(v));
        }
        if let Some(v) = self.nsfw {
            options.push(ChannelOption::Nsfw(v));
        }
        if let Some(v) = self.default_auto_archive_duration {
            options.push(ChannelOption::DefaultAutoArchiveDuration(v));
        }
        if let Some(v) = self.default_thread_slowmode_delay {
            options.push(ChannelOption::DefaultThreadSlowmodeDelay(v));
        }
        if let Some(v) = self.system_channel {
            options.push(ChannelOption::SystemChannel(v));
        }
        if let Some(v) = self.bitrate {
            options.push(ChannelOption::Bitrate(v));
        }
        if let Some(v) = self.user_limit {
            options.push(ChannelOption::UserLimit(v));
        }
        if let Some(v) = &self.rtc_region {
            options.push(ChannelOption::RtcRegion(v.clone()));
        }
        if let Some(v) = self.video_quality_mode {
            options.push(ChannelOption::VideoQualityMode(v));
        }
        if let Some(v) = self.afk_channel {
            options.push(ChannelOption::AfkChannel(v));
        }
        if let Some(v) = self.default_sort_order {
            options.push(ChannelOption::DefaultSortOrder(v));
        }
        if let Some(v) = &self.default_reaction_emoji {
            options.push(ChannelOption::DefaultReactionEmoji(v.as_str().into()));
        }
        if let Some(v) = self.default_layout {
            options.push(ChannelOption::DefaultLayout(v));
        }
        if let Some(v) = &self.available_tags {
            options.push(ChannelOption::AvailableTags(v.clone()));
        }

        options
    }

    fn to_new_channel(
        &self,
        roles: &HashMap<&str, Snowflake>,
        channels: &HashMap<&str, Snowflake>,
    ) -> Result<NewChannel> {
        let mut channel = NewChannel::of_type(self.channel_type, self.name.as_str())?;

        if let Some(position) = self.position {
            channel = channel.position(position);
        }

        if let Some(category) = &self.category {
            channel = channel.parent(resolve(channels, category)?);
        }

        for overwrite in &self.overwrites {
            let target = match (&overwrite.role, overwrite.member) {
                (Some(key), _) => OverwriteTarget::Role(resolve(roles, key)?),
                (None, Some(member)) => OverwriteTarget::Member(member),
                (None, None) => return Error::MissingOverwriteTarget(self.name.clone()).into(),
            };

            channel = channel.overwrite(
                target,
                OverwritePermissions {
                    allow: overwrite.allow,
                    deny: overwrite.deny,
                },
            );
        }

        for option in self.options() {
            channel = channel.option(option);
        }

        Ok(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const TEMPLATE: &str = r#"{
        "name": "Book Club",
        "verification_level": 1,
        "afk_timeout": 600,
        "roles": [
            {"key": "everyone", "permissions": "1024"},
            {"key": "mods", "name": "Moderators", "color": 15158332, "hoist": true}
        ],
        "channels": [
            {"key": "info", "type": 4, "name": "Info"},
            {
                "type": 0,
                "name": "welcome",
                "category": "info",
                "topic": "Say hi",
                "bitrate": 64000,
                "system_channel": true,
                "overwrites": [
                    {"role": "everyone", "deny": "2048"},
                    {"member": "80351110224678912", "allow": "2048"}
                ]
            },
            {"type": 2, "name": "AFK", "afk_channel": true, "rtc_region": null},
            {
                "type": 15,
                "name": "discussions",
                "default_reaction_emoji": "📚",
                "available_tags": [{"name": "spoilers", "moderated": true, "emoji_id": null, "emoji_name": null}]
            }
        ]
    }"#;

    #[test]
    fn test_apply_template() {
        let template: GuildTemplate = serde_json::from_str(TEMPLATE).unwrap();
        let guild = template.apply().unwrap();
        let payload = serde_json::to_value(guild.build()).unwrap();

        assert_eq!(payload["verification_level"], 1);
        assert_eq!(payload["afk_timeout"], 600);
        assert_eq!(payload["roles"][1]["name"], "Moderators");
        assert_eq!(payload["roles"][1]["color"], 15158332);
        assert_eq!(payload["roles"][0]["name"], "new role");

        let channels = payload["channels"].as_array().unwrap();
        assert_eq!(channels.len(), 4);

        let welcome = &channels[1];
        assert_eq!(welcome["parent_id"], channels[0]["id"]);
        assert_eq!(welcome["topic"], "Say hi");
        assert!(welcome.get("bitrate").is_none());
        assert_eq!(
            welcome["permission_overwrites"],
            json!([
                {"allow": "0", "deny": "2048", "id": 1, "type": 0},
                {"allow": "2048", "deny": "0", "id": 80351110224678912u64, "type": 1}
            ])
        );

        assert_eq!(payload["system_channel_id"], welcome["id"]);
        assert_eq!(payload["afk_channel_id"], channels[2]["id"]);
        assert_eq!(channels[2].get("rtc_region"), Some(&Value::Null));
        assert_eq!(
            channels[3]["default_reaction_emoji"],
            json!({"emoji_id": null, "emoji_name": "\u{1f4da}"})
        );
        assert_eq!(channels[3]["available_tags"][0]["moderated"], true);
    }

    #[test]
    fn test_bundled_template() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates/community.json");
        let guild = GuildTemplate::from_path(path).unwrap().apply().unwrap();

        assert_eq!(guild.channels().len(), 8);
        assert_eq!(guild.roles().len(), 2);
        assert_eq!(guild.system_channel().unwrap().name(), "welcome");
        assert_eq!(guild.afk_channel().unwrap().name(), "AFK");
    }

    #[test]
    fn test_missing_template_file() {
        assert!(matches!(
            GuildTemplate::from_path("does/not/exist.json"),
            Err(Error::IoError(_))
        ));
    }

    #[test]
    fn test_unknown_category_key() {
        let template: GuildTemplate = serde_json::from_value(json!({
            "name": "Broken",
            "channels": [{"type": 0, "name": "general", "category": "missing"}]
        }))
        .unwrap();

        assert!(matches!(
            template.apply(),
            Err(Error::UnknownTemplateKey(key)) if key == "missing"
        ));
    }

    #[test]
    fn test_unknown_role_key() {
        let template: GuildTemplate = serde_json::from_value(json!({
            "name": "Broken",
            "channels": [{"type": 0, "name": "general", "overwrites": [{"role": "ghost"}]}]
        }))
        .unwrap();

        assert!(matches!(
            template.apply(),
            Err(Error::UnknownTemplateKey(key)) if key == "ghost"
        ));
    }

    #[test]
    fn test_duplicate_role_key() {
        let template: GuildTemplate = serde_json::from_value(json!({
            "name": "Broken",
            "roles": [{"key": "mods", "name": "Mods"}, {"key": "mods", "name": "Helpers"}],
            "channels": [{"type": 0, "name": "general", "overwrites": [{"role": "mods", "allow": "1024"}]}]
        }))
        .unwrap();

        assert!(matches!(
            template.apply(),
            Err(Error::DuplicateTemplateKey(key)) if key == "mods"
        ));
    }

    #[test]
    fn test_duplicate_channel_key() {
        let template: GuildTemplate = serde_json::from_value(json!({
            "name": "Broken",
            "channels": [
                {"key": "a", "type": 4, "name": "First"},
                {"key": "a", "type": 0, "name": "second"},
                {"type": 0, "name": "child", "category": "a"}
            ]
        }))
        .unwrap();

        assert!(matches!(
            template.apply(),
            Err(Error::DuplicateTemplateKey(key)) if key == "a"
        ));
    }

    #[test]
    fn test_role_and_channel_keys_are_separate() {
        let template: GuildTemplate = serde_json::from_value(json!({
            "name": "Shared",
            "roles": [{"key": "staff"}],
            "channels": [
                {"key": "staff", "type": 4, "name": "Staff"},
                {"type": 0, "name": "desk", "category": "staff", "overwrites": [{"role": "staff", "allow": "1024"}]}
            ]
        }))
        .unwrap();

        let guild = template.apply().unwrap();
        let desk = &guild.channels()[1];
        assert_eq!(desk.parent_id(), Some(guild.channels()[0].id()));
    }

    #[test]
    fn test_overwrite_without_target() {
        let template: GuildTemplate = serde_json::from_value(json!({
            "name": "Broken",
            "channels": [{"type": 0, "name": "general", "overwrites": [{"allow": "1024"}]}]
        }))
        .unwrap();

        assert!(matches!(
            template.apply(),
            Err(Error::MissingOverwriteTarget(channel)) if channel == "general"
        ));
    }

    #[test]
    fn test_unsupported_channel_type() {
        let template: GuildTemplate = serde_json::from_value(json!({
            "name": "Broken",
            "channels": [{"type": 1, "name": "dm"}]
        }))
        .unwrap();

        assert!(matches!(
            template.apply(),
            Err(Error::UnsupportedChannelType(ChannelType::DM))
        ));
    }
}
