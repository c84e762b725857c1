use model::guild::{
    DefaultMessageNotifications, ExplicitContentFilterLevel, Guild, SystemChannelFlags,
    VerificationLevel,
};
use model::Snowflake;
use tracing::{debug, info};

use super::{NewChannel, NewRole, PendingChannel, PendingRole};
use crate::payload::GuildPayload;
use crate::transport::GuildTransport;
use crate::{bytes_to_base64_data, Error, Result};

/// Assembles a guild creation request.
///
/// Channels and roles receive placeholder ids from a counter local to the builder. Both
/// tables are kept in insertion order, which is also the order they are sent in.
#[derive(Debug, Clone)]
pub struct CreateGuild {
    name: String,
    icon: Option<String>,
    afk_timeout: Option<u32>,
    afk_channel: Option<Snowflake>,
    system_channel: Option<Snowflake>,
    system_channel_flags: Option<SystemChannelFlags>,
    verification_level: VerificationLevel,
    default_message_notifications: DefaultMessageNotifications,
    explicit_content_filter: ExplicitContentFilterLevel,

    channels: Vec<PendingChannel>,
    roles: Vec<PendingRole>,
    next_id: u64,
}

impl CreateGuild {
    pub fn new(name: impl Into<String>) -> CreateGuild {
        CreateGuild {
            name: name.into(),
            icon: None,
            afk_timeout: None,
            afk_channel: None,
            system_channel: None,
            system_channel_flags: None,
            verification_level: VerificationLevel::default(),
            default_message_notifications: DefaultMessageNotifications::default(),
            explicit_content_filter: ExplicitContentFilterLevel::default(),
            channels: Vec::new(),
            roles: Vec::new(),
            next_id: 1,
        }
    }

    pub fn icon(mut self, data: &[u8]) -> Result<CreateGuild> {
        self.icon = Some(bytes_to_base64_data(data)?);
        Ok(self)
    }

    pub fn afk_timeout(mut self, seconds: u32) -> CreateGuild {
        self.afk_timeout = Some(seconds);
        self
    }

    pub fn verification_level(mut self, level: VerificationLevel) -> CreateGuild {
        self.verification_level = level;
        self
    }

    pub fn default_message_notifications(mut self, level: DefaultMessageNotifications) -> CreateGuild {
        self.default_message_notifications = level;
        self
    }

    pub fn explicit_content_filter(mut self, level: ExplicitContentFilterLevel) -> CreateGuild {
        self.explicit_content_filter = level;
        self
    }

    pub fn system_channel_flags(mut self, flags: SystemChannelFlags) -> CreateGuild {
        self.system_channel_flags = Some(flags);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channels(&self) -> &[PendingChannel] {
        &self.channels
    }

    pub fn roles(&self) -> &[PendingRole] {
        &self.roles
    }

    // ids are handed out in increasing order, so both tables stay sorted by id
    pub fn channel(&self, id: Snowflake) -> Option<&PendingChannel> {
        self.channels
            .binary_search_by_key(&id, PendingChannel::id)
            .ok()
            .map(|idx| &self.channels[idx])
    }

    pub fn role(&self, id: Snowflake) -> Option<&PendingRole> {
        self.roles
            .binary_search_by_key(&id, PendingRole::id)
            .ok()
            .map(|idx| &self.roles[idx])
    }

    pub fn system_channel(&self) -> Option<&PendingChannel> {
        self.system_channel.and_then(|id| self.channel(id))
    }

    pub fn afk_channel(&self) -> Option<&PendingChannel> {
        self.afk_channel.and_then(|id| self.channel(id))
    }

    pub fn set_system_channel(&mut self, channel: Option<Snowflake>) -> Result<()> {
        self.system_channel = self.existing_channel(channel)?;
        Ok(())
    }

    pub fn set_afk_channel(&mut self, channel: Option<Snowflake>) -> Result<()> {
        self.afk_channel = self.existing_channel(channel)?;
        Ok(())
    }

    fn existing_channel(&self, channel: Option<Snowflake>) -> Result<Option<Snowflake>> {
        match channel {
            Some(id) if self.channel(id).is_none() => Error::UnknownChannel(id).into(),
            other => Ok(other),
        }
    }

    fn peek_id(&self) -> Snowflake {
        Snowflake(self.next_id)
    }

    /// Adds a channel and returns its placeholder id. Nothing is stored if validation fails.
    pub fn add_channel(&mut self, channel: NewChannel) -> Result<Snowflake> {
        if let Some(parent_id) = channel.kind().category() {
            match self.channel(parent_id) {
                None => return Error::UnknownCategory(parent_id).into(),
                Some(parent) if !parent.is_category() => {
                    return Error::NotACategory(parent_id).into()
                }
                Some(_) => {}
            }
        }

        let pending = channel.into_pending(self.peek_id())?;
        let id = pending.id();
        self.next_id += 1;

        if pending.is_system_channel() {
            self.system_channel = Some(id);
        }

        if pending.is_afk_channel() {
            self.afk_channel = Some(id);
        }

        debug!(
            %id,
            name = pending.name(),
            channel_type = ?pending.channel_type(),
            "Added channel"
        );
        self.channels.push(pending);

        Ok(id)
    }

    /// Adds a role and returns its placeholder id, usable as an overwrite target.
    pub fn add_role(&mut self, role: NewRole) -> Result<Snowflake> {
        let pending = role.into_pending(self.peek_id())?;
        let id = pending.id();
        self.next_id += 1;

        debug!(%id, name = pending.name(), "Added role");
        self.roles.push(pending);

        Ok(id)
    }

    pub fn build(&self) -> GuildPayload {
        GuildPayload {
            name: self.name.clone(),
            verification_level: self.verification_level,
            default_message_notifications: self.default_message_notifications,
            explicit_content_filter: self.explicit_content_filter,
            icon: self.icon.clone(),
            afk_timeout: self.afk_timeout,
            system_channel_flags: self.system_channel_flags,
            afk_channel_id: self.afk_channel,
            system_channel_id: self.system_channel,
            channels: self.channels.iter().map(PendingChannel::to_payload).collect(),
            roles: self.roles.iter().map(PendingRole::to_payload).collect(),
        }
    }

    /// Builds the payload and sends it through the transport. Errors from the transport are
    /// returned as-is.
    pub async fn submit<T>(self, transport: &T) -> Result<Guild>
    where
        T: GuildTransport + ?Sized,
    {
        let payload = self.build();

        info!(
            name = %payload.name,
            channels = payload.channels.len(),
            roles = payload.roles.len(),
            "Submitting guild"
        );

        let guild = transport.create_guild(&payload).await?;
        info!(guild_id = %guild.id, name = %guild.name, "Guild created");

        Ok(guild)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{OverwritePermissions, OverwriteTarget};
    use async_trait::async_trait;
    use model::channel::{ChannelType, Permission};
    use model::guild::SystemChannelFlag;
    use model::PermissionBitSet;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct RecordingTransport {
        payloads: Mutex<Vec<Value>>,
    }

    impl RecordingTransport {
        fn new() -> RecordingTransport {
            RecordingTransport {
                payloads: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GuildTransport for RecordingTransport {
        async fn create_guild(&self, payload: &GuildPayload) -> Result<Guild> {
            self.payloads
                .lock()
                .unwrap()
                .push(serde_json::to_value(payload)?);

            let guild = serde_json::from_value(json!({
                "id": "197038439483310086",
                "name": payload.name,
                "icon": null,
                "owner_id": "80351110224678912",
                "afk_timeout": payload.afk_timeout.unwrap_or(300),
                "verification_level": payload.verification_level,
                "default_message_notifications": payload.default_message_notifications,
                "explicit_content_filter": payload.explicit_content_filter,
            }))?;

            Ok(guild)
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl GuildTransport for FailingTransport {
        async fn create_guild(&self, _: &GuildPayload) -> Result<Guild> {
            Error::ResponseError(reqwest::StatusCode::BAD_REQUEST, "Invalid Form Body".to_owned())
                .into()
        }
    }

    #[test]
    fn test_empty_guild() {
        let payload = serde_json::to_value(CreateGuild::new("Empty").build()).unwrap();

        assert_eq!(
            payload,
            json!({
                "name": "Empty",
                "verification_level": 0,
                "default_message_notifications": 0,
                "explicit_content_filter": 0
            })
        );
    }

    #[test]
    fn test_guild_settings() {
        let guild = CreateGuild::new("Settings")
            .icon(b"\x89PNG\r\n\x1a\n")
            .unwrap()
            .afk_timeout(900)
            .verification_level(VerificationLevel::High)
            .default_message_notifications(DefaultMessageNotifications::OnlyMentions)
            .explicit_content_filter(ExplicitContentFilterLevel::AllMembers)
            .system_channel_flags(SystemChannelFlags::from_flags(&[
                SystemChannelFlag::SuppressJoinNotifications,
            ]));

        let payload = serde_json::to_value(guild.build()).unwrap();
        assert_eq!(payload["icon"], "data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(payload["afk_timeout"], 900);
        assert_eq!(payload["verification_level"], 3);
        assert_eq!(payload["default_message_notifications"], 1);
        assert_eq!(payload["explicit_content_filter"], 2);
        assert_eq!(payload["system_channel_flags"], 1);
    }

    #[test]
    fn test_bad_icon() {
        assert!(matches!(
            CreateGuild::new("x").icon(b"nope"),
            Err(Error::UnsupportedImageType)
        ));
    }

    #[test]
    fn test_role_defaults_in_payload() {
        let mut guild = CreateGuild::new("Roles");
        guild.add_role(NewRole::new("Admins").hoist(true)).unwrap();

        let payload = serde_json::to_value(guild.build()).unwrap();
        assert_eq!(
            payload["roles"],
            json!([{"id": 1, "name": "Admins", "hoist": true, "permissions": "0", "color": 0}])
        );
        assert!(payload.get("channels").is_none());
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let mut guild = CreateGuild::new("Ids");
        let role = guild.add_role(NewRole::default()).unwrap();
        let category = guild.add_channel(NewChannel::category("Info")).unwrap();
        let text = guild.add_channel(NewChannel::text("rules")).unwrap();

        assert!(role < category && category < text);
        assert_eq!(guild.channel(text).unwrap().name(), "rules");
        assert_eq!(guild.role(role).unwrap().name(), "new role");
        assert!(guild.channel(role).is_none());

        let names: Vec<&str> = guild.channels().iter().map(PendingChannel::name).collect();
        assert_eq!(names, vec!["Info", "rules"]);
    }

    #[test]
    fn test_system_and_afk_channels() {
        let mut guild = CreateGuild::new("Flags");
        let text = guild
            .add_channel(NewChannel::text("welcome").system_channel(true))
            .unwrap();
        let voice = guild
            .add_channel(NewChannel::voice("AFK").afk_channel(true))
            .unwrap();

        assert_eq!(guild.system_channel().unwrap().id(), text);
        assert_eq!(guild.afk_channel().unwrap().id(), voice);

        let payload = serde_json::to_value(guild.build()).unwrap();
        assert_eq!(payload["system_channel_id"], json!(text.0));
        assert_eq!(payload["afk_channel_id"], json!(voice.0));
    }

    #[test]
    fn test_set_system_channel_requires_existing_channel() {
        let mut guild = CreateGuild::new("Flags");
        let text = guild.add_channel(NewChannel::text("general")).unwrap();

        assert!(matches!(
            guild.set_system_channel(Some(Snowflake(99))),
            Err(Error::UnknownChannel(Snowflake(99)))
        ));
        assert!(guild.system_channel().is_none());

        guild.set_system_channel(Some(text)).unwrap();
        assert_eq!(guild.system_channel().unwrap().id(), text);

        guild.set_afk_channel(None).unwrap();
        assert!(guild.afk_channel().is_none());
    }

    #[test]
    fn test_unknown_category() {
        let mut guild = CreateGuild::new("Categories");
        guild.add_channel(NewChannel::text("general")).unwrap();

        let res = guild.add_channel(NewChannel::text("orphan").parent(Snowflake(42)));
        assert!(matches!(res, Err(Error::UnknownCategory(Snowflake(42)))));
        assert_eq!(guild.channels().len(), 1);
    }

    #[test]
    fn test_parent_must_be_category() {
        let mut guild = CreateGuild::new("Categories");
        let text = guild.add_channel(NewChannel::text("general")).unwrap();

        let res = guild.add_channel(NewChannel::voice("voice").parent(text));
        assert!(matches!(res, Err(Error::NotACategory(id)) if id == text));
        assert_eq!(guild.channels().len(), 1);
    }

    #[test]
    fn test_failed_add_leaves_tables_untouched() {
        let mut guild = CreateGuild::new("Failures");

        assert!(NewChannel::of_type(ChannelType::GroupDM, "group").is_err());
        assert!(guild
            .add_channel(NewChannel::forum("help").default_reaction_emoji(""))
            .is_err());
        assert!(guild
            .add_role(NewRole::new("x").display_icon(b"bad".to_vec()))
            .is_err());

        assert!(guild.channels().is_empty());
        assert!(guild.roles().is_empty());

        // failed adds do not burn ids
        assert_eq!(guild.add_role(NewRole::default()).unwrap(), Snowflake(1));
    }

    #[test]
    fn test_full_payload() {
        let mut guild = CreateGuild::new("Community");
        let mods = guild
            .add_role(
                NewRole::new("Moderators")
                    .permissions(PermissionBitSet::from_permissions(&[
                        Permission::KickMembers,
                        Permission::BanMembers,
                    ]))
                    .colour(0x3498dbu32)
                    .mentionable(true),
            )
            .unwrap();
        let category = guild.add_channel(NewChannel::category("Staff")).unwrap();
        guild
            .add_channel(
                NewChannel::text("mod-chat")
                    .parent(category)
                    .overwrite(
                        OverwriteTarget::Role(mods),
                        OverwritePermissions::new().allow(&[Permission::ViewChannel]),
                    )
                    .system_channel(true),
            )
            .unwrap();

        let payload = serde_json::to_value(guild.build()).unwrap();
        assert_eq!(
            payload,
            json!({
                "name": "Community",
                "verification_level": 0,
                "default_message_notifications": 0,
                "explicit_content_filter": 0,
                "system_channel_id": 3,
                "channels": [
                    {"id": 2, "type": 4, "name": "Staff"},
                    {
                        "id": 3,
                        "type": 0,
                        "name": "mod-chat",
                        "parent_id": 2,
                        "permission_overwrites": [
                            {"allow": "1024", "deny": "0", "id": 1, "type": 0}
                        ]
                    }
                ],
                "roles": [{
                    "id": 1,
                    "name": "Moderators",
                    "hoist": false,
                    "permissions": "6",
                    "color": 3447003,
                    "mentionable": true
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_submit_calls_transport_once() {
        let transport = RecordingTransport::new();

        let mut guild = CreateGuild::new("Submitted").afk_timeout(60);
        guild.add_channel(NewChannel::text("general")).unwrap();
        let expected = serde_json::to_value(guild.build()).unwrap();

        let created = guild.submit(&transport).await.unwrap();
        assert_eq!(created.id, Snowflake(197038439483310086));
        assert_eq!(&*created.name, "Submitted");
        assert_eq!(created.afk_timeout, 60);

        let payloads = transport.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0], expected);
    }

    #[tokio::test]
    async fn test_submit_propagates_transport_error() {
        let res = CreateGuild::new("Broken").submit(&FailingTransport).await;
        assert!(matches!(
            res,
            Err(Error::ResponseError(status, _)) if status == reqwest::StatusCode::BAD_REQUEST
        ));
    }
}
