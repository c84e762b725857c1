use model::channel::{
    ChannelType, DefaultReaction, ForumLayout, ForumSortOrder, ForumTag, PermissionOverwrite,
    ThreadArchiveDuration, VideoQualityMode,
};
use model::guild::{Emoji, PartialEmoji};
use model::Snowflake;
use tracing::debug;

use super::{OverwritePermissions, OverwriteTarget, Overwrites};
use crate::payload::{ChannelOptionsPayload, ChannelPayload};
use crate::{Error, Result};

/// Anything that can be turned into a forum default reaction.
#[derive(Debug, Clone)]
pub enum EmojiInput {
    Emoji(Emoji),
    Partial(PartialEmoji),
    /// Chat syntax (`<:name:id>`) or a unicode emoji.
    Text(String),
}

impl EmojiInput {
    pub fn to_default_reaction(&self) -> Result<DefaultReaction> {
        let reaction = match self {
            EmojiInput::Emoji(emoji) => DefaultReaction::from(&emoji.to_partial()),
            EmojiInput::Partial(emoji) => DefaultReaction::from(emoji),
            EmojiInput::Text(raw) => DefaultReaction::from(&raw.parse::<PartialEmoji>()?),
        };

        Ok(reaction)
    }
}

impl From<Emoji> for EmojiInput {
    fn from(emoji: Emoji) -> Self {
        EmojiInput::Emoji(emoji)
    }
}

impl From<PartialEmoji> for EmojiInput {
    fn from(emoji: PartialEmoji) -> Self {
        EmojiInput::Partial(emoji)
    }
}

impl From<&str> for EmojiInput {
    fn from(raw: &str) -> Self {
        EmojiInput::Text(raw.to_owned())
    }
}

impl From<String> for EmojiInput {
    fn from(raw: String) -> Self {
        EmojiInput::Text(raw)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextChannelOptions {
    pub category: Option<Snowflake>,
    /// Creates an announcement channel instead of a plain text channel.
    pub news: bool,
    pub topic: Option<String>,
    pub slowmode_delay: Option<u16>,
    pub nsfw: Option<bool>,
    pub default_auto_archive_duration: Option<ThreadArchiveDuration>,
    pub default_thread_slowmode_delay: Option<u16>,
    pub system_channel: bool,
}

#[derive(Debug, Clone, Default)]
pub struct VoiceChannelOptions {
    pub category: Option<Snowflake>,
    pub bitrate: Option<u32>,
    pub user_limit: Option<u16>,
    pub rtc_region: Option<Option<String>>,
    pub video_quality_mode: Option<VideoQualityMode>,
    pub afk_channel: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StageChannelOptions {
    pub category: Option<Snowflake>,
    pub bitrate: Option<u32>,
    pub user_limit: Option<u16>,
    pub rtc_region: Option<Option<String>>,
    pub video_quality_mode: Option<VideoQualityMode>,
}

#[derive(Debug, Clone, Default)]
pub struct ForumChannelOptions {
    pub topic: Option<String>,
    pub category: Option<Snowflake>,
    pub slowmode_delay: Option<u16>,
    pub nsfw: Option<bool>,
    pub default_auto_archive_duration: Option<ThreadArchiveDuration>,
    pub default_thread_slowmode_delay: Option<u16>,
    pub default_sort_order: Option<ForumSortOrder>,
    pub default_reaction_emoji: Option<EmojiInput>,
    pub default_layout: Option<ForumLayout>,
    pub available_tags: Option<Vec<ForumTag>>,
}

/// The kinds of channel a guild can be created with, each carrying only the options that
/// apply to it.
#[derive(Debug, Clone)]
pub enum ChannelKind {
    Text(TextChannelOptions),
    Voice(VoiceChannelOptions),
    StageVoice(StageChannelOptions),
    Category,
    Forum(ForumChannelOptions),
}

impl ChannelKind {
    pub fn from_type(channel_type: ChannelType) -> Result<ChannelKind> {
        match channel_type {
            ChannelType::GuildText => Ok(ChannelKind::Text(Default::default())),
            ChannelType::GuildVoice => Ok(ChannelKind::Voice(Default::default())),
            ChannelType::GuildStageVoice => Ok(ChannelKind::StageVoice(Default::default())),
            ChannelType::GuildCategory => Ok(ChannelKind::Category),
            ChannelType::GuildForum => Ok(ChannelKind::Forum(Default::default())),
            other => Error::UnsupportedChannelType(other).into(),
        }
    }

    pub fn channel_type(&self) -> ChannelType {
        match self {
            ChannelKind::Text(opts) if opts.news => ChannelType::GuildNews,
            ChannelKind::Text(_) => ChannelType::GuildText,
            ChannelKind::Voice(_) => ChannelType::GuildVoice,
            ChannelKind::StageVoice(_) => ChannelType::GuildStageVoice,
            ChannelKind::Category => ChannelType::GuildCategory,
            ChannelKind::Forum(_) => ChannelType::GuildForum,
        }
    }

    pub fn category(&self) -> Option<Snowflake> {
        match self {
            ChannelKind::Text(opts) => opts.category,
            ChannelKind::Voice(opts) => opts.category,
            ChannelKind::StageVoice(opts) => opts.category,
            ChannelKind::Forum(opts) => opts.category,
            ChannelKind::Category => None,
        }
    }

    /// Stores the option if this kind supports it, otherwise hands it back.
    pub fn apply(&mut self, option: ChannelOption) -> std::result::Result<(), ChannelOption> {
        use ChannelOption as O;

        match (self, option) {
            (ChannelKind::Text(opts), O::Category(v)) => opts.category = Some(v),
            (ChannelKind::Text(opts), O::News(v)) => opts.news = v,
            (ChannelKind::Text(opts), O::Topic(v)) => opts.topic = Some(v),
            (ChannelKind::Text(opts), O::SlowmodeDelay(v)) => opts.slowmode_delay = Some(v),
            (ChannelKind::Text(opts), O::Nsfw(v)) => opts.nsfw = Some(v),
            (ChannelKind::Text(opts), O::DefaultAutoArchiveDuration(v)) => {
                opts.default_auto_archive_duration = Some(v)
            }
            (ChannelKind::Text(opts), O::DefaultThreadSlowmodeDelay(v)) => {
                opts.default_thread_slowmode_delay = Some(v)
            }
            (ChannelKind::Text(opts), O::SystemChannel(v)) => opts.system_channel = v,

            (ChannelKind::Voice(opts), O::Category(v)) => opts.category = Some(v),
            (ChannelKind::Voice(opts), O::Bitrate(v)) => opts.bitrate = Some(v),
            (ChannelKind::Voice(opts), O::UserLimit(v)) => opts.user_limit = Some(v),
            (ChannelKind::Voice(opts), O::RtcRegion(v)) => opts.rtc_region = Some(v),
            (ChannelKind::Voice(opts), O::VideoQualityMode(v)) => {
                opts.video_quality_mode = Some(v)
            }
            (ChannelKind::Voice(opts), O::AfkChannel(v)) => opts.afk_channel = v,

            (ChannelKind::StageVoice(opts), O::Category(v)) => opts.category = Some(v),
            (ChannelKind::StageVoice(opts), O::Bitrate(v)) => opts.bitrate = Some(v),
            (ChannelKind::StageVoice(opts), O::UserLimit(v)) => opts.user_limit = Some(v),
            (ChannelKind::StageVoice(opts), O::RtcRegion(v)) => opts.rtc_region = Some(v),
            (ChannelKind::StageVoice(opts), O::VideoQualityMode(v)) => {
                opts.video_quality_mode = Some(v)
            }

            (ChannelKind::Forum(opts), O::Topic(v)) => opts.topic = Some(v),
            (ChannelKind::Forum(opts), O::Category(v)) => opts.category = Some(v),
            (ChannelKind::Forum(opts), O::SlowmodeDelay(v)) => opts.slowmode_delay = Some(v),
            (ChannelKind::Forum(opts), O::Nsfw(v)) => opts.nsfw = Some(v),
            (ChannelKind::Forum(opts), O::DefaultAutoArchiveDuration(v)) => {
                opts.default_auto_archive_duration = Some(v)
            }
            (ChannelKind::Forum(opts), O::DefaultThreadSlowmodeDelay(v)) => {
                opts.default_thread_slowmode_delay = Some(v)
            }
            (ChannelKind::Forum(opts), O::DefaultSortOrder(v)) => {
                opts.default_sort_order = Some(v)
            }
            (ChannelKind::Forum(opts), O::DefaultReactionEmoji(v)) => {
                opts.default_reaction_emoji = Some(v)
            }
            (ChannelKind::Forum(opts), O::DefaultLayout(v)) => opts.default_layout = Some(v),
            (ChannelKind::Forum(opts), O::AvailableTags(v)) => opts.available_tags = Some(v),

            (_, option) => return Err(option),
        }

        Ok(())
    }

    fn to_options_payload(&self, parent_id: Option<Snowflake>) -> Result<ChannelOptionsPayload> {
        let mut payload = ChannelOptionsPayload {
            parent_id,
            ..Default::default()
        };

        match self {
            ChannelKind::Text(opts) => {
                payload.topic = opts.topic.clone();
                payload.rate_limit_per_user = opts.slowmode_delay;
                payload.nsfw = opts.nsfw;
                payload.default_auto_archive_duration = opts.default_auto_archive_duration;
                payload.default_thread_rate_limit_per_user = opts.default_thread_slowmode_delay;
            }
            ChannelKind::Voice(VoiceChannelOptions {
                bitrate,
                user_limit,
                rtc_region,
                video_quality_mode,
                ..
            })
            | ChannelKind::StageVoice(StageChannelOptions {
                bitrate,
                user_limit,
                rtc_region,
                video_quality_mode,
                ..
            }) => {
                payload.bitrate = *bitrate;
                payload.user_limit = *user_limit;
                payload.rtc_region = rtc_region.clone();
                payload.video_quality_mode = *video_quality_mode;
            }
            ChannelKind::Category => {}
            ChannelKind::Forum(opts) => {
                payload.topic = opts.topic.clone();
                payload.rate_limit_per_user = opts.slowmode_delay;
                payload.nsfw = opts.nsfw;
                payload.default_auto_archive_duration = opts.default_auto_archive_duration;
                payload.default_thread_rate_limit_per_user = opts.default_thread_slowmode_delay;
                payload.default_sort_order = opts.default_sort_order;
                payload.default_reaction_emoji = opts
                    .default_reaction_emoji
                    .as_ref()
                    .map(EmojiInput::to_default_reaction)
                    .transpose()?;
                payload.default_forum_layout = opts.default_layout;
                payload.available_tags = opts.available_tags.clone();
            }
        }

        Ok(payload)
    }
}

/// A single kind-specific channel option, for callers that pick options at runtime.
#[derive(Debug, Clone)]
pub enum ChannelOption {
    Category(Snowflake),
    News(bool),
    Topic(String),
    SlowmodeDelay(u16),
    Nsfw(bool),
    DefaultAutoArchiveDuration(ThreadArchiveDuration),
    DefaultThreadSlowmodeDelay(u16),
    SystemChannel(bool),
    Bitrate(u32),
    UserLimit(u16),
    RtcRegion(Option<String>),
    VideoQualityMode(VideoQualityMode),
    AfkChannel(bool),
    DefaultSortOrder(ForumSortOrder),
    DefaultReactionEmoji(EmojiInput),
    DefaultLayout(ForumLayout),
    AvailableTags(Vec<ForumTag>),
}

impl ChannelOption {
    pub fn name(&self) -> &'static str {
        match self {
            ChannelOption::Category(_) => "category",
            ChannelOption::News(_) => "news",
            ChannelOption::Topic(_) => "topic",
            ChannelOption::SlowmodeDelay(_) => "slowmode_delay",
            ChannelOption::Nsfw(_) => "nsfw",
            ChannelOption::DefaultAutoArchiveDuration(_) => "default_auto_archive_duration",
            ChannelOption::DefaultThreadSlowmodeDelay(_) => "default_thread_slowmode_delay",
            ChannelOption::SystemChannel(_) => "system_channel",
            ChannelOption::Bitrate(_) => "bitrate",
            ChannelOption::UserLimit(_) => "user_limit",
            ChannelOption::RtcRegion(_) => "rtc_region",
            ChannelOption::VideoQualityMode(_) => "video_quality_mode",
            ChannelOption::AfkChannel(_) => "afk_channel",
            ChannelOption::DefaultSortOrder(_) => "default_sort_order",
            ChannelOption::DefaultReactionEmoji(_) => "default_reaction_emoji",
            ChannelOption::DefaultLayout(_) => "default_layout",
            ChannelOption::AvailableTags(_) => "available_tags",
        }
    }
}

/// Channel definition passed to `CreateGuild::add_channel`.
///
/// Options that do not apply to the channel's kind are dropped rather than rejected, so a
/// topic set on a voice channel simply never reaches the payload.
#[derive(Debug, Clone)]
pub struct NewChannel {
    name: String,
    position: Option<u16>,
    overwrites: Overwrites,
    kind: ChannelKind,
}

impl NewChannel {
    pub fn new(name: impl Into<String>, kind: ChannelKind) -> NewChannel {
        NewChannel {
            name: name.into(),
            position: None,
            overwrites: Overwrites::new(),
            kind,
        }
    }

    pub fn of_type(channel_type: ChannelType, name: impl Into<String>) -> Result<NewChannel> {
        Ok(NewChannel::new(name, ChannelKind::from_type(channel_type)?))
    }

    pub fn text(name: impl Into<String>) -> NewChannel {
        NewChannel::new(name, ChannelKind::Text(Default::default()))
    }

    pub fn voice(name: impl Into<String>) -> NewChannel {
        NewChannel::new(name, ChannelKind::Voice(Default::default()))
    }

    pub fn stage_voice(name: impl Into<String>) -> NewChannel {
        NewChannel::new(name, ChannelKind::StageVoice(Default::default()))
    }

    pub fn category(name: impl Into<String>) -> NewChannel {
        NewChannel::new(name, ChannelKind::Category)
    }

    pub fn forum(name: impl Into<String>) -> NewChannel {
        NewChannel::new(name, ChannelKind::Forum(Default::default()))
    }

    pub fn kind(&self) -> &ChannelKind {
        &self.kind
    }

    pub fn position(mut self, position: u16) -> NewChannel {
        self.position = Some(position);
        self
    }

    pub fn overwrites(mut self, overwrites: Overwrites) -> NewChannel {
        self.overwrites = overwrites;
        self
    }

    pub fn overwrite(mut self, target: OverwriteTarget, permissions: OverwritePermissions) -> NewChannel {
        self.overwrites.insert(target, permissions);
        self
    }

    pub fn option(mut self, option: ChannelOption) -> NewChannel {
        if let Err(dropped) = self.kind.apply(option) {
            debug!(
                option = dropped.name(),
                channel_type = ?self.kind.channel_type(),
                channel = %self.name,
                "Dropping option not supported by channel type"
            );
        }
        self
    }

    pub fn parent(self, category: Snowflake) -> NewChannel {
        self.option(ChannelOption::Category(category))
    }

    pub fn news(self, news: bool) -> NewChannel {
        self.option(ChannelOption::News(news))
    }

    pub fn topic(self, topic: impl Into<String>) -> NewChannel {
        self.option(ChannelOption::Topic(topic.into()))
    }

    pub fn slowmode_delay(self, seconds: u16) -> NewChannel {
        self.option(ChannelOption::SlowmodeDelay(seconds))
    }

    pub fn nsfw(self, nsfw: bool) -> NewChannel {
        self.option(ChannelOption::Nsfw(nsfw))
    }

    pub fn default_auto_archive_duration(self, duration: ThreadArchiveDuration) -> NewChannel {
        self.option(ChannelOption::DefaultAutoArchiveDuration(duration))
    }

    pub fn default_thread_slowmode_delay(self, seconds: u16) -> NewChannel {
        self.option(ChannelOption::DefaultThreadSlowmodeDelay(seconds))
    }

    pub fn system_channel(self, system_channel: bool) -> NewChannel {
        self.option(ChannelOption::SystemChannel(system_channel))
    }

    pub fn bitrate(self, bitrate: u32) -> NewChannel {
        self.option(ChannelOption::Bitrate(bitrate))
    }

    pub fn user_limit(self, user_limit: u16) -> NewChannel {
        self.option(ChannelOption::UserLimit(user_limit))
    }

    /// `None` asks the platform to pick a region automatically.
    pub fn rtc_region(self, region: Option<String>) -> NewChannel {
        self.option(ChannelOption::RtcRegion(region))
    }

    pub fn video_quality_mode(self, mode: VideoQualityMode) -> NewChannel {
        self.option(ChannelOption::VideoQualityMode(mode))
    }

    pub fn afk_channel(self, afk_channel: bool) -> NewChannel {
        self.option(ChannelOption::AfkChannel(afk_channel))
    }

    pub fn default_sort_order(self, order: ForumSortOrder) -> NewChannel {
        self.option(ChannelOption::DefaultSortOrder(order))
    }

    pub fn default_reaction_emoji(self, emoji: impl Into<EmojiInput>) -> NewChannel {
        self.option(ChannelOption::DefaultReactionEmoji(emoji.into()))
    }

    pub fn default_layout(self, layout: ForumLayout) -> NewChannel {
        self.option(ChannelOption::DefaultLayout(layout))
    }

    pub fn available_tags(self, tags: Vec<ForumTag>) -> NewChannel {
        self.option(ChannelOption::AvailableTags(tags))
    }

    /// Resolves every option into its wire form. The category must already have been
    /// validated by the caller.
    pub(crate) fn into_pending(self, id: Snowflake) -> Result<PendingChannel> {
        let options = self.kind.to_options_payload(self.kind.category())?;

        Ok(PendingChannel {
            id,
            channel_type: self.kind.channel_type(),
            name: self.name,
            position: self.position,
            permission_overwrites: self.overwrites.to_payload(),
            options,
            system_channel: matches!(&self.kind, ChannelKind::Text(opts) if opts.system_channel),
            afk_channel: matches!(&self.kind, ChannelKind::Voice(opts) if opts.afk_channel),
        })
    }
}

/// A channel stored on the builder, keyed by its placeholder id.
#[derive(Debug, Clone)]
pub struct PendingChannel {
    id: Snowflake,
    channel_type: ChannelType,
    name: String,
    position: Option<u16>,
    permission_overwrites: Vec<PermissionOverwrite>,
    options: ChannelOptionsPayload,
    system_channel: bool,
    afk_channel: bool,
}

impl PendingChannel {
    pub fn id(&self) -> Snowflake {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channel_type(&self) -> ChannelType {
        self.channel_type
    }

    pub fn is_category(&self) -> bool {
        self.channel_type == ChannelType::GuildCategory
    }

    pub fn parent_id(&self) -> Option<Snowflake> {
        self.options.parent_id
    }

    pub fn permission_overwrites(&self) -> &[PermissionOverwrite] {
        &self.permission_overwrites
    }

    pub(crate) fn is_system_channel(&self) -> bool {
        self.system_channel
    }

    pub(crate) fn is_afk_channel(&self) -> bool {
        self.afk_channel
    }

    pub fn to_payload(&self) -> ChannelPayload {
        ChannelPayload {
            id: self.id,
            channel_type: self.channel_type,
            name: self.name.clone(),
            options: self.options.clone(),
            position: self.position,
            permission_overwrites: self.permission_overwrites.clone(),
        }
    }
}
