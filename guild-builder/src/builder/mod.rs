mod guild;
pub use guild::CreateGuild;

mod channel;
pub use channel::{
    ChannelKind, ChannelOption, EmojiInput, ForumChannelOptions, NewChannel, PendingChannel,
    StageChannelOptions, TextChannelOptions, VoiceChannelOptions,
};

mod role;
pub use role::{DisplayIcon, NewRole, PendingRole, DEFAULT_ROLE_NAME};

mod overwrite;
pub use overwrite::{OverwritePermissions, OverwriteTarget, Overwrites};
