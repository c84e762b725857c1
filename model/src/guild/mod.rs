mod guild;
pub use guild::*;

mod role;
pub use role::{Role, RoleTags};

mod emoji;
pub use emoji::{Emoji, ParseEmojiError, PartialEmoji};

mod system_channel_flags;
pub use system_channel_flags::{SystemChannelFlag, SystemChannelFlags};
