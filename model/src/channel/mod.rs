mod channel_type;
pub use channel_type::ChannelType;

mod permission_overwrite;
pub use permission_overwrite::*;

mod video_quality_mode;
pub use video_quality_mode::VideoQualityMode;

mod permission;
pub use permission::Permission;

mod forum;
pub use forum::{DefaultReaction, ForumLayout, ForumSortOrder, ForumTag};

mod thread_archive_duration;
pub use thread_archive_duration::ThreadArchiveDuration;
