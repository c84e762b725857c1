use serde_repr::{Deserialize_repr, Serialize_repr};

/// Minutes of inactivity after which a thread is archived.
#[derive(Serialize_repr, Deserialize_repr, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u16)]
pub enum ThreadArchiveDuration {
    Hour = 60,
    Day = 1440,
    ThreeDays = 4320,
    Week = 10080,
}
