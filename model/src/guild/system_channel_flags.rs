use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum SystemChannelFlag {
    SuppressJoinNotifications = 1 << 0,
    SuppressPremiumSubscriptions = 1 << 1,
    SuppressGuildReminderNotifications = 1 << 2,
    SuppressJoinNotificationReplies = 1 << 3,
    SuppressRoleSubscriptionPurchaseNotifications = 1 << 4,
    SuppressRoleSubscriptionPurchaseNotificationReplies = 1 << 5,
}

/// Suppression flags for the guild's system channel, sent as a plain integer.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, Eq, PartialEq)]
#[serde(transparent)]
pub struct SystemChannelFlags(pub u32);

impl SystemChannelFlags {
    pub fn from_flags(flags: &[SystemChannelFlag]) -> SystemChannelFlags {
        SystemChannelFlags(flags.iter().fold(0, |acc, flag| acc | *flag as u32))
    }

    pub fn contains(&self, flag: SystemChannelFlag) -> bool {
        let bit = flag as u32;
        self.0 & bit == bit
    }
}
