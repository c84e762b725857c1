use model::channel::{Permission, PermissionOverwrite, PermissionOverwriteType};
use model::{PermissionBitSet, Snowflake};

/// Who a permission overwrite applies to. Roles declared on the builder are targeted by the
/// local id returned from `CreateGuild::add_role`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum OverwriteTarget {
    Role(Snowflake),
    Member(Snowflake),
}

impl OverwriteTarget {
    pub fn id(&self) -> Snowflake {
        match self {
            OverwriteTarget::Role(id) | OverwriteTarget::Member(id) => *id,
        }
    }

    pub fn overwrite_type(&self) -> PermissionOverwriteType {
        match self {
            OverwriteTarget::Role(_) => PermissionOverwriteType::Role,
            OverwriteTarget::Member(_) => PermissionOverwriteType::Member,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct OverwritePermissions {
    pub allow: PermissionBitSet,
    pub deny: PermissionBitSet,
}

impl OverwritePermissions {
    pub fn new() -> OverwritePermissions {
        OverwritePermissions::default()
    }

    pub fn allow(mut self, permissions: &[Permission]) -> OverwritePermissions {
        let bits = Permission::sum(permissions);
        self.allow.0 |= bits;
        self.deny.0 &= !bits;
        self
    }

    pub fn deny(mut self, permissions: &[Permission]) -> OverwritePermissions {
        let bits = Permission::sum(permissions);
        self.deny.0 |= bits;
        self.allow.0 &= !bits;
        self
    }

    pub fn pair(&self) -> (PermissionBitSet, PermissionBitSet) {
        (self.allow, self.deny)
    }
}

/// Permission overwrites of a single channel, kept in insertion order. Inserting a target a
/// second time replaces its permissions in place.
#[derive(Debug, Clone, Default)]
pub struct Overwrites(Vec<(OverwriteTarget, OverwritePermissions)>);

impl Overwrites {
    pub fn new() -> Overwrites {
        Overwrites::default()
    }

    pub fn insert(&mut self, target: OverwriteTarget, permissions: OverwritePermissions) {
        match self.0.iter_mut().find(|(t, _)| *t == target) {
            Some(entry) => entry.1 = permissions,
            None => self.0.push((target, permissions)),
        }
    }

    pub fn with(mut self, target: OverwriteTarget, permissions: OverwritePermissions) -> Overwrites {
        self.insert(target, permissions);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_payload(&self) -> Vec<PermissionOverwrite> {
        self.0
            .iter()
            .map(|(target, permissions)| {
                let (allow, deny) = permissions.pair();
                PermissionOverwrite {
                    allow,
                    deny,
                    id: target.id(),
                    overwrite_type: target.overwrite_type(),
                }
            })
            .collect()
    }
}

impl FromIterator<(OverwriteTarget, OverwritePermissions)> for Overwrites {
    fn from_iter<I: IntoIterator<Item = (OverwriteTarget, OverwritePermissions)>>(iter: I) -> Self {
        let mut overwrites = Overwrites::new();
        for (target, permissions) in iter {
            overwrites.insert(target, permissions);
        }
        overwrites
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_keeps_insertion_order() {
        let overwrites = Overwrites::new()
            .with(
                OverwriteTarget::Member(Snowflake(80351110224678912)),
                OverwritePermissions::new().allow(&[Permission::ManageMessages]),
            )
            .with(
                OverwriteTarget::Role(Snowflake(1)),
                OverwritePermissions::new().deny(&[Permission::ViewChannel]),
            );

        let payload = overwrites.to_payload();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0].id, Snowflake(80351110224678912));
        assert_eq!(payload[0].overwrite_type, PermissionOverwriteType::Member);
        assert_eq!(payload[0].allow, PermissionBitSet(1 << 13));
        assert_eq!(payload[1].overwrite_type, PermissionOverwriteType::Role);
        assert_eq!(payload[1].deny, PermissionBitSet(1 << 10));
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let role = OverwriteTarget::Role(Snowflake(1));
        let member = OverwriteTarget::Member(Snowflake(2));

        let mut overwrites = Overwrites::new()
            .with(role, OverwritePermissions::new())
            .with(member, OverwritePermissions::new());
        overwrites.insert(role, OverwritePermissions::new().allow(&[Permission::Speak]));

        assert_eq!(overwrites.len(), 2);
        assert_eq!(overwrites.to_payload()[0].allow, PermissionBitSet(1 << 21));
    }

    #[test]
    fn test_allow_then_deny_moves_bit() {
        let perms = OverwritePermissions::new()
            .allow(&[Permission::SendMessages, Permission::AddReactions])
            .deny(&[Permission::SendMessages]);

        assert!(perms.allow.has_permission(Permission::AddReactions));
        assert!(!perms.allow.has_permission(Permission::SendMessages));
        assert!(perms.deny.has_permission(Permission::SendMessages));
    }
}
