use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::{PermissionBitSet, Snowflake};

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct PermissionOverwrite {
    pub allow: PermissionBitSet,

    pub deny: PermissionBitSet,

    #[serde(serialize_with = "Snowflake::serialize_to_int")]
    pub id: Snowflake,

    #[serde(rename = "type")]
    pub overwrite_type: PermissionOverwriteType,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, Eq, PartialEq)]
#[repr(u8)]
pub enum PermissionOverwriteType {
    Role = 0,
    Member = 1,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_overwrite() {
        let overwrite = PermissionOverwrite {
            allow: PermissionBitSet(1024),
            deny: PermissionBitSet(2048),
            id: Snowflake(2),
            overwrite_type: PermissionOverwriteType::Member,
        };

        assert_eq!(
            serde_json::to_string(&overwrite).unwrap(),
            r#"{"allow":"1024","deny":"2048","id":2,"type":1}"#
        );
    }
}
