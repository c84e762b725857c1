use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ImageHash {
    pub animated: bool,
    data: u128,
}

impl fmt::Display for ImageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.animated {
            write!(f, "a_{:032x}", self.data)
        } else {
            write!(f, "{:032x}", self.data)
        }
    }
}

impl Serialize for ImageHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ImageHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        let (animated, hash) = match raw.strip_prefix("a_") {
            Some(hash) => (true, hash),
            None => (false, raw.as_str()),
        };
        let data = u128::from_str_radix(hash, 16).map_err(Error::custom)?;

        Ok(ImageHash { animated, data })
    }
}
