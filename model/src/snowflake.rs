use super::util;
use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::convert::TryFrom;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Milliseconds between the unix epoch and the first second of 2015.
pub const DISCORD_EPOCH: u64 = 1_420_070_400_000;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Snowflake(pub u64);

impl Snowflake {
    pub fn serialize_to_int<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }

    pub fn serialize_option_to_int<S: Serializer>(
        op: &Option<Snowflake>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match op {
            Some(s) => s.serialize_to_int(serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Creation time encoded in the upper 42 bits. Only meaningful for ids issued by the platform.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let millis = (self.0 >> 22) + DISCORD_EPOCH;
        DateTime::from_timestamp_millis(i64::try_from(millis).ok()?)
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value: Value = Deserialize::deserialize(deserializer)?;

        if let Some(i) = value.as_u64() {
            return Ok(Snowflake(i));
        }

        if let Some(s) = value.as_str() {
            return Ok(Snowflake(s.parse().map_err(Error::custom)?));
        }

        Err(Error::invalid_type(
            util::to_unexpected(&value),
            &"a string or u64",
        ))
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Snowflake {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Snowflake(s.parse()?))
    }
}

impl From<u64> for Snowflake {
    fn from(x: u64) -> Self {
        Snowflake(x)
    }
}
