use serde::{Deserialize, Serialize};
use std::fmt;

/// A 24 bit RGB role colour. Zero means "no colour".
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
#[serde(transparent)]
pub struct Colour(pub u32);

impl Colour {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Colour {
        Colour(u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b))
    }

    pub fn r(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn g(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn b(&self) -> u8 {
        self.0 as u8
    }
}

impl From<u32> for Colour {
    fn from(value: u32) -> Self {
        Colour(value)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}
