mod snowflake;
pub use snowflake::Snowflake;

mod image_hash;
pub use image_hash::ImageHash;

mod permission_bit_set;
pub use permission_bit_set::PermissionBitSet;

mod colour;
pub use colour::Colour;

pub mod channel;
pub mod guild;

mod util;
