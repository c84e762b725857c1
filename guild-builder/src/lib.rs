mod config;
pub use config::Config;

mod error;
pub use error::{Error, Result};

pub mod builder;
pub use builder::CreateGuild;

pub mod payload;
pub mod template;
pub mod transport;

mod image;
pub use image::bytes_to_base64_data;
