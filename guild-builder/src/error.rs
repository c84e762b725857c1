use model::channel::ChannelType;
use model::guild::ParseEmojiError;
use model::Snowflake;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid channel type {0:?}, expected one of text, voice, stage voice, category or forum")]
    UnsupportedChannelType(ChannelType),

    #[error("No such category with ID {0}")]
    UnknownCategory(Snowflake),

    #[error("Channel {0} is not a category")]
    NotACategory(Snowflake),

    #[error("No such channel with ID {0}")]
    UnknownChannel(Snowflake),

    #[error("Unsupported image type given")]
    UnsupportedImageType,

    #[error("{0}")]
    InvalidEmoji(#[from] ParseEmojiError),

    #[error("Template references unknown key {0:?}")]
    UnknownTemplateKey(String),

    #[error("Template declares key {0:?} more than once")]
    DuplicateTemplateKey(String),

    #[error("Overwrite on channel {0:?} targets neither a role nor a member")]
    MissingOverwriteTarget(String),

    #[error("DISCORD_TOKEN must be set to submit a guild")]
    MissingToken,

    #[error("Error while performing HTTP operation: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Error while operating on JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Server returned response {0}: {1}")]
    ResponseError(reqwest::StatusCode, String),

    #[error("Error while loading config: {0}")]
    ConfigError(#[from] envy::Error),

    #[error("Error while reading file: {0}")]
    IoError(#[from] std::io::Error),
}

impl<T> From<Error> for Result<T> {
    fn from(e: Error) -> Self {
        Err(e)
    }
}
