use async_trait::async_trait;
use model::guild::Guild;

use crate::payload::GuildPayload;
use crate::Result;

mod rest_client;
pub use rest_client::RestClient;

/// Performs the guild creation call. Implementations own authentication and retries.
#[async_trait]
pub trait GuildTransport {
    async fn create_guild(&self, payload: &GuildPayload) -> Result<Guild>;
}
