use async_trait::async_trait;
use model::guild::Guild;
use std::time::Duration;
use tracing::debug;

use super::GuildTransport;
use crate::payload::GuildPayload;
use crate::{Config, Error, Result};

pub struct RestClient {
    token: String,
    api_base: String,
    http_client: reqwest::Client,
}

impl RestClient {
    pub fn new(token: String, api_base: String) -> Result<RestClient> {
        let http_client = reqwest::Client::builder()
            .use_rustls_tls()
            .connect_timeout(Duration::from_secs(3))
            .build()?;

        Ok(RestClient::new_with_client(token, api_base, http_client))
    }

    pub fn new_with_client(token: String, api_base: String, http_client: reqwest::Client) -> RestClient {
        RestClient {
            token,
            api_base,
            http_client,
        }
    }

    pub fn from_config(config: &Config) -> Result<RestClient> {
        RestClient::new(config.token()?.to_owned(), config.api_base.clone())
    }

    fn guilds_url(&self) -> String {
        format!("{}/guilds", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl GuildTransport for RestClient {
    async fn create_guild(&self, payload: &GuildPayload) -> Result<Guild> {
        let url = self.guilds_url();
        debug!(%url, "Sending guild create request");

        let res = self
            .http_client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.token))
            .json(payload)
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            Ok(res.json().await?)
        } else {
            let bytes = res.bytes().await?;
            let body = String::from_utf8_lossy(bytes.as_ref()).into_owned();
            Error::ResponseError(status, body).into()
        }
    }
}
