use serde::Deserialize;

use crate::{Error, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub discord_token: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub json_log: bool,
}

impl Config {
    pub fn from_envvar() -> Result<Config> {
        envy::from_env().map_err(Error::ConfigError)
    }

    pub fn token(&self) -> Result<&str> {
        self.discord_token.as_deref().ok_or(Error::MissingToken)
    }
}

fn default_api_base() -> String {
    "https://discord.com/api/v10".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config: Config = envy::from_iter(vars(&[("DISCORD_TOKEN", "abc")])).unwrap();

        assert_eq!(config.token().unwrap(), "abc");
        assert_eq!(config.api_base, "https://discord.com/api/v10");
        assert!(!config.json_log);
    }

    #[test]
    fn test_missing_token() {
        let config: Config = envy::from_iter(vars(&[
            ("API_BASE", "http://localhost:8080/api"),
            ("JSON_LOG", "true"),
        ]))
        .unwrap();

        assert!(config.json_log);
        assert!(matches!(config.token(), Err(Error::MissingToken)));
    }
}
