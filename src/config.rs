use serde::Deserialize;
use std::fmt;

/// Application configuration loaded from environment variables
#[derive(Deserialize, Clone)]
pub struct Config {
    /// OMDb API key
    pub omdb_api_key: String,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Watchmode API key
    pub watchmode_api_key: String,

    /// Watchmode API base URL, including the version segment
    #[serde(default = "default_watchmode_api_url")]
    pub watchmode_api_url: String,

    /// Bridge host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bridge port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_omdb_api_url() -> String {
    "http://www.omdbapi.com/".to_string()
}

fn default_watchmode_api_url() -> String {
    "https://api.watchmode.com/v1".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

// Keys stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("omdb_api_key", &"<redacted>")
            .field("omdb_api_url", &self.omdb_api_url)
            .field("watchmode_api_key", &"<redacted>")
            .field("watchmode_api_url", &self.watchmode_api_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the bridge listens on
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
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
    fn test_defaults_applied() {
        let config = Config::from_vars(vars(&[
            ("OMDB_API_KEY", "omdb-key"),
            ("WATCHMODE_API_KEY", "wm-key"),
        ]))
        .unwrap();

        assert_eq!(config.omdb_api_url, "http://www.omdbapi.com/");
        assert_eq!(config.watchmode_api_url, "https://api.watchmode.com/v1");
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_missing_key_is_error() {
        let result = Config::from_vars(vars(&[("OMDB_API_KEY", "omdb-key")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = Config::from_vars(vars(&[
            ("OMDB_API_KEY", "omdb-secret"),
            ("WATCHMODE_API_KEY", "wm-secret"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("omdb-secret"));
        assert!(!rendered.contains("wm-secret"));
        assert_eq!(config.port, 8080);
    }
}
