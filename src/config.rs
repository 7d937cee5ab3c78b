use std::env;
use crate::error::{AppError, Result};

pub const DEFAULT_SITEMAP_URL: &str = "https://www.gojiberries.io/sitemap-posts.xml";
pub const DEFAULT_SERVICE_URL: &str = "https://bsky.social";
pub const DEFAULT_MAX_LEN: usize = 300;
pub const DEFAULT_LABEL: &str = "Read more →";

#[derive(Clone)]
pub struct Credentials {
    pub handle: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("handle", &self.handle)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Limits applied when composing the post text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageConfig {
    /// Character budget for the whole post.
    pub max_len: usize,
    /// Trailing call-to-action that carries the link facet.
    pub label: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        MessageConfig {
            max_len: DEFAULT_MAX_LEN,
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub sitemap_url: String,
    pub service_url: String,
    pub credentials: Credentials,
    pub message: MessageConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Credentials are checked first so a misconfigured run fails before
    /// anything touches the network.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::ConfigError(format!("Missing {} environment variable", key)))
        };

        let handle = required("BSKY_HANDLE")?;
        let password = required("BSKY_PASSWORD")?;

        let sitemap_url = lookup("SITEMAP_URL").unwrap_or_else(|| DEFAULT_SITEMAP_URL.to_string());
        let service_url = lookup("BSKY_SERVICE").unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

        let max_len = match lookup("MAX_POST_LENGTH") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| AppError::ConfigError(format!("Invalid MAX_POST_LENGTH {:?}: {}", raw, e)))?,
            None => DEFAULT_MAX_LEN,
        };

        let label = lookup("CTA_LABEL").unwrap_or_else(|| DEFAULT_LABEL.to_string());
        if label.is_empty() {
            return Err(AppError::ConfigError("CTA_LABEL must not be empty".to_string()));
        }

        Ok(Config {
            sitemap_url,
            service_url,
            credentials: Credentials { handle, password },
            message: MessageConfig { max_len, label },
        })
    }
}
