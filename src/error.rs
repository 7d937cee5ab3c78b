#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No post URLs found in sitemap")]
    EmptySitemapError,

    #[error("Failed to fetch data: {0}")]
    FetchError(String),

    #[error("Composed message is {length} characters, limit is {max_len}")]
    MessageOverflowError { length: usize, max_len: usize },

    #[error("Call-to-action label {0:?} not found in message")]
    LabelNotFoundError(String),

    #[error("Failed to publish post: {0}")]
    PublishError(String),
}

impl AppError {
    /// Whether a driver may fall back to a degraded value instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::FetchError(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
