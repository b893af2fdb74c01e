use std::fmt;

use thiserror::Error;

/// Message returned to callers when an upstream answered with something we
/// could not use.
pub const UNEXPECTED_FORMAT: &str = "Unexpected response format";
pub const TOKEN_FAILURE: &str = "Failed to retrieve Spotify access token";
pub const ALBUM_SEARCH_FAILURE: &str = "Failed to fetch albums by genre";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Weather,
    Spotify,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Weather => write!(f, "weather"),
            Provider::Spotify => write!(f, "Spotify"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{provider} API request failed: {message}")]
    Upstream { provider: Provider, message: String },

    #[error("Unexpected {provider} response format: {detail}")]
    UnexpectedFormat { provider: Provider, detail: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn upstream(provider: Provider, message: impl Into<String>) -> Self {
        AppError::Upstream {
            provider,
            message: message.into(),
        }
    }

    pub fn unexpected_format(provider: Provider, detail: impl Into<String>) -> Self {
        AppError::UnexpectedFormat {
            provider,
            detail: detail.into(),
        }
    }

    /// The message that is safe to hand back to an HTTP caller.
    ///
    /// Upstream details stay in the logs; callers only ever see one of a few
    /// fixed strings.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::Auth(_) => TOKEN_FAILURE,
            AppError::Upstream {
                provider: Provider::Spotify,
                ..
            } => ALBUM_SEARCH_FAILURE,
            _ => UNEXPECTED_FORMAT,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_message_hides_upstream_detail() {
        let err = AppError::unexpected_format(Provider::Weather, "missing main.temp in {\"main\":{}}");
        assert_eq!(err.public_message(), UNEXPECTED_FORMAT);
        assert!(err.to_string().contains("main.temp"));

        let err = AppError::upstream(Provider::Weather, "status 404 Not Found");
        assert_eq!(err.public_message(), UNEXPECTED_FORMAT);
    }

    #[test]
    fn test_public_message_per_failure_kind() {
        assert_eq!(
            AppError::Auth("invalid_client".into()).public_message(),
            TOKEN_FAILURE
        );
        assert_eq!(
            AppError::upstream(Provider::Spotify, "status 502").public_message(),
            ALBUM_SEARCH_FAILURE
        );
        assert_eq!(
            AppError::unexpected_format(Provider::Spotify, "no albums").public_message(),
            UNEXPECTED_FORMAT
        );
    }
}
