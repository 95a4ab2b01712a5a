use thiserror::Error;

pub mod context;

pub type Result<T> = std::result::Result<T, Error>;

// Re-export context helpers
pub use context::{ErrorChain, ErrorContext};

/// Main error type for the RustF utilities
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] hyper::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A helper was called with a value it does not accept (programmer error)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Connection-level failure of an outbound request, timeouts included
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// The remote answered with a status code outside the allowed list
    #[error("Unexpected response from {url}: HTTP {status}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        body: String,
    },

    // Error with context chain
    #[error("{message}")]
    WithContext {
        message: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl(url.into())
    }

    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn unexpected_status(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    // Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            message: context.into(),
            source: Box::new(self),
        }
    }

    /// Check if the error came from the network rather than from the caller
    pub fn is_transport(&self) -> bool {
        match self {
            Error::Transport { .. } | Error::Http(_) => true,
            Error::WithContext { source, .. } => source.is_transport(),
            _ => false,
        }
    }

    /// Get error code for API responses and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Http(_) => "E_HTTP",
            Error::Json(_) => "E_JSON",
            Error::Io(_) => "E_IO",
            Error::ConfigParse(_) | Error::Config(_) => "E_CONFIG",
            Error::InvalidArgument(_) => "E_INVALID_ARGUMENT",
            Error::InvalidUrl(_) => "E_INVALID_URL",
            Error::Transport { .. } => "E_TRANSPORT",
            Error::UnexpectedStatus { .. } => "E_UNEXPECTED_STATUS",
            Error::WithContext { source, .. } => source.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::invalid_argument("not a string").error_code(),
            "E_INVALID_ARGUMENT"
        );
        assert_eq!(
            Error::transport("http://a.test", "refused").error_code(),
            "E_TRANSPORT"
        );
        assert_eq!(
            Error::unexpected_status("http://a.test", 404, "").error_code(),
            "E_UNEXPECTED_STATUS"
        );
    }

    #[test]
    fn test_context_keeps_code_and_transport_flag() {
        let err = Error::transport("http://a.test", "timed out").with_context("fetching feed");
        assert_eq!(err.to_string(), "fetching feed");
        assert_eq!(err.error_code(), "E_TRANSPORT");
        assert!(err.is_transport());

        let err = Error::unexpected_status("http://a.test", 500, "boom");
        assert!(!err.is_transport());
        assert_eq!(
            err.to_string(),
            "Unexpected response from http://a.test: HTTP 500"
        );
    }
}
