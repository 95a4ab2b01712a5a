//! Error context and chaining utilities
//!
//! Lets helpers attach what they were doing to a lower-level error, and lets
//! callers walk back to the root cause when logging.

use super::Error;
use std::fmt;

/// Attach a description of the failed operation to an error
pub trait ErrorContext<T> {
    fn context<C>(self, context: C) -> Result<T, Error>
    where
        C: Into<String>;

    /// Like [`ErrorContext::context`], building the message only on failure
    fn with_context<C, F>(self, f: F) -> Result<T, Error>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

// Covers io, json and toml results as well as our own
impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: Into<Error>,
{
    fn context<C>(self, context: C) -> Result<T, Error>
    where
        C: Into<String>,
    {
        self.map_err(|e| Into::<Error>::into(e).with_context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, Error>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Into::<Error>::into(e).with_context(f()))
    }
}

/// Every message of a context chain, outermost first
///
/// `Display` on a context error shows only the outermost message; log an
/// `ErrorChain` to keep the underlying io or transport failure visible.
pub struct ErrorChain<'a> {
    error: &'a Error,
    messages: Vec<String>,
}

impl<'a> ErrorChain<'a> {
    pub fn new(error: &'a Error) -> Self {
        let mut messages = Vec::new();
        let mut current = error;
        loop {
            messages.push(current.to_string());
            match current {
                Error::WithContext { source, .. } => current = source,
                _ => break,
            }
        }
        Self { error, messages }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The innermost error, below all context layers
    pub fn root_cause(&self) -> &Error {
        let mut current = self.error;
        while let Error::WithContext { source, .. } = current {
            current = source;
        }
        current
    }
}

impl<'a> fmt::Display for ErrorChain<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join(": "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_chain_formatting() {
        let error = Error::transport("http://feed.test", "connection refused")
            .with_context("Failed to fetch feed")
            .with_context("Cannot refresh dashboard");

        let chain = ErrorChain::new(&error);

        assert_eq!(chain.messages().len(), 3);
        assert_eq!(
            chain.to_string(),
            "Cannot refresh dashboard: Failed to fetch feed: \
             Transport error for http://feed.test: connection refused"
        );
        assert!(matches!(chain.root_cause(), Error::Transport { .. }));
    }

    #[test]
    fn test_result_context_converts_foreign_errors() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));

        let err = result.context("Failed to open log file").unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
        assert_eq!(err.error_code(), "E_IO");
        assert!(matches!(ErrorChain::new(&err).root_cause(), Error::Io(_)));
    }
}
