//! Global configuration access for the RustF utilities
//!
//! The configuration is installed once during application startup and read by
//! the helpers afterwards. Helpers never fail because the configuration is
//! missing: until `CONF::init` is called they read the built-in defaults.
//!
//! # Usage
//! ```rust
//! use rustf_utils::config::{Charset, UtilsConfig};
//! use rustf_utils::CONF;
//!
//! let mut config = UtilsConfig::default();
//! config.encoding = Charset::Utf8;
//! let _ = CONF::init(config);
//!
//! assert_eq!(CONF::encoding(), Charset::Utf8);
//! ```

use crate::config::{Charset, UtilsConfig};
use crate::error::{Error, Result};
use once_cell::sync::{Lazy, OnceCell};

/// Global configuration instance
static CONFIG: OnceCell<UtilsConfig> = OnceCell::new();

/// Defaults served before initialization
static DEFAULTS: Lazy<UtilsConfig> = Lazy::new(UtilsConfig::default);

/// Global configuration access point
pub struct CONF;

impl CONF {
    /// Initialize the global configuration
    ///
    /// Fails if the configuration was already initialized or does not validate.
    ///
    /// # Examples
    /// ```rust,ignore
    /// let config = UtilsConfig::from_file("utils.toml")?;
    /// CONF::init(config)?;
    /// ```
    pub fn init(config: UtilsConfig) -> Result<()> {
        config.validate()?;

        let encoding = config.encoding;
        CONFIG
            .set(config)
            .map_err(|_| Error::config("Configuration has already been initialized"))?;

        log::debug!("Global configuration initialized (encoding: {})", encoding);
        Ok(())
    }

    /// Get the active configuration, or the defaults if none was installed
    pub fn get() -> &'static UtilsConfig {
        CONFIG.get().unwrap_or(&DEFAULTS)
    }

    /// Default charset used by string and encoding helpers
    pub fn encoding() -> Charset {
        Self::get().encoding
    }

    /// Check if the configuration has been initialized
    pub fn is_initialized() -> bool {
        CONFIG.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global can only be set once per process, so every assertion about
    // initialization lives in this single test.
    #[test]
    fn test_init_once() {
        let before = CONF::get().fetch.timeout_secs;
        assert_eq!(before, 30);

        let mut invalid = UtilsConfig::default();
        invalid.fetch.allowed_statuses.clear();
        assert!(CONF::init(invalid).is_err());
        assert!(!CONF::is_initialized());

        assert!(CONF::init(UtilsConfig::default()).is_ok());
        assert!(CONF::is_initialized());
        assert_eq!(CONF::encoding(), Charset::Utf8);

        let second = CONF::init(UtilsConfig::default());
        assert!(matches!(second, Err(Error::Config(_))));
    }
}
