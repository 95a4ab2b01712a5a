use crate::error::{Error, ErrorContext, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

/// Character set used by the string and encoding helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Charset {
    #[default]
    Utf8,
    Ascii,
    Latin1,
}

impl Charset {
    /// Resolve a charset from its name or one of its common aliases
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Some(Charset::Utf8),
            "ASCII" | "US-ASCII" => Some(Charset::Ascii),
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" | "LATIN-1" => Some(Charset::Latin1),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Ascii => "ASCII",
            Charset::Latin1 => "ISO-8859-1",
        }
    }

    /// Check whether a byte sequence is well formed in this charset
    pub fn is_valid(&self, bytes: &[u8]) -> bool {
        match self {
            Charset::Utf8 => std::str::from_utf8(bytes).is_ok(),
            Charset::Ascii => bytes.is_ascii(),
            // Every byte maps to a code point
            Charset::Latin1 => true,
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Charset {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Charset::from_name(&value).ok_or_else(|| format!("unsupported charset '{}'", value))
    }
}

impl From<Charset> for String {
    fn from(value: Charset) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UtilsConfig {
    #[serde(default)]
    pub encoding: Charset,

    #[serde(default)]
    pub request: RequestConfig,

    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Headers consulted, in order, when the proxy is trusted for the client IP
    #[serde(default = "default_proxy_headers")]
    pub proxy_headers: Vec<String>,

    /// Content types reported by `RequestContext::content_type`, keyed by format name
    #[serde(default = "default_supported_content_types")]
    pub supported_content_types: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_allowed_statuses")]
    pub allowed_statuses: Vec<u16>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_proxy_headers() -> Vec<String> {
    vec![
        "x-forwarded-for".to_string(),
        "client-ip".to_string(),
        "x-client-ip".to_string(),
        "x-cluster-client-ip".to_string(),
    ]
}

fn default_supported_content_types() -> IndexMap<String, String> {
    let mut types = IndexMap::new();
    types.insert("json".to_string(), "application/json".to_string());
    types.insert("jsonp".to_string(), "application/javascript".to_string());
    types.insert("text".to_string(), "text/plain".to_string());
    types
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_allowed_statuses() -> Vec<u16> {
    vec![200]
}

fn default_user_agent() -> String {
    concat!("rustf-utils/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            proxy_headers: default_proxy_headers(),
            supported_content_types: default_supported_content_types(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            allowed_statuses: default_allowed_statuses(),
            user_agent: default_user_agent(),
        }
    }
}

impl UtilsConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let content = fs::read_to_string(path_ref).with_context(|| {
            format!(
                "Failed to read config file '{}'. Make sure the file exists and is readable.",
                path_ref.display()
            )
        })?;

        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path_ref.display()))?;
        config.apply_env_overrides()?;
        config.validate()?;

        log::debug!(
            "Successfully loaded configuration from: {}",
            path_ref.display()
        );
        Ok(config)
    }

    /// Parse configuration from TOML text without touching the environment
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Create configuration with environment variable overrides
    pub fn from_env() -> Result<Self> {
        let mut config = UtilsConfig::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the helpers cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.fetch.timeout_secs == 0 {
            return Err(Error::config("fetch.timeout_secs must be greater than zero"));
        }

        if self.fetch.allowed_statuses.is_empty() {
            return Err(Error::config("fetch.allowed_statuses must not be empty"));
        }

        if let Some(status) = self
            .fetch
            .allowed_statuses
            .iter()
            .find(|s| !(100..=599).contains(*s))
        {
            return Err(Error::config(format!(
                "fetch.allowed_statuses contains invalid status code {}",
                status
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(encoding) = env::var("RUSTF_UTILS_ENCODING") {
            self.encoding = Charset::from_name(&encoding)
                .ok_or_else(|| Error::config("Invalid RUSTF_UTILS_ENCODING value"))?;
        }
        if let Ok(timeout) = env::var("RUSTF_UTILS_FETCH_TIMEOUT") {
            self.fetch.timeout_secs = timeout
                .parse()
                .map_err(|_| Error::config("Invalid RUSTF_UTILS_FETCH_TIMEOUT value"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = UtilsConfig::default();
        assert_eq!(config.encoding, Charset::Utf8);
        assert_eq!(config.fetch.timeout_secs, 30);
        assert_eq!(config.fetch.allowed_statuses, vec![200]);
        assert_eq!(config.request.proxy_headers[0], "x-forwarded-for");
        assert_eq!(
            config.request.supported_content_types.get("json"),
            Some(&"application/json".to_string())
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_charset_names() {
        assert_eq!(Charset::from_name("utf-8"), Some(Charset::Utf8));
        assert_eq!(Charset::from_name("US-ASCII"), Some(Charset::Ascii));
        assert_eq!(Charset::from_name("latin1"), Some(Charset::Latin1));
        assert_eq!(Charset::from_name("EBCDIC"), None);
        assert_eq!(Charset::Latin1.to_string(), "ISO-8859-1");
    }

    #[test]
    fn test_charset_validity() {
        let invalid_utf8 = [0x66, 0x6f, 0xff];
        assert!(!Charset::Utf8.is_valid(&invalid_utf8));
        assert!(Charset::Latin1.is_valid(&invalid_utf8));
        assert!(Charset::Ascii.is_valid(b"plain"));
        assert!(!Charset::Ascii.is_valid("ö".as_bytes()));
    }

    #[test]
    fn test_from_toml_str() {
        let config = UtilsConfig::from_toml_str(
            r#"
            encoding = "ISO-8859-1"

            [fetch]
            timeout_secs = 5
            allowed_statuses = [200, 204]
            "#,
        )
        .unwrap();

        assert_eq!(config.encoding, Charset::Latin1);
        assert_eq!(config.fetch.timeout_secs, 5);
        assert_eq!(config.fetch.allowed_statuses, vec![200, 204]);
        // Untouched sections keep their defaults
        assert_eq!(config.request.proxy_headers.len(), 4);
    }

    #[test]
    fn test_unknown_charset_is_rejected() {
        let result = UtilsConfig::from_toml_str(r#"encoding = "KOI8-R""#);
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_validate_rejects_bad_fetch_settings() {
        let mut config = UtilsConfig::default();
        config.fetch.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = UtilsConfig::default();
        config.fetch.allowed_statuses = vec![200, 999];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[request]\nproxy_headers = [\"x-real-ip\"]\n\n[request.supported_content_types]\ncsv = \"text/csv\""
        )
        .unwrap();

        let config = UtilsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.request.proxy_headers, vec!["x-real-ip".to_string()]);
        assert_eq!(config.request.supported_content_types.len(), 1);
    }

    #[test]
    fn test_from_file_missing() {
        let err = UtilsConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert_eq!(err.error_code(), "E_IO");
    }
}
