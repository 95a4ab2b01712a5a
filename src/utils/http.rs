//! Outbound HTTP helpers
//!
//! [`fetch`] performs a single GET and tells connection problems apart from
//! answers the caller did not expect:
//!
//! - the URL does not validate: `Error::InvalidUrl`
//! - connect, TLS, timeout or body read failure: `Error::Transport`
//! - status code outside `allowed_statuses`: `Error::UnexpectedStatus`

use crate::config::FetchConfig;
use crate::configuration::CONF;
use crate::error::{Error, Result};
use crate::http::form::parse_str;
use crate::utils::validation::is_url;
use serde_json::{Map, Value};
use std::time::Duration;

/// Options for [`fetch`]
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
    pub headers: Vec<(String, String)>,
    pub allowed_statuses: Vec<u16>,
}

impl Default for FetchOptions {
    /// Options taken from the global configuration
    fn default() -> Self {
        Self::from_config(&CONF::get().fetch)
    }
}

impl FetchOptions {
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: config.user_agent.clone(),
            headers: Vec::new(),
            allowed_statuses: config.allowed_statuses.clone(),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a request header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replace the list of accepted status codes
    pub fn allow_statuses(mut self, statuses: &[u16]) -> Self {
        self.allowed_statuses = statuses.to_vec();
        self
    }
}

/// Fetch the body of a URL with a GET request
///
/// # Arguments
/// * `url` - Absolute URL to fetch
/// * `options` - Timeout, headers, user agent and accepted status codes
///
/// # Example
/// ```rust,ignore
/// let options = FetchOptions::default().header("Accept", "application/json");
/// match fetch("https://api.example.com/status", &options).await {
///     Ok(body) => println!("{}", body),
///     Err(e) if e.is_transport() => println!("network trouble: {}", e),
///     Err(e) => println!("bad answer: {}", e),
/// }
/// ```
pub async fn fetch(url: &str, options: &FetchOptions) -> Result<String> {
    if !is_url(url) {
        return Err(Error::invalid_url(url));
    }

    let client = reqwest::Client::builder()
        .timeout(options.timeout)
        .user_agent(options.user_agent.as_str())
        .build()
        .map_err(|e| Error::transport(url, e.to_string()))?;

    let mut request = client.get(url);
    for (name, value) in &options.headers {
        request = request.header(name.as_str(), value.as_str());
    }

    log::debug!("Fetching {} (timeout {:?})", url, options.timeout);

    let response = request.send().await.map_err(|e| {
        log::warn!("Fetching {} failed: {}", url, e);
        Error::transport(url, e.to_string())
    })?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| Error::transport(url, e.to_string()))?;

    if !options.allowed_statuses.contains(&status) {
        log::warn!("Fetching {} returned disallowed status {}", url, status);
        return Err(Error::unexpected_status(url, status, body));
    }

    Ok(body)
}

/// Decode the query string of a URL into a map
///
/// Returns an empty map when the URL has no query.
///
/// # Example
/// ```rust,ignore
/// let params = parse_query_params("http://example.com/index.php?key_1=value1&key_2=value2");
/// assert_eq!(params["key_2"], "value2");
/// ```
pub fn parse_query_params(url: &str) -> Map<String, Value> {
    let without_fragment = url.split('#').next().unwrap_or("");

    match without_fragment.split_once('?') {
        Some((_, query)) => parse_str(query),
        None => Map::new(),
    }
}
