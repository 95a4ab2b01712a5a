//! Global utilities module
//!
//! Helpers are grouped by concern into submodules and are also reachable
//! through the `U` namespace, with the most common ones as direct functions.
//!
//! # Usage
//! ```rust
//! use rustf_utils::U;
//!
//! let id = U::guid();
//! let short = U::compact("hello world", 5);
//! assert_eq!(short, "he...");
//! assert!(U::is_url("https://example.com"));
//! ```

pub mod array;
pub mod csv;
pub mod dump;
pub mod encoding;
pub mod file;
pub mod http;
pub mod number;
pub mod random;
pub mod string;
pub mod validation;
pub mod version;

/// Global utilities namespace
///
/// Every helper is available through the nested modules
/// (`U::String::to_camel_case`, `U::Array::flatten`, ...). The functions
/// defined directly on `U` are shortcuts for the ones used most often.
#[allow(non_snake_case)]
pub mod U {
    use super::*;
    use crate::error::Result;
    use serde_json::Value;
    use std::path::Path;
    use std::string::String as StdString;

    /// String utilities namespace
    pub mod String {
        pub use super::super::string::*;
    }

    /// Array and map utilities namespace
    pub mod Array {
        pub use super::super::array::*;
    }

    /// Encoding utilities namespace
    pub mod Encoding {
        pub use super::super::encoding::*;
    }

    /// Validation utilities namespace
    pub mod Validation {
        pub use super::super::validation::*;
    }

    /// Random utilities namespace
    pub mod Random {
        pub use super::super::random::*;
    }

    /// CSV utilities namespace
    pub mod Csv {
        pub use super::super::csv::*;
    }

    /// Debug dump utilities namespace
    pub mod Dump {
        pub use super::super::dump::*;
    }

    /// File utilities namespace
    pub mod File {
        pub use super::super::file::*;
    }

    /// HTTP utilities namespace
    pub mod Http {
        pub use super::super::http::*;
    }

    /// Number utilities namespace
    pub mod Number {
        pub use super::super::number::*;
    }

    /// Version utilities namespace
    pub mod Version {
        pub use super::super::version::*;
    }

    /// Generate a new GUID
    ///
    /// # Example
    /// ```rust,ignore
    /// let id = U::guid();
    /// println!("Generated ID: {}", id);
    /// ```
    pub fn guid() -> StdString {
        random::guid()
    }

    /// Compact a string to a maximum display width, appending `...`
    pub fn compact(input: &str, max_width: usize) -> StdString {
        string::compact(input, max_width)
    }

    /// Interpolate `{{key}}` placeholders
    ///
    /// # Example
    /// ```rust,ignore
    /// let context = json!({"name": "Ada"});
    /// let text = U::template("Hi {{name}}", context.as_object().unwrap());
    /// ```
    pub fn template(template: &str, context: &serde_json::Map<StdString, Value>) -> StdString {
        string::parse_template(template, context)
    }

    /// Get a value from a container or a default
    pub fn get<'v>(container: &'v Value, key: array::Key<'_>, default: &'v Value) -> &'v Value {
        array::get(container, key, default)
    }

    /// HTML escape a value, keeping existing entities
    pub fn html_escape(value: &Value) -> Value {
        encoding::html_escape(value, false)
    }

    /// Validate an absolute URL
    pub fn is_url(value: &str) -> bool {
        validation::is_url(value)
    }

    /// Validate an e-mail address
    pub fn is_email(value: &str) -> bool {
        validation::is_email_address(value)
    }

    /// Validate a public IPv4 address (private and reserved ranges excluded)
    pub fn is_public_ipv4(value: &str) -> bool {
        validation::is_ip_address(value, validation::IpFamily::V4, true)
    }

    /// Convert records to CSV with `,` and `"`
    pub fn to_csv(data: &Value) -> StdString {
        csv::to_csv_default(data)
    }

    /// Dump a value as an HTML `<pre>` block
    pub fn dump(value: &Value, label: &str) -> StdString {
        dump::dump(value, label)
    }

    /// Append to a file under an exclusive lock
    pub fn append_file<P: AsRef<Path>>(path: P, data: &[u8]) -> bool {
        file::file_write(path, data, false)
    }

    /// Percentage change from `old` to `new`, formatted like `25%`
    pub fn percent_diff(old: f64, new: f64) -> Option<StdString> {
        number::percent_diff(old, new).map(number::format_percent)
    }

    /// Decode the query string of a URL
    pub fn query_params(url: &str) -> serde_json::Map<StdString, Value> {
        http::parse_query_params(url)
    }

    /// Fetch a URL with the configured defaults
    ///
    /// # Example
    /// ```rust,ignore
    /// let body = U::fetch("https://example.com/feed.json").await?;
    /// ```
    pub async fn fetch(url: &str) -> Result<StdString> {
        http::fetch(url, &http::FetchOptions::default()).await
    }
}

/// Alias for the global utilities module
pub use U as Utils;
