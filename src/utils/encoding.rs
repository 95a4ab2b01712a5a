//! HTML escaping utilities
//!
//! Escaping follows the configured charset: a string that is not well formed
//! under it escapes to the empty string rather than passing through partially.

use crate::config::Charset;
use crate::configuration::CONF;
use crate::utils::array::is_falsy;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    /// Named, decimal and hexadecimal character references at the start of the input
    static ref ENTITY: Regex =
        Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);").unwrap();
}

/// HTML escape a string
///
/// Escapes `&`, `<`, `>`, `"` and `'` (as `&#039;`). With `double_encode`
/// disabled, character references already present in the input are kept.
///
/// # Arguments
/// * `input` - String to escape
/// * `double_encode` - Escape the `&` of existing entities too
///
/// # Example
/// ```rust,ignore
/// assert_eq!(escape_html("<a href='x'>", true), "&lt;a href=&#039;x&#039;&gt;");
/// assert_eq!(escape_html("&amp; &", false), "&amp; &amp;");
/// ```
pub fn escape_html(input: &str, double_encode: bool) -> String {
    let mut result = String::with_capacity(input.len() + input.len() / 8);

    for (offset, ch) in input.char_indices() {
        match ch {
            '&' if !double_encode && ENTITY.is_match(&input[offset..]) => result.push('&'),
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            other => result.push(other),
        }
    }

    result
}

/// HTML escape a string checked against a charset
pub fn escape_html_with_charset(input: &str, double_encode: bool, charset: Charset) -> String {
    if !charset.is_valid(input.as_bytes()) {
        log::trace!("Refusing to escape text that is not valid {}", charset);
        return String::new();
    }

    escape_html(input, double_encode)
}

/// HTML escape a value, recursing into arrays and objects
///
/// Falsy values and non-string scalars are returned unchanged. Strings are
/// checked against the configured charset first.
///
/// # Example
/// ```rust,ignore
/// let escaped = html_escape(&json!({"title": "<b>", "count": 3}), false);
/// assert_eq!(escaped, json!({"title": "&lt;b&gt;", "count": 3}));
/// ```
pub fn html_escape(value: &Value, double_encode: bool) -> Value {
    if is_falsy(value) {
        return value.clone();
    }

    match value {
        Value::String(s) => {
            Value::String(escape_html_with_charset(s, double_encode, CONF::encoding()))
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| html_escape(item, double_encode))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), html_escape(item, double_encode)))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}
