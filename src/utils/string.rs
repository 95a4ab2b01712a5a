//! String manipulation utilities
//!
//! Every function here works on Unicode scalar values rather than bytes, so
//! multi-byte input never splits in the middle of a character. Truncation is
//! measured in display columns.

use crate::config::Charset;
use crate::configuration::CONF;
use crate::error::{Error, Result};
use crate::utils::array::stringify;
use crate::utils::encoding;
use serde_json::{Map, Value};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marker appended by [`compact`]
pub const ELLIPSIS: &str = "...";

/// Characters removed by [`is_blank`], matching PHP's `trim`
const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Compact a string to a maximum display width
///
/// Returns the input unchanged when it already fits (or when `max_width` is 0).
/// Otherwise the longest prefix that fits together with `"..."` is kept, so the
/// result is never wider than `max_width` columns.
///
/// # Example
/// ```rust,ignore
/// assert_eq!(compact("hello world", 5), "he...");
/// assert_eq!(compact("hello", 0), "hello");
/// ```
pub fn compact(input: &str, max_width: usize) -> String {
    if max_width == 0 || UnicodeWidthStr::width(input) <= max_width {
        return input.to_string();
    }

    let budget = max_width.saturating_sub(UnicodeWidthStr::width(ELLIPSIS));
    let mut width = 0;
    let mut result = String::new();

    for ch in input.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > budget {
            break;
        }
        width += ch_width;
        result.push(ch);
    }

    result.push_str(ELLIPSIS);
    result
}

/// Convert a snake/kebab case string to camelCase
///
/// `-` and `_` become word breaks, each word gets an upper-case first letter,
/// spaces are removed and the very first character is lower-cased. The rest of
/// each word is left untouched.
///
/// # Example
/// ```rust,ignore
/// assert_eq!(to_camel_case("foo_bar-baz"), "fooBarBaz");
/// ```
pub fn to_camel_case(input: &str) -> String {
    let spaced: String = input
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();

    let mut result = String::with_capacity(spaced.len());
    let mut at_word_start = true;

    for ch in spaced.chars() {
        if at_word_start && !ch.is_whitespace() {
            result.extend(ch.to_uppercase());
        } else if ch != ' ' {
            result.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }

    lower_first(&result)
}

/// Convert a camelCase string to snake case
///
/// The delimiter is inserted before every ASCII upper-case letter that has a
/// preceding character (other than a newline), then the whole string is
/// lower-cased.
///
/// # Example
/// ```rust,ignore
/// assert_eq!(to_snake_case("fooBar", "_"), "foo_bar");
/// assert_eq!(to_snake_case("FooBar", "-"), "foo-bar");
/// ```
pub fn to_snake_case(input: &str, delimiter: &str) -> String {
    let mut result = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;

    for ch in input.chars() {
        if ch.is_ascii_uppercase() && matches!(prev, Some(p) if p != '\n') {
            result.push_str(delimiter);
        }
        result.push(ch);
        prev = Some(ch);
    }

    result.to_lowercase()
}

/// Lower-case a string
pub fn to_lower(input: &str) -> String {
    input.to_lowercase()
}

/// Upper-case a string
pub fn to_upper(input: &str) -> String {
    input.to_uppercase()
}

/// Title-case a string
///
/// The first letter after any character that is not alphanumeric (an
/// apostrophe excepted) is upper-cased, every other letter is lower-cased.
///
/// # Example
/// ```rust,ignore
/// assert_eq!(to_title("hello wORLD-wide o'neil"), "Hello World-Wide O'neil");
/// ```
pub fn to_title(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut prev: Option<char> = None;

    for ch in input.chars() {
        let starts_word = match prev {
            None => true,
            Some(p) => !p.is_alphanumeric() && p != '\'',
        };

        if starts_word {
            result.extend(ch.to_uppercase());
        } else {
            result.extend(ch.to_lowercase());
        }
        prev = Some(ch);
    }

    result
}

/// Check if a string begins with a substring
///
/// An empty needle always matches; a needle longer than the haystack never does.
pub fn starts_with(haystack: &str, needle: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        haystack.starts_with(needle)
    } else {
        haystack.to_lowercase().starts_with(&needle.to_lowercase())
    }
}

/// Check if a string ends with a substring
///
/// An empty needle always matches; a needle longer than the haystack never does.
pub fn ends_with(haystack: &str, needle: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        haystack.ends_with(needle)
    } else {
        haystack.to_lowercase().ends_with(&needle.to_lowercase())
    }
}

/// Check if a string contains a substring
pub fn contains(haystack: &str, needle: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        haystack.contains(needle)
    } else {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Check if a value is an empty string
///
/// Anything that is not a string counts as empty, as does a string that only
/// holds whitespace.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::String(s) => is_blank(s),
        _ => true,
    }
}

/// Check if a string is empty once surrounding whitespace is trimmed
pub fn is_blank(input: &str) -> bool {
    input.trim_matches(TRIM_CHARS).is_empty()
}

/// Number of characters (not bytes) in a string
pub fn len(input: &str) -> usize {
    input.chars().count()
}

/// Extract part of a string by character offsets
///
/// A negative `start` counts from the end. A `None` length runs to the end of
/// the string; a negative length stops that many characters before the end.
///
/// # Example
/// ```rust,ignore
/// assert_eq!(substr("déjà vu", 1, Some(3)), "éjà");
/// assert_eq!(substr("déjà vu", -2, None), "vu");
/// ```
pub fn substr(input: &str, start: isize, length: Option<isize>) -> String {
    let count = input.chars().count() as isize;

    let begin = if start < 0 {
        (count + start).max(0)
    } else {
        start.min(count)
    };

    let end = match length {
        None => count,
        Some(len) if len < 0 => count + len,
        Some(len) => (begin + len).min(count),
    };

    if end <= begin {
        return String::new();
    }

    input
        .chars()
        .skip(begin as usize)
        .take((end - begin) as usize)
        .collect()
}

/// Standardize line endings to `\n`
pub fn normalize_eol(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

/// Interpolate `{{key}}` placeholders from a context map
///
/// Placeholders without a matching key are left in place. Replacement values
/// are rendered with [`stringify`] and never re-scanned.
///
/// # Example
/// ```rust,ignore
/// let context = json!({"name": "Ada"});
/// let text = parse_template("Hello {{name}}!", context.as_object().unwrap());
/// assert_eq!(text, "Hello Ada!");
/// ```
pub fn parse_template(template: &str, context: &Map<String, Value>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        result.push_str(&rest[..open]);
        let candidate = &rest[open..];

        let replacement = candidate[2..].find("}}").and_then(|close| {
            let key = &candidate[2..2 + close];
            context
                .get(key)
                .map(|value| (stringify(value), close + 4))
        });

        match replacement {
            Some((value, consumed)) => {
                result.push_str(&value);
                rest = &candidate[consumed..];
            }
            None => {
                // Not a known placeholder, keep the brace and scan on
                result.push('{');
                rest = &candidate[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// Decode bytes under the configured charset, replacing invalid sequences with `?`
pub fn clean(bytes: &[u8]) -> String {
    clean_with_charset(bytes, CONF::encoding())
}

/// Decode bytes under a given charset, replacing invalid sequences with `?`
pub fn clean_with_charset(bytes: &[u8], charset: Charset) -> String {
    match charset {
        Charset::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        Charset::Ascii => bytes
            .iter()
            .map(|&b| if b.is_ascii() { char::from(b) } else { '?' })
            .collect(),
        Charset::Utf8 => {
            let mut result = String::with_capacity(bytes.len());
            let mut remaining = bytes;

            loop {
                match std::str::from_utf8(remaining) {
                    Ok(valid) => {
                        result.push_str(valid);
                        break;
                    }
                    Err(err) => {
                        let (valid, after) = remaining.split_at(err.valid_up_to());
                        // `valid` is known good up to this point
                        result.push_str(&String::from_utf8_lossy(valid));
                        result.push('?');

                        match err.error_len() {
                            Some(skip) => remaining = &after[skip..],
                            None => break,
                        }
                    }
                }
            }

            result
        }
    }
}

/// HTML-escape a string value
///
/// Passing anything other than a string is a usage error.
pub fn sanitize(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(encoding::escape_html(s, false)),
        other => Err(Error::invalid_argument(format!(
            "expected a string, got {}",
            value_kind(other)
        ))),
    }
}

/// Strip every character that cannot appear in an e-mail address
///
/// Keeps ASCII letters, digits and ``!#$%&'*+-=?^_`{|}~@.[]``.
pub fn sanitize_email(input: &str) -> String {
    const ALLOWED: &str = "!#$%&'*+-=?^_`{|}~@.[]";

    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || ALLOWED.contains(*c))
        .collect()
}

fn lower_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
