//! `application/x-www-form-urlencoded` decoding
//!
//! Decodes query strings and form bodies into nested maps using the bracket
//! conventions web forms rely on:
//!
//! - `a=1&b=2` gives `{"a": "1", "b": "2"}`
//! - `tags[]=x&tags[]=y` gives `{"tags": ["x", "y"]}`
//! - `user[name]=ada` gives `{"user": {"name": "ada"}}`
//!
//! `+` decodes to a space and malformed percent escapes are kept literally.
//! In the top-level name, dots and spaces become underscores.

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

/// Deepest bracket nesting accepted in a name; deeper variables are dropped
pub const MAX_NESTING_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Append,
}

/// Decode a query string or form body into a map
///
/// Values are always strings; containers come only from bracket syntax.
/// Containers whose keys are exactly `0..n` in order become arrays.
///
/// # Example
/// ```rust,ignore
/// let params = parse_str("a=1&list[]=x&list[]=y");
/// assert_eq!(Value::Object(params), json!({"a": "1", "list": ["x", "y"]}));
/// ```
pub fn parse_str(input: &str) -> Map<String, Value> {
    let mut root = Map::new();

    for pair in input.split('&') {
        if pair.is_empty() {
            continue;
        }

        let (raw_name, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = decode_component(raw_name);

        if let Some((base, segments)) = parse_name(&name) {
            insert(&mut root, base, &segments, decode_component(raw_value));
        }
    }

    finalize(root)
}

/// Percent-decode one name or value, treating `+` as a space
pub fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

fn parse_name(name: &str) -> Option<(String, Vec<Segment>)> {
    let name = name.trim_start_matches(' ');

    let (base, mut rest) = match name.find('[') {
        Some(open) if name[open..].contains(']') => (normalize_base(&name[..open]), &name[open..]),
        Some(open) => {
            // Unmatched bracket: the name stays flat with the bracket as `_`
            let base = format!("{}_{}", normalize_base(&name[..open]), &name[open + 1..]);
            (base, "")
        }
        None => (normalize_base(name), ""),
    };

    if base.is_empty() {
        return None;
    }

    let mut segments = Vec::new();
    while rest.starts_with('[') {
        let close = match rest.find(']') {
            Some(close) => close,
            None => break,
        };

        if segments.len() == MAX_NESTING_DEPTH {
            log::debug!("Dropping input variable '{}' nested deeper than {}", base, MAX_NESTING_DEPTH);
            return None;
        }

        let index = &rest[1..close];
        segments.push(if index.is_empty() {
            Segment::Append
        } else {
            Segment::Key(index.to_string())
        });
        rest = &rest[close + 1..];
    }

    Some((base, segments))
}

fn normalize_base(name: &str) -> String {
    name.chars()
        .map(|c| if c == '.' || c == ' ' { '_' } else { c })
        .collect()
}

fn insert(map: &mut Map<String, Value>, key: String, rest: &[Segment], value: String) {
    let (next, remaining) = match rest.split_first() {
        None => {
            map.insert(key, Value::String(value));
            return;
        }
        Some(split) => split,
    };

    let entry = map.entry(key).or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }

    if let Value::Object(child) = entry {
        let child_key = match next {
            Segment::Key(name) => name.clone(),
            Segment::Append => match next_index(child) {
                Some(index) => index.to_string(),
                None => {
                    log::debug!("No free index left to append input to");
                    return;
                }
            },
        };
        insert(child, child_key, remaining, value);
    }
}

/// One past the largest integer key, 0 for none, `None` once `u64::MAX` is taken
fn next_index(map: &Map<String, Value>) -> Option<u64> {
    match map.keys().filter_map(|key| key.parse::<u64>().ok()).max() {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}

fn finalize(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (key, finalize_value(value)))
        .collect()
}

fn finalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let is_list = map
                .keys()
                .enumerate()
                .all(|(index, key)| key == &index.to_string());

            let map = finalize(map);
            if is_list && !map.is_empty() {
                Value::Array(map.into_iter().map(|(_, v)| v).collect())
            } else {
                Value::Object(map)
            }
        }
        other => other,
    }
}
