//! Array and map accessors
//!
//! Containers are `serde_json::Value`s. With the `preserve_order` feature an
//! object keeps its insertion order, so a `Value::Object` behaves like an
//! ordered associative array and a `Value::Array` like a dense list.
//!
//! Numeric keys are interchangeable with their string form: `Key::Index(0)`
//! finds the entry `"0"` of an object and `Key::Name("0")` the first element of
//! an array.

use crate::error::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Address of an entry in an array or object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Index(usize),
    Name(&'a str),
}

impl<'a> Key<'a> {
    /// Position of this key when used against an array
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(name) => parse_index(name),
        }
    }

    /// Check if this key names the object entry `name`
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Key::Index(index) => parse_index(name) == Some(*index),
            Key::Name(own) => *own == name,
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{}", index),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for Key<'_> {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Key::Name(name)
    }
}

/// Canonical decimal index only, so "01" and "+1" stay names
fn parse_index(name: &str) -> Option<usize> {
    let canonical = name == "0" || (!name.starts_with('0') && !name.is_empty());
    if canonical && name.bytes().all(|b| b.is_ascii_digit()) {
        name.parse().ok()
    } else {
        None
    }
}

/// Look up an entry, `None` when the key does not exist
pub fn lookup<'v>(container: &'v Value, key: Key<'_>) -> Option<&'v Value> {
    match container {
        Value::Array(items) => key.as_index().and_then(|index| items.get(index)),
        Value::Object(map) => map.get(key.to_string().as_str()),
        _ => None,
    }
}

/// Get a value from a container, or a default when the key is missing
///
/// A key that exists but holds `null` still returns the stored `null`.
///
/// # Example
/// ```rust,ignore
/// let data = json!({"a": null});
/// assert_eq!(get(&data, Key::Name("a"), &json!(1)), &Value::Null);
/// assert_eq!(get(&data, Key::Name("b"), &json!(1)), &json!(1));
/// ```
pub fn get<'v>(container: &'v Value, key: Key<'_>, default: &'v Value) -> &'v Value {
    lookup(container, key).unwrap_or(default)
}

/// Set a value in a container
///
/// Writing one past the end of an array appends. Any other key an array cannot
/// hold turns it into an object keyed by the former indexes. A scalar
/// container is replaced by a fresh object.
pub fn set(container: &mut Value, key: Key<'_>, value: Value) {
    if let Value::Array(items) = container {
        match key.as_index() {
            Some(index) if index < items.len() => {
                items[index] = value;
                return;
            }
            Some(index) if index == items.len() => {
                items.push(value);
                return;
            }
            _ => {
                let map = std::mem::take(items)
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item))
                    .collect();
                *container = Value::Object(map);
            }
        }
    }

    if !container.is_object() {
        *container = Value::Object(Map::new());
    }

    if let Value::Object(map) = container {
        map.insert(key.to_string(), value);
    }
}

/// A copy of the container without the excluded keys
///
/// Object order is preserved. Arrays are reindexed once entries are removed.
pub fn filter_keys(container: &Value, excluded: &[Key<'_>]) -> Value {
    match container {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .filter(|(index, _)| !excluded.iter().any(|k| k.as_index() == Some(*index)))
                .map(|(_, item)| item.clone())
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(name, _)| !excluded.iter().any(|k| k.matches(name)))
                .map(|(name, item)| (name.clone(), item.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Flatten a nested container into its leaves
///
/// With `preserve_keys` the result is an object keyed by each leaf's own key,
/// later leaves overwriting earlier ones. Otherwise it is an array of the
/// leaves in traversal order. Empty nested containers have no leaves and
/// disappear; a scalar input has no leaves either.
///
/// # Example
/// ```rust,ignore
/// let nested = json!({"a": 1, "b": {"a": 2, "c": [3]}});
/// assert_eq!(flatten(&nested, false), json!([1, 2, 3]));
/// assert_eq!(flatten(&nested, true), json!({"a": 2, "0": 3}));
/// ```
pub fn flatten(nested: &Value, preserve_keys: bool) -> Value {
    if preserve_keys {
        let mut flattened = Map::new();
        walk_leaves(nested, &mut |key, leaf| {
            flattened.insert(key, leaf.clone());
        });
        Value::Object(flattened)
    } else {
        let mut flattened = Vec::new();
        walk_leaves(nested, &mut |_, leaf| flattened.push(leaf.clone()));
        Value::Array(flattened)
    }
}

fn walk_leaves<F>(container: &Value, visit: &mut F)
where
    F: FnMut(String, &Value),
{
    match container {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                visit_entry(index.to_string(), item, visit);
            }
        }
        Value::Object(map) => {
            for (name, item) in map {
                visit_entry(name.clone(), item, visit);
            }
        }
        _ => {}
    }
}

fn visit_entry<F>(key: String, item: &Value, visit: &mut F)
where
    F: FnMut(String, &Value),
{
    match item {
        Value::Array(_) | Value::Object(_) => walk_leaves(item, visit),
        leaf => visit(key, leaf),
    }
}

/// Remove every falsy entry (see [`is_falsy`])
///
/// Object keys are kept for the surviving entries; arrays are reindexed.
pub fn clean(container: &Value) -> Value {
    match container {
        Value::Array(items) => {
            Value::Array(items.iter().filter(|v| !is_falsy(v)).cloned().collect())
        }
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !is_falsy(v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// First entry of a container
pub fn first(container: &Value) -> Option<&Value> {
    match container {
        Value::Array(items) => items.first(),
        Value::Object(map) => map.values().next(),
        _ => None,
    }
}

/// Last entry of a container
pub fn last(container: &Value) -> Option<&Value> {
    match container {
        Value::Array(items) => items.last(),
        Value::Object(map) => map.values().next_back(),
        _ => None,
    }
}

/// Check if a container is associative
///
/// Arrays never are. An object is associative unless its keys are exactly
/// `"0"`, `"1"`, ... in order. Empty containers and scalars are not.
pub fn is_assoc(container: &Value) -> bool {
    match container {
        Value::Object(map) => map
            .keys()
            .enumerate()
            .any(|(index, name)| parse_index(name) != Some(index)),
        _ => false,
    }
}

/// Falsy values: `null`, `false`, `0`, `0.0`, `""`, `"0"` and empty containers
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Render a value as text
///
/// `true` is `"1"`, `false` and `null` are empty, integral floats lose their
/// fraction. Containers render as JSON text.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        container => container.to_string(),
    }
}

/// Coerce a value into an array-like container
///
/// Containers pass through unchanged, anything else becomes a one-element
/// array.
pub trait ToArray {
    fn to_array(self) -> Value;
}

impl ToArray for Value {
    fn to_array(self) -> Value {
        match self {
            Value::Array(_) | Value::Object(_) => self,
            scalar => Value::Array(vec![scalar]),
        }
    }
}

impl ToArray for Vec<Value> {
    fn to_array(self) -> Value {
        Value::Array(self)
    }
}

impl ToArray for Map<String, Value> {
    fn to_array(self) -> Value {
        Value::Object(self)
    }
}

/// Collect several values into one array
pub fn from_values<I>(values: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    Value::Array(values.into_iter().collect())
}

/// Convert any serializable record into an ordered map
///
/// Records that serialize to a scalar are wrapped like any other scalar.
pub fn record_to_array<T: Serialize>(record: &T) -> Result<Value> {
    Ok(serde_json::to_value(record)?.to_array())
}

/// Convert a record into a map keeping only the listed fields
///
/// The include list is applied at every object level. An empty list keeps
/// everything.
///
/// # Example
/// ```rust,ignore
/// #[derive(Serialize)]
/// struct User { name: String, password: String }
///
/// let user = User { name: "ada".into(), password: "x".into() };
/// assert_eq!(record_to_array_filtered(&user, &["name"])?, json!({"name": "ada"}));
/// ```
pub fn record_to_array_filtered<T: Serialize>(record: &T, include: &[&str]) -> Result<Value> {
    let value = record_to_array(record)?;
    Ok(keep_fields(value, include))
}

fn keep_fields(value: Value, include: &[&str]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(name, _)| include.is_empty() || include.contains(&name.as_str()))
                .map(|(name, item)| (name, keep_fields(item, include)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| keep_fields(item, include))
                .collect(),
        ),
        scalar => scalar,
    }
}
