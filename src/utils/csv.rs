//! CSV serialization of records
//!
//! Output follows PHP's `fputcsv` conventions: a field is enclosed when it
//! contains the delimiter, the enclosure, a backslash, a space or a line
//! break, enclosure characters inside it are doubled, and every line ends with
//! `\n`.

use crate::utils::array::{lookup, stringify, Key, ToArray};
use serde_json::Value;

pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_ENCLOSURE: char = '"';

/// Convert records to a CSV string
///
/// `data` is either a list of records or a single flat record:
/// - When the first entry (key `0`) exists and some entry is a non-empty
///   container, `data` is a list of records. The header row comes from the
///   keys of the first record.
/// - Otherwise `data` itself is the only record and its keys are the header.
///
/// Scalars are treated as a one-element record. Rows are written until the
/// first entry that is not a record; nothing after it is emitted. Nested
/// containers inside a record render as JSON text.
///
/// # Example
/// ```rust,ignore
/// let csv = to_csv(&json!([{"a": 1, "b": 2}]), ',', '"');
/// assert_eq!(csv, "a,b\n1,2\n");
/// ```
pub fn to_csv(data: &Value, delimiter: char, enclosure: char) -> String {
    let data = data.clone().to_array();

    let is_record_list = lookup(&data, Key::Index(0)).is_some() && has_nested_records(&data);

    let (headings, records): (Vec<String>, Vec<&Value>) = if is_record_list {
        let headings = lookup(&data, Key::Index(0))
            .map(keys_of)
            .unwrap_or_default();
        (headings, entries(&data))
    } else {
        (keys_of(&data), vec![&data])
    };

    let mut output = String::new();
    write_row(&mut output, &headings, delimiter, enclosure);

    for record in records {
        if !matches!(record, Value::Array(_) | Value::Object(_)) {
            log::trace!("Stopping CSV output at a non-record entry");
            break;
        }

        let fields: Vec<String> = entries(record).into_iter().map(stringify).collect();
        write_row(&mut output, &fields, delimiter, enclosure);
    }

    output
}

/// Convert records to CSV with the default `,` delimiter and `"` enclosure
pub fn to_csv_default(data: &Value) -> String {
    to_csv(data, DEFAULT_DELIMITER, DEFAULT_ENCLOSURE)
}

fn has_nested_records(data: &Value) -> bool {
    entries(data).into_iter().any(|entry| match entry {
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => false,
    })
}

fn keys_of(container: &Value) -> Vec<String> {
    match container {
        Value::Array(items) => (0..items.len()).map(|i| i.to_string()).collect(),
        Value::Object(map) => map.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

fn entries(container: &Value) -> Vec<&Value> {
    match container {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    }
}

fn write_row(output: &mut String, fields: &[String], delimiter: char, enclosure: char) {
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            output.push(delimiter);
        }
        write_field(output, field, delimiter, enclosure);
    }
    output.push('\n');
}

fn write_field(output: &mut String, field: &str, delimiter: char, enclosure: char) {
    let needs_enclosure = field
        .chars()
        .any(|c| c == delimiter || c == enclosure || matches!(c, '\\' | '\n' | '\r' | '\t' | ' '));

    if !needs_enclosure {
        output.push_str(field);
        return;
    }

    output.push(enclosure);
    for ch in field.chars() {
        if ch == enclosure {
            output.push(enclosure);
        }
        output.push(ch);
    }
    output.push(enclosure);
}
