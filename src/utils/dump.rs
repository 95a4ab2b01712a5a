//! Debug dumps of nested values
//!
//! Renders values in the familiar `var_dump` layout, one entry per line:
//!
//! ```text
//! array(2) {
//!   ["name"] => string(3) "Ada"
//!   ["tags"] => array(1) {
//!     [0] => bool(true)
//!   }
//! }
//! ```

use crate::utils::encoding::escape_html;
use serde_json::{Number, Value};
use std::fmt::Write;

const PRE_STYLE: &str = "background: #3498db; color: #000; border: 1px dotted #000; \
                         margin: 10px 0; padding: 10px; text-align: left; white-space: pre-wrap;";

/// Dump a value as an HTML `<pre>` block headed by `label`
///
/// Label and content are HTML escaped.
///
/// # Example
/// ```rust,ignore
/// let html = dump(&json!({"id": 7}), "record");
/// assert!(html.contains("record =&gt; array(1) {"));
/// ```
pub fn dump(value: &Value, label: &str) -> String {
    format!(
        "<pre style=\"{}\">{}</pre>",
        PRE_STYLE,
        escape_html(&format!("{} => {}", label, var_dump(value)), true)
    )
}

/// Write a dump of a value to the debug log
pub fn dump_to_log(value: &Value, label: &str) {
    log::debug!("{} => {}", label, var_dump(value).trim_end());
}

/// Plain-text dump of a value, ending in a newline
pub fn var_dump(value: &Value) -> String {
    let mut output = String::new();
    write_value(&mut output, value, 0);
    output
}

fn write_value(output: &mut String, value: &Value, depth: usize) {
    // Writing into a String cannot fail
    let _ = match value {
        Value::Null => writeln!(output, "NULL"),
        Value::Bool(b) => writeln!(output, "bool({})", b),
        Value::Number(n) => writeln!(output, "{}", number_label(n)),
        Value::String(s) => writeln!(output, "string({}) \"{}\"", s.len(), s),
        Value::Array(items) => {
            let _ = writeln!(output, "array({}) {{", items.len());
            for (index, item) in items.iter().enumerate() {
                write_entry(output, &index.to_string(), false, item, depth + 1);
            }
            writeln!(output, "{}}}", indent(depth))
        }
        Value::Object(map) => {
            let _ = writeln!(output, "array({}) {{", map.len());
            for (key, item) in map {
                let quoted = !is_index(key);
                write_entry(output, key, quoted, item, depth + 1);
            }
            writeln!(output, "{}}}", indent(depth))
        }
    };
}

fn write_entry(output: &mut String, key: &str, quoted: bool, value: &Value, depth: usize) {
    output.push_str(&indent(depth));
    if quoted {
        let _ = write!(output, "[\"{}\"] => ", key);
    } else {
        let _ = write!(output, "[{}] => ", key);
    }
    write_value(output, value, depth);
}

fn number_label(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("float({})", f as i64)
            } else {
                format!("float({})", f)
            }
        }
        _ => format!("int({})", n),
    }
}

fn is_index(key: &str) -> bool {
    !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'))
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
