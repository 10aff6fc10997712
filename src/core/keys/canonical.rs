//! Canonical JSON writer
//!
//! Object keys are emitted in lexicographic order at every nesting level so
//! equal argument payloads always produce identical bytes, whatever order the
//! caller built their maps in (and whether or not `serde_json` was compiled
//! with `preserve_order`).

use serde_json::Value;

/// Serialize `value` canonically. Absent input serializes as `{}`.
pub fn canonical_json(value: Option<&Value>) -> String {
    match value {
        Some(value) => {
            let mut out = String::new();
            write_value(value, &mut out);
            out
        }
        None => "{}".to_string(),
    }
}

/// Serialize an argument list as a canonical JSON array
pub fn canonical_args_json(args: &[Value]) -> String {
    let mut out = String::with_capacity(args.len() * 16 + 2);
    write_array(args, &mut out);
    out
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_str(s, out),
        Value::Array(items) => write_array(items, out),
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_str(key, out);
                out.push(':');
                write_value(item, out);
            }
            out.push('}');
        }
    }
}

fn write_array(items: &[Value], out: &mut String) {
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_value(item, out);
    }
    out.push(']');
}

fn write_str(s: &str, out: &mut String) {
    // Display on a JSON string value yields the escaped, quoted literal
    out.push_str(&Value::String(s.to_string()).to_string());
}
