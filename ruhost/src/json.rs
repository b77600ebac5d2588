//! JSON boundary between runtime values and the wire.
//!
//! Request bodies decode into runtime values for `req.body`; `res.json`
//! payloads encode back. Only data tags round-trip; non-data values
//! (functions, natives, machine types and instances) encode as their
//! stringified form, since a handler returning one across the wire can
//! only be informational.

use rulang_eval::Value;
use serde_json::{Map, Number, Value as Json};

/// Encodes a runtime value as JSON.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Number(n) => {
            // Integral values encode without a fractional part, matching
            // the language's stringification rule.
            if n.fract() == 0.0 && n.is_finite() && n.abs() <= i64::MAX as f64 {
                Json::Number(Number::from(*n as i64))
            } else {
                match Number::from_f64(*n) {
                    Some(number) => Json::Number(number),
                    // NaN and infinities have no JSON form.
                    None => Json::Null,
                }
            }
        },
        Value::String(s) => Json::String(s.clone()),
        Value::Array(elements) => {
            Json::Array(elements.borrow().iter().map(value_to_json).collect())
        },
        Value::Object(entries) => {
            let mut map = Map::new();
            for (key, value) in entries.borrow().iter() {
                map.insert(key.clone(), value_to_json(value));
            }
            Json::Object(map)
        },
        other => Json::String(other.stringify()),
    }
}

/// Decodes JSON into a runtime value.
pub fn json_to_value(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
        Json::String(s) => Value::String(s.clone()),
        Json::Array(elements) => Value::array(elements.iter().map(json_to_value).collect()),
        Json::Object(map) => Value::object(
            map.iter()
                .map(|(key, value)| (key.clone(), json_to_value(value)))
                .collect(),
        ),
    }
}
