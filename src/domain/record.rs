use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier as the helpdesk sends it. Agidesk mixes numeric and string IDs,
/// so the wire shape is kept and echoed back unchanged. Anything else is
/// carried verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
    Other(Value),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(id) => write!(f, "{id}"),
            RecordId::Text(id) => f.write_str(id),
            RecordId::Other(id) => write!(f, "{id}"),
        }
    }
}

/// Falsy values read as "not set": `null`, `false`, `0`, `""`, `[]` and `{}`.
/// Whitespace is a value.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
