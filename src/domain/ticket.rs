use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::record::{RecordId, is_blank};

pub const UNIDENTIFIED_CLIENT: &str = "Cliente não identificado";

/// Issue as listed by the helpdesk. Display fields are passed through in
/// whatever JSON shape the helpdesk uses.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticket {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub contact: Option<ContactRef>,
    #[serde(default, deserialize_with = "responsible_id")]
    pub responsible_id: Option<String>,
}

/// Requester reference: either a bare name or an embedded contact record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContactRef {
    Name(String),
    Record {
        #[serde(default)]
        name: Option<String>,
    },
    Other(IgnoredAny),
}

impl Ticket {
    pub fn is_unassigned(&self) -> bool {
        self.responsible_id.is_none()
    }

    /// Responsible technician, when the reference is a numeric ID.
    pub fn responsible_technician(&self) -> Option<u64> {
        self.responsible_id.as_deref()?.trim().parse().ok()
    }

    pub fn title_text(&self) -> String {
        match &self.title {
            Some(Value::String(title)) => title.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    pub fn client_name(&self) -> &str {
        match &self.contact {
            Some(ContactRef::Name(name)) => name,
            Some(ContactRef::Record { name: Some(name) }) => name,
            _ => UNIDENTIFIED_CLIENT,
        }
    }
}

fn responsible_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if is_blank(&value) {
        return Ok(None);
    }
    let id = match value {
        Value::String(text) => text,
        Value::Number(number) => match (number.as_u64(), number.as_f64()) {
            (Some(id), _) => id.to_string(),
            (None, Some(float)) if float.fract() == 0.0 => format!("{float:.0}"),
            _ => number.to_string(),
        },
        other => other.to_string(),
    };
    Ok(Some(id))
}

pub fn unassigned(tickets: Vec<Ticket>) -> Vec<Ticket> {
    tickets
        .into_iter()
        .filter(Ticket::is_unassigned)
        .collect()
}
