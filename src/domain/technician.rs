use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::record::RecordId;

pub const UNNAMED_TECHNICIAN: &str = "Sem nome";

/// Contact record as returned by the helpdesk contacts endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactProfile {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "avatar", deserialize_with = "avatar_path")]
    pub avatar_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Technician {
    pub id: Option<RecordId>,
    pub name: String,
    /// Path relative to the helpdesk base URL; empty when no avatar is set.
    pub avatar_path: String,
    pub ticket_count: usize,
}

impl Technician {
    pub fn from_profile(profile: ContactProfile, ticket_count: usize) -> Self {
        Self {
            id: profile.id,
            name: profile
                .title
                .unwrap_or_else(|| UNNAMED_TECHNICIAN.to_string()),
            avatar_path: profile.avatar_path.unwrap_or_default(),
            ticket_count,
        }
    }

    pub fn avatar_url(&self, base_url: &str) -> String {
        if self.avatar_path.is_empty() {
            return String::new();
        }
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.avatar_path.trim_start_matches('/')
        )
    }
}

fn avatar_path<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .get("path")
        .and_then(Value::as_str)
        .map(str::to_string))
}
