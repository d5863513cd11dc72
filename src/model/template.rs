//! Saved generation templates

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Properties;

/// A named, reusable snapshot of generation properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub usage_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentTemplate {
    /// Build a fresh user template from a properties snapshot
    pub fn new(
        id: String,
        name: &str,
        description: &str,
        properties: Properties,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            properties,
            is_default: false,
            usage_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Generate a template id, avoiding any id in `taken`
pub fn new_template_id(now: DateTime<Utc>, taken: &[ContentTemplate]) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let suffix: u32 = rng.gen_range(0..0x10000);
        let id = format!("tpl-{}-{:04x}", now.timestamp_millis(), suffix);
        if !taken.iter().any(|t| t.id == id) {
            return id;
        }
    }
}
