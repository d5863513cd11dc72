//! The single active generation context

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::Properties;

/// Lifecycle of the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Idle,
    Editing,
    Generating,
    Ready,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Editing => "editing",
            SessionStatus::Generating => "generating",
            SessionStatus::Ready => "ready",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// None until a voice clone is chosen
    #[serde(default, deserialize_with = "empty_as_none")]
    pub voice_clone_id: Option<String>,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub input_character_count: usize,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub generate_variations: bool,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default)]
    pub last_saved_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Character count as shown by the UI (UTF-16 code units)
    pub fn character_count(text: &str) -> usize {
        text.encode_utf16().count()
    }

    /// Replace the input and keep the derived count in sync
    pub(crate) fn set_input(&mut self, text: String) {
        self.input_character_count = Self::character_count(&text);
        self.input = text;
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
