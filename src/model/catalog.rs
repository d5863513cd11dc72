//! Read-only reference collections
//!
//! Loaded once from fixture data and never mutated by the controller. Any
//! fields beyond the ones the harness reads are carried opaquely in
//! `metadata`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceClone {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub id: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentVariation {
    pub id: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickFeedbackOption {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

/// Immutable collections shared with the presentation surface
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub voice_clones: Vec<VoiceClone>,
    pub platforms: Vec<Platform>,
    pub generated_content: Vec<GeneratedContent>,
    /// Variations keyed by generated content id
    pub content_variations: HashMap<String, Vec<ContentVariation>>,
    pub quick_feedback_options: Vec<QuickFeedbackOption>,
}

impl Catalog {
    pub fn voice_clone(&self, id: &str) -> Option<&VoiceClone> {
        self.voice_clones.iter().find(|v| v.id == id)
    }

    pub fn platform(&self, id: &str) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn variations_for(&self, content_id: &str) -> &[ContentVariation] {
        self.content_variations
            .get(content_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
