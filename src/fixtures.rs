//! Fixture Data Source
//!
//! Seeds the harness with sample collections and the initial session.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{StudioError, StudioResult};
use crate::model::{
    Catalog, ContentTemplate, ContentVariation, GeneratedContent, Platform, QuickFeedbackOption,
    Session, VoiceClone,
};

const BUILTIN_FIXTURE: &str = include_str!("../data/sample.json");

/// Everything the preview screen is seeded with
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureData {
    #[serde(default)]
    pub available_voice_clones: Vec<VoiceClone>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub content_templates: Vec<ContentTemplate>,
    #[serde(default)]
    pub generated_content: Vec<GeneratedContent>,
    #[serde(default)]
    pub content_variations: HashMap<String, Vec<ContentVariation>>,
    #[serde(default)]
    pub quick_feedback_options: Vec<QuickFeedbackOption>,
    #[serde(default)]
    pub current_session: Session,
}

impl FixtureData {
    /// Sample data compiled into the binary
    pub fn builtin() -> StudioResult<Self> {
        Self::parse(BUILTIN_FIXTURE)
    }

    /// Load fixture data from a JSON file
    pub fn load(path: &Path) -> StudioResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StudioError::Fixture(format!("{}: {}", path.display(), e)))?;
        let data = Self::parse(&content)?;
        info!(
            "📦 Loaded fixture {:?}: {} voice clones, {} templates",
            path,
            data.available_voice_clones.len(),
            data.content_templates.len()
        );
        Ok(data)
    }

    pub fn parse(json: &str) -> StudioResult<Self> {
        let mut data: FixtureData =
            serde_json::from_str(json).map_err(|e| StudioError::Fixture(e.to_string()))?;
        data.normalize();
        Ok(data)
    }

    /// Split into the immutable catalog and the mutable seed state
    pub fn into_parts(self) -> (Catalog, Session, Vec<ContentTemplate>) {
        let catalog = Catalog {
            voice_clones: self.available_voice_clones,
            platforms: self.platforms,
            generated_content: self.generated_content,
            content_variations: self.content_variations,
            quick_feedback_options: self.quick_feedback_options,
        };
        (catalog, self.current_session, self.content_templates)
    }

    fn normalize(&mut self) {
        let session = &mut self.current_session;
        let actual = Session::character_count(&session.input);
        if session.input_character_count != actual {
            warn!(
                "Fixture character count {} does not match input length {}, correcting",
                session.input_character_count, actual
            );
            session.input_character_count = actual;
        }
    }
}
