//! Session Controller
//!
//! Owns the active `Session` and the template collection, and applies every
//! user operation as a plain state transition. Rendering lives elsewhere; this
//! type is driven either directly or through `update(Message)`.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{StudioError, StudioResult};
use crate::fixtures::FixtureData;
use crate::model::template::new_template_id;
use crate::model::{Catalog, ContentTemplate, Properties, Session, SessionStatus};

pub mod generation;
pub mod messages;
pub mod view;

pub use generation::GenerationTicket;
pub use messages::Message;
pub use view::StudioView;

/// What the event loop must do after a message was applied
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Run this ticket and feed its completion back
    Schedule(GenerationTicket),
    /// The pending generation was dropped
    Cancelled(u64),
    /// Show a user-facing notification
    Notify(String),
}

pub struct SessionController {
    catalog: Arc<Catalog>,
    session: Session,
    /// Most recently created first
    templates: Vec<ContentTemplate>,
    strict_ids: bool,
    generation_delay: Duration,
    completion_notice: String,
    /// Ticket id whose completion is still awaited
    pending_generation: Option<u64>,
    /// Monotonic id source for tickets, used to drop stale completions
    generation_id: u64,
}

impl SessionController {
    pub fn new(fixture: FixtureData, config: &Config) -> Self {
        let (catalog, session, templates) = fixture.into_parts();
        Self::from_parts(Arc::new(catalog), session, templates, config)
    }

    pub fn from_parts(
        catalog: Arc<Catalog>,
        session: Session,
        templates: Vec<ContentTemplate>,
        config: &Config,
    ) -> Self {
        info!(
            "🎛️ Session controller ready ({} voice clones, {} templates, strict ids: {})",
            catalog.voice_clones.len(),
            templates.len(),
            config.strict_ids
        );
        Self {
            catalog,
            session,
            templates,
            strict_ids: config.strict_ids,
            generation_delay: config.generation_delay(),
            completion_notice: config.completion_notice.clone(),
            pending_generation: None,
            generation_id: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn templates(&self) -> &[ContentTemplate] {
        &self.templates
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status
    }

    pub fn pending_generation(&self) -> Option<u64> {
        self.pending_generation
    }

    pub fn snapshot(&self) -> StudioView {
        StudioView {
            session: self.session.clone(),
            templates: self.templates.clone(),
            last_notice: None,
            last_error: None,
        }
    }

    /// Apply a message and report the follow-up work for the event loop
    pub fn update(&mut self, message: Message) -> StudioResult<Effect> {
        debug!("Applying {}", message.kind());
        match message {
            Message::SelectVoiceClone(id) => self.select_voice_clone(&id)?,
            Message::UpdateInput(text) => self.update_input(text),
            Message::UpdateProperties(partial) => self.update_properties(&partial),
            Message::ToggleVariations(enabled) => self.toggle_variations(enabled),
            Message::Generate => return Ok(Effect::Schedule(self.generate())),
            Message::CancelGeneration => {
                if let Some(id) = self.cancel_generation() {
                    return Ok(Effect::Cancelled(id));
                }
            }
            Message::GenerationFinished(id) => {
                if let Some(notice) = self.finish_generation(id) {
                    return Ok(Effect::Notify(notice));
                }
            }
            Message::SaveTemplate { name, description } => {
                self.save_template(&name, &description);
            }
            Message::LoadTemplate(id) => self.load_template(&id)?,
            Message::DeleteTemplate(id) => {
                self.delete_template(&id)?;
            }
        }
        Ok(Effect::None)
    }

    /// Select the voice clone used for generation
    ///
    /// Unknown ids are accepted unless strict mode is on.
    pub fn select_voice_clone(&mut self, id: &str) -> StudioResult<()> {
        if self.catalog.voice_clone(id).is_none() {
            if self.strict_ids {
                return Err(StudioError::UnknownVoiceClone(id.to_string()));
            }
            debug!("Voice clone '{}' not in catalog, accepting anyway", id);
        }
        info!("🗣️ Voice clone selected: {}", id);
        self.session.voice_clone_id = Some(id.to_string());
        Ok(())
    }

    pub fn update_input(&mut self, text: impl Into<String>) {
        self.session.set_input(text.into());
        self.session.last_saved_at = Some(Utc::now());
        debug!("Input updated ({} chars)", self.session.input_character_count);
    }

    pub fn update_properties(&mut self, partial: &Properties) {
        self.session.properties.merge(partial);
        debug!(
            "Properties updated: {:?}",
            partial.keys().collect::<Vec<_>>()
        );
    }

    pub fn toggle_variations(&mut self, enabled: bool) {
        self.session.generate_variations = enabled;
    }

    /// Start a simulated generation
    ///
    /// The status flips to `generating` before this returns. Any earlier
    /// pending ticket is superseded and its completion will be ignored.
    pub fn generate(&mut self) -> GenerationTicket {
        self.generation_id += 1;
        let id = self.generation_id;
        if let Some(previous) = self.pending_generation.replace(id) {
            debug!("Generation #{} superseded by #{}", previous, id);
        }
        self.session.status = SessionStatus::Generating;
        info!(
            "⏳ Generation #{} started (voice: {:?}, variations: {})",
            id, self.session.voice_clone_id, self.session.generate_variations
        );
        GenerationTicket {
            id,
            delay: self.generation_delay,
        }
    }

    /// Complete the generation for `id`
    ///
    /// Returns the notice to show, or None when the ticket is stale.
    pub fn finish_generation(&mut self, id: u64) -> Option<String> {
        if self.pending_generation != Some(id) {
            debug!("Ignoring stale generation #{}", id);
            return None;
        }
        self.pending_generation = None;
        self.session.status = SessionStatus::Ready;
        info!("✅ Generation #{} ready", id);
        Some(self.completion_notice.clone())
    }

    /// Drop the pending generation, returning its id
    pub fn cancel_generation(&mut self) -> Option<u64> {
        let id = self.pending_generation.take()?;
        if self.session.status == SessionStatus::Generating {
            self.session.status = SessionStatus::Editing;
        }
        info!("🛑 Generation #{} cancelled", id);
        Some(id)
    }

    /// Snapshot the current properties into a new template
    ///
    /// Returns the new template id. The template is placed first.
    pub fn save_template(&mut self, name: &str, description: &str) -> String {
        let now = Utc::now();
        let id = new_template_id(now, &self.templates);
        let template = ContentTemplate::new(
            id.clone(),
            name,
            description,
            self.session.properties.clone(),
            now,
        );
        self.templates.insert(0, template);
        info!("💾 Template saved: {} ({})", name, id);
        id
    }

    /// Replace the session properties with a template's snapshot
    pub fn load_template(&mut self, id: &str) -> StudioResult<()> {
        match self.templates.iter().find(|t| t.id == id) {
            Some(template) => {
                self.session.properties = template.properties.clone();
                info!("📂 Template loaded: {}", template.name);
                Ok(())
            }
            None if self.strict_ids => Err(StudioError::TemplateNotFound(id.to_string())),
            None => {
                debug!("Template '{}' not found, ignoring load", id);
                Ok(())
            }
        }
    }

    /// Remove every template with this id, returning how many went
    pub fn delete_template(&mut self, id: &str) -> StudioResult<usize> {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != id);
        let removed = before - self.templates.len();

        if removed == 0 {
            if self.strict_ids {
                return Err(StudioError::TemplateNotFound(id.to_string()));
            }
            debug!("Template '{}' not found, ignoring delete", id);
        } else {
            info!("🗑️ Template deleted: {}", id);
        }
        Ok(removed)
    }
}
