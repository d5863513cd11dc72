//! Message types for the session controller
//!
//! Everything the presentation surface can ask the controller to do.

use crate::model::Properties;

/// Messages that drive the session
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Voice
    SelectVoiceClone(String),

    // Editing
    UpdateInput(String),
    UpdateProperties(Properties),
    ToggleVariations(bool),

    // Generation
    Generate,
    CancelGeneration,
    GenerationFinished(u64),

    // Templates
    SaveTemplate { name: String, description: String },
    LoadTemplate(String),
    DeleteTemplate(String),
}

impl Message {
    /// Short label used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Message::SelectVoiceClone(_) => "select_voice_clone",
            Message::UpdateInput(_) => "update_input",
            Message::UpdateProperties(_) => "update_properties",
            Message::ToggleVariations(_) => "toggle_variations",
            Message::Generate => "generate",
            Message::CancelGeneration => "cancel_generation",
            Message::GenerationFinished(_) => "generation_finished",
            Message::SaveTemplate { .. } => "save_template",
            Message::LoadTemplate(_) => "load_template",
            Message::DeleteTemplate(_) => "delete_template",
        }
    }
}
