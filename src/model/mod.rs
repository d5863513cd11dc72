//! Data model for the content creator screen

pub mod catalog;
pub mod properties;
pub mod session;
pub mod template;

pub use catalog::{
    Catalog, ContentVariation, GeneratedContent, Platform, QuickFeedbackOption, VoiceClone,
};
pub use properties::Properties;
pub use session::{Session, SessionStatus};
pub use template::ContentTemplate;
