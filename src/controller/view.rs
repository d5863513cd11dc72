//! Snapshot handed to the presentation surface after every mutation

use serde::Serialize;

use crate::model::{ContentTemplate, Session};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioView {
    pub session: Session,
    pub templates: Vec<ContentTemplate>,
    /// Latest user-facing notification, if any
    pub last_notice: Option<String>,
    /// Latest rejected operation (strict mode only)
    pub last_error: Option<String>,
}
