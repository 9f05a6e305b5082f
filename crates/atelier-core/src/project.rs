use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Per-project render state owned by the host.
///
/// `page_result` is the scene file generated from `template`; adapters read
/// it and may repoint it at a patched copy before triggering a recompute.
/// The handle's lifecycle belongs entirely to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderProject {
    pub name: String,
    pub template: PathBuf,
    pub page_result: PathBuf,
}

impl RenderProject {
    pub fn new(name: &str, template: PathBuf, page_result: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            template,
            page_result,
        }
    }
}
