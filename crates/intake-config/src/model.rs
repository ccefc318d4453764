use std::path::{Path, PathBuf};

use intake_domain::FormId;
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "vendor-intake";
const FORMS_DIR: &str = "forms";

/// Stores user-configurable CLI preferences and session metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_confirm_deletes")]
    pub confirm_deletes: bool,
    /// Form reopened at start-up when no other form is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_form_id: Option<FormId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for stored forms. Defaults to `<home>/forms`.
    pub forms_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui_color_enabled: Self::default_ui_color_enabled(),
            confirm_deletes: Self::default_confirm_deletes(),
            last_form_id: None,
            forms_root: None,
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_confirm_deletes() -> bool {
        true
    }

    /// Per-user data root used when no override is given.
    pub fn default_home() -> PathBuf {
        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        base.join(APP_DIR)
    }

    pub fn resolve_forms_root(&self, home: &Path) -> PathBuf {
        match &self.forms_root {
            Some(path) => path.clone(),
            None => home.join(FORMS_DIR),
        }
    }
}
