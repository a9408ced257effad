use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::rendering::domain::display_mode::DisplayMode;
use crate::shared::error::FacemarkError;

/// Key of the display mode in host parameter maps.
pub const DISPLAY_TYPE_KEY: &str = "displayType";

/// User-tunable parameters of the landmark task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacemarkParams {
    #[serde(default)]
    pub display_mode: DisplayMode,
}

impl FacemarkParams {
    pub fn new(display_mode: DisplayMode) -> Self {
        Self { display_mode }
    }

    /// String map form used by hosts: `{"displayType": "<code>"}`.
    pub fn to_param_map(&self) -> HashMap<String, String> {
        HashMap::from([(
            DISPLAY_TYPE_KEY.to_string(),
            self.display_mode.code().to_string(),
        )])
    }

    pub fn from_param_map(map: &HashMap<String, String>) -> Result<Self, FacemarkError> {
        let mut params = Self::default();
        params.set_param_map(map)?;
        Ok(params)
    }

    /// Updates from a host parameter map. The display type key is required.
    pub fn set_param_map(&mut self, map: &HashMap<String, String>) -> Result<(), FacemarkError> {
        let raw = map.get(DISPLAY_TYPE_KEY).ok_or_else(|| {
            FacemarkError::invalid(format!("Missing parameter '{DISPLAY_TYPE_KEY}'"))
        })?;
        let code: i32 = raw.trim().parse().map_err(|_| {
            FacemarkError::invalid(format!(
                "Parameter '{DISPLAY_TYPE_KEY}' must be an integer, got '{raw}'"
            ))
        })?;
        self.display_mode = DisplayMode::try_from(code)?;
        Ok(())
    }

    /// Default parameter file in the user's config directory.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Facemark").join("params.json"))
    }

    /// Loads saved parameters, falling back to defaults when none are saved
    /// or the file is unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Result<Self, FacemarkError> {
        let json = fs::read_to_string(path).map_err(|e| {
            FacemarkError::invalid(format!("Cannot read parameters {}: {e}", path.display()))
        })?;
        serde_json::from_str(&json).map_err(|e| {
            FacemarkError::invalid(format!("Invalid parameters {}: {e}", path.display()))
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
