use crate::error::ScoresheetError;
use crate::scoring::rounding::RoundingMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Marker that result documents print in front of a rotating panel's names.
pub const ROLLING_PANEL_MARKER: &str = "Rolling Panel:";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollingPanelPolicy {
    /// Halve judge counts when the source text carries the rolling-panel marker.
    #[default]
    Detect,
    Always,
    Never,
}

impl RollingPanelPolicy {
    pub fn resolve(&self, raw_text: &str) -> bool {
        match self {
            RollingPanelPolicy::Detect => raw_text.contains(ROLLING_PANEL_MARKER),
            RollingPanelPolicy::Always => true,
            RollingPanelPolicy::Never => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseOptions {
    pub rounding: RoundingMode,
    pub rolling_panel: RollingPanelPolicy,
    /// Title given to a song whose name could not be recovered.
    pub unknown_title: String,
    /// Value given to a missing header field.
    pub unknown_text: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::HalfUp,
            rolling_panel: RollingPanelPolicy::Detect,
            unknown_title: "unknown".to_string(),
            unknown_text: "UNKNOWN".to_string(),
        }
    }
}

/// Load parse options from a JSON file.
pub fn load_options(path: &Path) -> Result<ParseOptions, ScoresheetError> {
    let content = std::fs::read_to_string(path).map_err(|e| ScoresheetError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let options: ParseOptions =
        serde_json::from_str(&content).map_err(|e| ScoresheetError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_options(&options)?;
    Ok(options)
}

/// Parse options from a JSON string (no file path context).
pub fn parse_options_str(json: &str) -> Result<ParseOptions, ScoresheetError> {
    let options: ParseOptions = serde_json::from_str(json)?;
    validate_options(&options)?;
    Ok(options)
}

pub fn validate_options(options: &ParseOptions) -> Result<(), ScoresheetError> {
    if options.unknown_title.trim().is_empty() {
        return Err(ScoresheetError::ConfigInvalid(
            "unknown_title must not be empty".into(),
        ));
    }
    if options.unknown_text.trim().is_empty() {
        return Err(ScoresheetError::ConfigInvalid(
            "unknown_text must not be empty".into(),
        ));
    }
    Ok(())
}
