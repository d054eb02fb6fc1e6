pub mod detect;
pub mod import;
pub mod merge;
pub mod parse;

use scoresheet_core::config::{self, RollingPanelPolicy};
use scoresheet_core::error::ScoresheetError;
use scoresheet_core::extraction::pdftotext::PdftotextConverter;
use scoresheet_core::extraction::{PlainTextConverter, TextConverter};
use scoresheet_core::scoring::rounding::RoundingMode;
use scoresheet_core::ParseOptions;
use std::path::Path;

/// Options from the config file (if any), then command-line overrides.
pub fn build_options(
    config_file: Option<&Path>,
    rounding: Option<RoundingMode>,
    rolling_panel: Option<RollingPanelPolicy>,
) -> Result<ParseOptions, ScoresheetError> {
    let mut options = match config_file {
        Some(path) => config::load_options(path)?,
        None => ParseOptions::default(),
    };
    if let Some(rounding) = rounding {
        options.rounding = rounding;
    }
    if let Some(policy) = rolling_panel {
        options.rolling_panel = policy;
    }
    Ok(options)
}

/// PDFs go through pdftotext; anything else is taken as converter text.
pub fn converter_for(path: &Path) -> Result<Box<dyn TextConverter>, ScoresheetError> {
    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        return Ok(Box::new(PlainTextConverter));
    }

    let converter = PdftotextConverter::new();
    if !converter.is_available() {
        return Err(ScoresheetError::PdftotextNotFound);
    }
    Ok(Box::new(converter))
}
