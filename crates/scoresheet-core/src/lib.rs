pub mod assemble;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod scoring;

pub use assemble::merge_documents;
pub use config::ParseOptions;
pub use parsing::{
    parse_results_text, parse_tabbed_batch, parse_tabbed_sheet, BatchItem, ParsedDocument,
};

use error::ScoresheetError;
use extraction::TextConverter;

/// Main API entry point: parse an official result document (usually a PDF).
///
/// The converter turns the bytes into text; `url` is only carried on the
/// record for provenance.
pub fn parse_results_pdf(
    bytes: &[u8],
    converter: &dyn TextConverter,
    url: Option<&str>,
    options: &ParseOptions,
) -> Result<ParsedDocument, ScoresheetError> {
    let text = converter.convert(bytes)?;
    tracing::debug!(
        backend = converter.backend_name(),
        chars = text.len(),
        "converted document"
    );
    if text.trim().is_empty() {
        return Err(ScoresheetError::Conversion(format!(
            "{} produced no text",
            converter.backend_name()
        )));
    }
    parse_results_text(&text, url, options)
}
