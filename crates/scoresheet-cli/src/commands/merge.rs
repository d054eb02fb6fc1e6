use scoresheet_core::error::ScoresheetError;
use scoresheet_core::model::DocumentRecord;
use scoresheet_core::{merge_documents, ParseOptions};
use std::path::Path;

use crate::output;

pub fn run(
    existing: &Path,
    incoming: &Path,
    output_format: &str,
    options: &ParseOptions,
) -> Result<(), ScoresheetError> {
    let existing = read_document(existing)?;
    let incoming = read_document(incoming)?;
    let (merged, warnings) = merge_documents(existing, incoming, options)?;

    match output_format {
        "json" => output::json::print(&merged)?,
        _ => println!("{}", output::table::format_document(&merged, &warnings)),
    }
    Ok(())
}

fn read_document(path: &Path) -> Result<DocumentRecord, ScoresheetError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}
