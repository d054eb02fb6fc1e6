use scoresheet_core::error::ScoresheetError;
use scoresheet_core::ParseOptions;
use std::path::PathBuf;

use crate::commands::converter_for;
use crate::output;

pub fn run(
    input_file: PathBuf,
    url: Option<&str>,
    output_format: &str,
    output_file: Option<PathBuf>,
    options: &ParseOptions,
) -> Result<(), ScoresheetError> {
    let bytes = std::fs::read(&input_file)?;
    let converter = converter_for(&input_file)?;
    let parsed = scoresheet_core::parse_results_pdf(&bytes, converter.as_ref(), url, options)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&parsed.record)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed {} act(s), written to {}",
                parsed.record.acts.len(),
                path.display()
            );
            output::print_warning_summary(&parsed.warnings);
        }
        None => match output_format {
            "json" => output::json::print(&parsed.record)?,
            _ => println!("{}", output::table::format_parsed(&parsed)),
        },
    }

    Ok(())
}
