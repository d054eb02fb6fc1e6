use scoresheet_core::error::ScoresheetError;
use scoresheet_core::extraction::normalize_line_endings;
use scoresheet_core::{parse_tabbed_batch, ParseOptions};
use std::path::{Path, PathBuf};

use crate::output;

pub fn run(
    paths: &[PathBuf],
    output_format: &str,
    write_json: bool,
    options: &ParseOptions,
) -> Result<(), ScoresheetError> {
    let files = collect_text_files(paths)?;
    if files.is_empty() {
        return Err(ScoresheetError::ParseError("no .txt files found".into()));
    }
    tracing::debug!(files = files.len(), "importing sheets");

    let mut inputs = Vec::with_capacity(files.len());
    for file in &files {
        let text = std::fs::read_to_string(file)?;
        inputs.push((file.display().to_string(), normalize_line_endings(&text)));
    }

    let items = parse_tabbed_batch(inputs, options);
    let mut parsed = 0;
    for (item, file) in items.iter().zip(&files) {
        let doc = match &item.result {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("{}: skipped: {e}", item.source);
                continue;
            }
        };
        parsed += 1;

        if write_json {
            let target = file.with_extension("json");
            std::fs::write(&target, serde_json::to_string_pretty(&doc.record)?)?;
            eprintln!("{} -> {}", item.source, target.display());
        } else {
            match output_format {
                "json" => output::json::print(&doc.record)?,
                _ => {
                    println!("--- {} ---\n", item.source);
                    println!("{}", output::table::format_parsed(doc));
                }
            }
        }
    }

    eprintln!("Parsed {parsed} of {} sheet(s)", files.len());
    if parsed == 0 {
        return Err(ScoresheetError::ParseError("no sheet could be parsed".into()));
    }
    Ok(())
}

/// Files as given, plus the `.txt` files directly inside any directory, sorted.
fn collect_text_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, ScoresheetError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(path)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && has_txt_extension(p))
                .collect();
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn has_txt_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}
