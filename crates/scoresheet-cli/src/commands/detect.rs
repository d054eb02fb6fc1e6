use scoresheet_core::error::ScoresheetError;
use scoresheet_core::parsing::header::competition_type_from_text;
use scoresheet_core::parsing::layout::detect_layout;
use std::path::Path;

use crate::commands::converter_for;

pub fn run(input_file: &Path) -> Result<(), ScoresheetError> {
    let bytes = std::fs::read(input_file)?;
    let text = converter_for(input_file)?.convert(&bytes)?;

    println!("layout: {}", detect_layout(&text));
    match competition_type_from_text(&text) {
        Some(kind) => println!("type:   {kind}"),
        None => println!("type:   unresolved"),
    }
    Ok(())
}
