use scoresheet_core::error::ScoresheetError;
use serde_json::to_string_pretty;

pub fn print<T: serde::Serialize>(value: &T) -> Result<(), ScoresheetError> {
    let json = to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
