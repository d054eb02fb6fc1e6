pub mod json;
pub mod table;

use scoresheet_core::diagnostics::{Severity, Warning};

/// One-line warning count for stderr, when the full output went to a file.
pub fn print_warning_summary(warnings: &[Warning]) {
    if warnings.is_empty() {
        return;
    }
    let critical = warnings
        .iter()
        .filter(|w| w.severity == Severity::Critical)
        .count();
    eprintln!("  {} warning(s), {critical} critical", warnings.len());
    if critical > 0 {
        eprintln!("  document needs manual review");
    }
}
