use scoresheet_core::diagnostics::{Severity, Warning};
use scoresheet_core::model::{Category, DocumentRecord};
use scoresheet_core::ParsedDocument;
use std::fmt::Write;

pub fn format_parsed(parsed: &ParsedDocument) -> String {
    let mut out = String::new();
    if let Some(layout) = parsed.layout {
        let _ = writeln!(out, "Layout: {layout}");
    }
    out.push_str(&format_document(&parsed.record, &parsed.warnings));
    out
}

pub fn format_document(doc: &DocumentRecord, warnings: &[Warning]) -> String {
    let mut out = String::new();

    let stream = doc
        .stream
        .map(|s| format!(" ({s} stream)"))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "{} {}{} - {}: {} ({})",
        doc.association, doc.contest, stream, doc.location, doc.year, doc.date
    );
    let _ = writeln!(out, "Type: {}\n", doc.competition_type);

    for category in [
        Category::Music,
        Category::Performance,
        Category::Singing,
        Category::Administration,
    ] {
        let names: Vec<&str> = doc.judges_in(category).map(|j| j.name.as_str()).collect();
        if !names.is_empty() {
            let _ = writeln!(out, "  {:<15} {}", format!("{category}:"), names.join(", "));
        }
    }
    out.push('\n');

    let max_name = doc.acts.iter().map(|a| a.name.len()).max().unwrap_or(10).max(4);
    let _ = writeln!(
        out,
        "  {:>4}  {:<width$}  {:>6}  {:>6}  {:>6}  {:>6}  {:>6}  {:>3}",
        "Rank",
        "Name",
        "Total",
        "%",
        "M%",
        "P%",
        "S%",
        "n",
        width = max_name
    );
    for act in &doc.acts {
        let _ = writeln!(
            out,
            "  {:>4}  {:<width$}  {:>6}  {:>6}  {:>6}  {:>6}  {:>6}  {:>3}",
            act.rank,
            act.name,
            act.total_score,
            act.percentage,
            act.percentages.music,
            act.percentages.performance,
            act.percentages.singing,
            act.weighted_songs,
            width = max_name
        );
        for song in &act.songs {
            let _ = writeln!(
                out,
                "  {:>4}    {:<width$}{:>6}  {:>6}",
                "",
                song.name,
                song.total_score,
                song.percentage,
                width = max_name - 2
            );
        }
    }

    if !warnings.is_empty() {
        let _ = writeln!(out, "\n  Warnings:");
        for w in warnings {
            let marker = if w.severity == Severity::Critical { "!" } else { "-" };
            let _ = writeln!(out, "    {marker} {w}");
        }
        if warnings.iter().any(|w| w.severity == Severity::Critical) {
            let _ = writeln!(out, "\n  Document needs manual review.");
        }
    }

    out
}
