pub mod header;
pub mod layout;
pub mod members;
pub mod panel;
pub mod patterns;
pub mod records;
pub mod tabbed;
pub mod values;

use crate::assemble::assemble;
use crate::config::ParseOptions;
use crate::diagnostics::{Diagnostics, Severity, Warning, WarningKind};
use crate::error::ScoresheetError;
use crate::model::{ActRecord, CompetitionType, DocumentRecord};
use crate::scoring::calculate_scores;
use header::{competition_type_from_text, extract_header, extract_sheet_header};
use layout::{detect_layout, Layout};
use panel::{extract_panel, extract_sheet_panel};
use records::extract_acts;
use serde::Serialize;
use tabbed::extract_sheet_acts;

/// A fully scored document plus everything noticed while producing it.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedDocument {
    pub record: DocumentRecord,
    /// Detected layout; `None` for line-oriented sheets.
    pub layout: Option<Layout>,
    pub warnings: Vec<Warning>,
}

impl ParsedDocument {
    /// True when a warning means neither the printed nor the computed values can be trusted.
    pub fn needs_review(&self) -> bool {
        self.warnings.iter().any(|w| w.severity == Severity::Critical)
    }
}

/// Parse converter text of an official result document.
///
/// The layout is detected first and selects the record pattern. Header and
/// panel must match or the document is rejected; everything after that only
/// produces warnings.
pub fn parse_results_text(
    text: &str,
    url: Option<&str>,
    options: &ParseOptions,
) -> Result<ParsedDocument, ScoresheetError> {
    let layout = detect_layout(text);
    tracing::debug!(%layout, "detected layout");

    let header = extract_header(text)?;
    let judges = extract_panel(text)?;

    let mut diagnostics = Diagnostics::new();
    let acts = extract_acts(text, layout, options, &mut diagnostics);

    let competition_type = competition_type_from_text(text).unwrap_or_else(|| {
        let fallback = layout.competition_type();
        diagnostics.push(Warning::new(
            WarningKind::UnresolvedContestType,
            format!("no chorus or quartet keyword; assuming {fallback} from the {layout} layout"),
        ));
        fallback
    });

    let mut record = assemble(header, judges, acts, competition_type, text, url)?;
    diagnostics.extend(calculate_scores(&mut record, options));

    Ok(ParsedDocument {
        record,
        layout: Some(layout),
        warnings: diagnostics.into_vec(),
    })
}

/// Parse a line-oriented (tab-separated) scoresheet.
pub fn parse_tabbed_sheet(
    text: &str,
    options: &ParseOptions,
) -> Result<ParsedDocument, ScoresheetError> {
    let mut diagnostics = Diagnostics::new();
    let header = extract_sheet_header(text, options, &mut diagnostics)?;
    let judges = extract_sheet_panel(text)?;
    let acts = extract_sheet_acts(text, options, &mut diagnostics);

    let competition_type = competition_type_from_text(&header.contest).unwrap_or_else(|| {
        let fallback = competition_type_from_acts(&acts);
        diagnostics.push(Warning::new(
            WarningKind::UnresolvedContestType,
            format!("contest '{}' names no type; assuming {fallback}", header.contest),
        ));
        fallback
    });

    let mut record = assemble(header, judges, acts, competition_type, text, None)?;
    diagnostics.extend(calculate_scores(&mut record, options));

    Ok(ParsedDocument {
        record,
        layout: None,
        warnings: diagnostics.into_vec(),
    })
}

/// Choruses print a size or a director; quartets print neither.
fn competition_type_from_acts(acts: &[ActRecord]) -> CompetitionType {
    if acts.iter().any(|a| a.size.is_some() || a.directors().next().is_some()) {
        CompetitionType::Chorus
    } else {
        CompetitionType::Quartet
    }
}

/// Outcome of one document in a batch.
#[derive(Debug)]
pub struct BatchItem {
    /// Caller-supplied name of the input, usually a file name.
    pub source: String,
    pub result: Result<ParsedDocument, ScoresheetError>,
}

/// Parse many line-oriented sheets. A failing sheet does not stop the batch.
pub fn parse_tabbed_batch<I, S, T>(inputs: I, options: &ParseOptions) -> Vec<BatchItem>
where
    I: IntoIterator<Item = (S, T)>,
    S: Into<String>,
    T: AsRef<str>,
{
    inputs
        .into_iter()
        .map(|(source, text)| {
            let source = source.into();
            let result = parse_tabbed_sheet(text.as_ref(), options);
            match &result {
                Ok(doc) => tracing::debug!(
                    %source,
                    acts = doc.record.acts.len(),
                    warnings = doc.warnings.len(),
                    "parsed sheet"
                ),
                Err(e) => tracing::warn!(%source, error = %e, "failed to parse sheet"),
            }
            BatchItem { source, result }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MemberRecord, Role};

    #[test]
    fn test_type_from_acts() {
        let mut chorus = ActRecord::new(1, "Cottontown");
        chorus.members.push(MemberRecord {
            role: Role::Director,
            name: "Jo Braham".into(),
        });
        assert_eq!(competition_type_from_acts(&[chorus]), CompetitionType::Chorus);

        let quartet = ActRecord::new(1, "Monkey Magic");
        assert_eq!(competition_type_from_acts(&[quartet]), CompetitionType::Quartet);
    }

    #[test]
    fn test_batch_isolates_failures() {
        let items = parse_tabbed_batch(
            vec![("empty.txt", ""), ("junk.txt", "not a scoresheet\n\n\n")],
            &ParseOptions::default(),
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].source, "empty.txt");
        assert!(matches!(items[0].result, Err(ScoresheetError::HeaderNotFound)));
        assert!(items[1].result.is_err());
    }
}
