use crate::config::ParseOptions;
use crate::diagnostics::Warning;
use crate::error::ScoresheetError;
use crate::model::{ActRecord, Association, CompetitionType, DocumentRecord, PanelEntry, Stream};
use crate::parsing::header::ContestHeader;
use crate::scoring::{calculate_scores, rank::rerank};
use chrono::NaiveDate;

/// Long association names as printed on scoresheets.
pub const ASSOCIATIONS: [(&str, Association); 2] = [
    ("THE BRITISH ASSOCIATION OF BARBERSHOP SINGERS", Association::Babs),
    ("LADIES ASSOCIATION OF BRITISH BARBERSHOP SINGERS", Association::Labbs),
];

/// Date formats tried in order: `25/10/2008`, then `07 Nov 2009`.
const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%d %b %Y"];

pub fn association_from_name(name: &str) -> Result<Association, ScoresheetError> {
    let name = name.trim();
    ASSOCIATIONS
        .iter()
        .find(|(long, _)| *long == name)
        .map(|(_, code)| *code)
        .ok_or_else(|| ScoresheetError::UnknownAssociation(name.to_string()))
}

pub fn parse_contest_date(text: &str) -> Result<NaiveDate, ScoresheetError> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .ok_or_else(|| ScoresheetError::InvalidDate(text.to_string()))
}

/// Build the canonical record from extracted parts. Scores are not yet computed.
pub fn assemble(
    header: ContestHeader,
    judges: Vec<PanelEntry>,
    acts: Vec<ActRecord>,
    competition_type: CompetitionType,
    raw_text: &str,
    url: Option<&str>,
) -> Result<DocumentRecord, ScoresheetError> {
    let association = association_from_name(&header.association)?;
    let date = parse_contest_date(&header.date)?;

    Ok(DocumentRecord {
        association,
        contest: header.contest,
        stream: header.stream.as_deref().and_then(Stream::from_letter),
        location: header.location,
        year: header.year,
        date,
        competition_type,
        raw_text: raw_text.to_string(),
        url: url.map(str::to_string),
        judges,
        acts,
    })
}

/// Fold the acts of `incoming` into `existing`, e.g. a second stream's results
/// for the same contest.
///
/// Both documents must share association, competition type and date. Each
/// document is scored against its own panel and rolling-panel marker before
/// the acts are combined, so the other document's judges never change an
/// act's percentages. The stored panel becomes the union of both (names
/// compared case-insensitively) and overall ranks are re-derived.
pub fn merge_documents(
    mut existing: DocumentRecord,
    mut incoming: DocumentRecord,
    options: &ParseOptions,
) -> Result<(DocumentRecord, Vec<Warning>), ScoresheetError> {
    if existing.association != incoming.association {
        return Err(ScoresheetError::MergeConflict(format!(
            "association {} <> {}",
            existing.association, incoming.association
        )));
    }
    if existing.competition_type != incoming.competition_type {
        return Err(ScoresheetError::MergeConflict(format!(
            "competition type {} <> {}",
            existing.competition_type, incoming.competition_type
        )));
    }
    if existing.date != incoming.date {
        return Err(ScoresheetError::MergeConflict(format!(
            "date {} <> {}",
            existing.date, incoming.date
        )));
    }

    let mut warnings = calculate_scores(&mut existing, options);
    warnings.extend(calculate_scores(&mut incoming, options));

    for judge in incoming.judges {
        let seen = existing
            .judges
            .iter()
            .any(|j| j.category == judge.category && j.name.eq_ignore_ascii_case(&judge.name));
        if !seen {
            existing.judges.push(judge);
        }
    }
    let added = incoming.acts.len();
    existing.acts.extend(incoming.acts);
    if existing.url.is_none() {
        existing.url = incoming.url;
    }

    rerank(&mut existing.acts);
    tracing::debug!(
        added,
        acts = existing.acts.len(),
        judges = existing.judges.len(),
        "merged documents"
    );
    Ok((existing, warnings))
}
