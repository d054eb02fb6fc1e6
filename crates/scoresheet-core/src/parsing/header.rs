use crate::config::ParseOptions;
use crate::diagnostics::{Diagnostics, Warning, WarningKind};
use crate::error::ScoresheetError;
use crate::model::CompetitionType;
use crate::parsing::layout::CHORUS_MARKER;
use regex::Regex;
use std::sync::LazyLock;

/// Placeholder used when a line-oriented sheet carries no contest date.
pub const PLACEHOLDER_DATE: &str = "01/01/1900";

/// Association, then the contest line, then (anywhere below) the date.
/// The interstitial line and the `dd Mon yyyy` date only appear in 2009 documents.
static RESULT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<assoc>.*)\n",
        r"(?:OFFICIAL CONTEST RESULT\n)?",
        r"(?P<contest>.*?)(?:\((?P<stream>[INYS]).*\))? - (?P<location>.*): (?P<year>.*)\n",
        r"[\w\W]+(?P<date>\d{2}/\d{2}/20\d{2}|\d{2} \w{3} 20\d{2})",
    ))
    .unwrap()
});

static SHEET_TITLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<contest>.*)  -  (?P<location>.*): (?P<year>[\d/]*)").unwrap()
});

static SHEET_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Contest date: (\d{2}/\d{2}/\d{4})").unwrap());

static QUARTET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"QUARTET|NATIONAL GOLD MEDALLISTS").unwrap());

/// Document-level metadata, still as printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContestHeader {
    pub association: String,
    pub contest: String,
    pub stream: Option<String>,
    pub location: String,
    pub year: String,
    pub date: String,
}

/// Extract the header of a result document.
pub fn extract_header(text: &str) -> Result<ContestHeader, ScoresheetError> {
    let caps = RESULT_HEADER
        .captures(text)
        .ok_or(ScoresheetError::HeaderNotFound)?;
    let field = |name: &str| {
        caps.name(name)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    };

    Ok(ContestHeader {
        association: field("assoc"),
        contest: field("contest"),
        stream: caps.name("stream").map(|m| m.as_str().to_string()),
        location: field("location"),
        year: field("year"),
        date: field("date"),
    })
}

/// Extract the header of a line-oriented scoresheet.
///
/// Line 1 is the association and line 3 is `<contest>  -  <location>: <year>`.
/// Empty fields and a missing date fall back to placeholders with a warning.
pub fn extract_sheet_header(
    text: &str,
    options: &ParseOptions,
    diagnostics: &mut Diagnostics,
) -> Result<ContestHeader, ScoresheetError> {
    let lines: Vec<&str> = text.lines().collect();
    let association = lines
        .first()
        .map(|l| l.trim().to_string())
        .ok_or(ScoresheetError::HeaderNotFound)?;
    let caps = lines
        .get(2)
        .and_then(|l| SHEET_TITLE_LINE.captures(l))
        .ok_or(ScoresheetError::HeaderNotFound)?;

    let mut field = |name: &str| {
        let value = caps.name(name).map(|m| m.as_str().trim()).unwrap_or("");
        if value.is_empty() {
            diagnostics.push(Warning::new(
                WarningKind::MissingField {
                    field: name.to_string(),
                },
                format!("no {name}; using '{}'", options.unknown_text),
            ));
            options.unknown_text.clone()
        } else {
            value.to_string()
        }
    };
    let contest = field("contest");
    let location = field("location");
    let year = field("year");

    let date = match SHEET_DATE.captures(text) {
        Some(c) => c[1].to_string(),
        None => {
            diagnostics.push(Warning::new(
                WarningKind::MissingField {
                    field: "date".into(),
                },
                format!("no contest date; using {PLACEHOLDER_DATE}"),
            ));
            PLACEHOLDER_DATE.to_string()
        }
    };

    Ok(ContestHeader {
        association,
        contest,
        stream: None,
        location,
        year,
        date,
    })
}

/// Chorus or quartet, from the keywords a document prints.
pub fn competition_type_from_text(text: &str) -> Option<CompetitionType> {
    if text.contains(CHORUS_MARKER) {
        Some(CompetitionType::Chorus)
    } else if QUARTET_MARKER.is_match(text) {
        Some(CompetitionType::Quartet)
    } else {
        None
    }
}
