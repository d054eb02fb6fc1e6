use crate::error::ScoresheetError;
use crate::model::{Category, PanelEntry};
use crate::parsing::values::normalize_text;
use regex::Regex;
use std::sync::LazyLock;

/// Four labelled blocks, each a comma-separated name list that may wrap lines.
static RESULT_PANEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)Music:(?: Rolling Panel:-)?(?P<m>.*?)\n?",
        r"(?:Performance|Presentation):(?: Rolling Panel:-)?(?P<p>.*?)\n?",
        r"Singing:(?: Rolling Panel:-)?(?P<s>.*?)\n?",
        r"(?:Admin|CA|CoJ):(?: Rolling Panel:-)?(?P<a>.*?)(?:\n|Signed)",
    ))
    .unwrap()
});

static SHEET_PANEL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(Music|Performance|Singing|CA): (.+)").unwrap());

static SHEET_NAME_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r", *").unwrap());

const PANEL_FIELDS: [(&str, Category); 4] = [
    ("m", Category::Music),
    ("p", Category::Performance),
    ("s", Category::Singing),
    ("a", Category::Administration),
];

/// Extract the judging panel of a result document.
pub fn extract_panel(text: &str) -> Result<Vec<PanelEntry>, ScoresheetError> {
    let caps = RESULT_PANEL
        .captures(text)
        .ok_or(ScoresheetError::PanelNotFound)?;

    let mut panel = Vec::new();
    for (field, category) in PANEL_FIELDS {
        let Some(list) = caps.name(field) else {
            continue;
        };
        for name in list.as_str().split(',') {
            if let Some(name) = normalize_text(Some(name)).filter(|n| !n.is_empty()) {
                panel.push(PanelEntry { category, name });
            }
        }
    }

    tracing::debug!(judges = panel.len(), "extracted result panel");
    Ok(panel)
}

/// Extract the judging panel of a line-oriented scoresheet (one line per category).
pub fn extract_sheet_panel(text: &str) -> Result<Vec<PanelEntry>, ScoresheetError> {
    let mut panel = Vec::new();
    for caps in SHEET_PANEL_LINE.captures_iter(text) {
        let category = match &caps[1] {
            "Music" => Category::Music,
            "Performance" => Category::Performance,
            "Singing" => Category::Singing,
            _ => Category::Administration,
        };
        let list = caps[2].trim_start_matches("Rolling Panel:-");
        for name in SHEET_NAME_SEPARATOR.split(list) {
            let name = name.trim();
            if !name.is_empty() {
                panel.push(PanelEntry {
                    category,
                    name: name.to_string(),
                });
            }
        }
    }

    if !panel.iter().any(|j| j.category.is_scored()) {
        return Err(ScoresheetError::PanelNotFound);
    }
    Ok(panel)
}
