use crate::model::CompetitionType;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

pub const CHORUS_MARKER: &str = "CHORUS";

static REPEAT_ROUND_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Previous \([Bb]alanced\)").unwrap());

/// The known result-document layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    #[serde(rename = "c")]
    Chorus,
    /// Quartet final, carrying a balanced repeat of the previous round.
    #[serde(rename = "qf")]
    QuartetFinal,
    /// Quartet semi-final, prelims, or mixed.
    #[serde(rename = "q")]
    Quartet,
}

impl Layout {
    pub fn competition_type(&self) -> CompetitionType {
        match self {
            Layout::Chorus => CompetitionType::Chorus,
            Layout::QuartetFinal | Layout::Quartet => CompetitionType::Quartet,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Chorus => write!(f, "chorus"),
            Layout::QuartetFinal => write!(f, "quartet final"),
            Layout::Quartet => write!(f, "quartet"),
        }
    }
}

/// Classify a document. A chorus marker wins over a repeat-round marker.
pub fn detect_layout(text: &str) -> Layout {
    if text.contains(CHORUS_MARKER) {
        Layout::Chorus
    } else if REPEAT_ROUND_MARKER.is_match(text) {
        Layout::QuartetFinal
    } else {
        Layout::Quartet
    }
}
