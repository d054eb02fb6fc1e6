use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The document should be reviewed by hand before it is trusted.
    Critical,
    Important,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum WarningKind {
    MissingField { field: String },
    MissingSongTitle,
    MalformedAct,
    MalformedSong,
    ZeroTotalSong,
    TotalMismatch,
    PercentageMismatch,
    UnresolvedContestType,
    UnevenPanel,
    FractionalRollingPanel,
}

impl WarningKind {
    pub fn severity(&self) -> Severity {
        match self {
            WarningKind::TotalMismatch => Severity::Critical,
            WarningKind::MalformedAct
            | WarningKind::MalformedSong
            | WarningKind::ZeroTotalSong
            | WarningKind::UnevenPanel
            | WarningKind::FractionalRollingPanel
            | WarningKind::UnresolvedContestType => Severity::Important,
            WarningKind::MissingField { .. }
            | WarningKind::MissingSongTitle
            | WarningKind::PercentageMismatch => Severity::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub act: Option<String>,
    #[serde(flatten)]
    pub kind: WarningKind,
    pub message: String,
    pub severity: Severity,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        let severity = kind.severity();
        Self {
            act: None,
            kind,
            message: message.into(),
            severity,
        }
    }

    pub fn for_act(mut self, act: &str) -> Self {
        self.act = Some(act.to_string());
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.act {
            Some(act) => write!(f, "{act}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Collects warnings for one parse call and mirrors each to `tracing`.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        tracing::warn!(
            act = warning.act.as_deref().unwrap_or("-"),
            severity = ?warning.severity,
            "{}",
            warning.message
        );
        self.warnings.push(warning);
    }

    pub fn extend(&mut self, warnings: impl IntoIterator<Item = Warning>) {
        for w in warnings {
            self.push(w);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_mismatch_is_critical() {
        let w = Warning::new(WarningKind::TotalMismatch, "1384 <> 1383");
        assert_eq!(w.severity, Severity::Critical);
    }

    #[test]
    fn test_warning_display_includes_act() {
        let w = Warning::new(WarningKind::ZeroTotalSong, "dropped song 'x'").for_act("Cottontown");
        assert_eq!(w.to_string(), "Cottontown: dropped song 'x'");
    }

    #[test]
    fn test_warning_serializes_kind_tag() {
        let w = Warning::new(
            WarningKind::MissingField {
                field: "date".into(),
            },
            "no contest date",
        );
        let v = serde_json::to_value(&w).unwrap();
        assert_eq!(v["kind"], "missing_field");
        assert_eq!(v["field"], "date");
        assert_eq!(v["severity"], "info");
    }
}
