use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScoresheetError {
    #[error("text conversion failed: {0}")]
    Conversion(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("contest header not found (expected '<association>' then '<contest> - <location>: <year>')")]
    HeaderNotFound,

    #[error("judging panel not found (expected Music/Performance/Singing/Admin labels)")]
    PanelNotFound,

    #[error("failed to parse scoresheet: {0}")]
    ParseError(String),

    #[error("unknown association '{0}'")]
    UnknownAssociation(String),

    #[error("unrecognised contest date '{0}' (expected dd/mm/yyyy or dd Mon yyyy)")]
    InvalidDate(String),

    #[error("cannot merge contests: {0}")]
    MergeConflict(String),

    #[error("failed to load options from {}: {reason}", path.display())]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid options: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
