use crate::error::ScoresheetError;
use crate::extraction::{normalize_line_endings, TextConverter};
use std::io::Write;
use std::process::Command;

/// Converter backed by pdftotext (from poppler-utils or xpdf).
///
/// Uses `pdftotext -raw`, which keeps text in content-stream order. The
/// result-document patterns rely on that order: a record's total comes first
/// and its name and percentage come last.
pub struct PdftotextConverter {
    program: String,
}

impl PdftotextConverter {
    pub fn new() -> Self {
        Self::with_program("pdftotext")
    }

    /// Use a specific pdftotext binary, e.g. an xpdf install outside `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check if the pdftotext binary can be run.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextConverter for PdftotextConverter {
    fn convert(&self, bytes: &[u8]) -> Result<String, ScoresheetError> {
        let mut tmpfile = tempfile::NamedTempFile::new()
            .map_err(|e| ScoresheetError::Conversion(e.to_string()))?;
        tmpfile
            .write_all(bytes)
            .map_err(|e| ScoresheetError::Conversion(e.to_string()))?;

        tracing::debug!(program = %self.program, bytes = bytes.len(), "running pdftotext -raw");
        let output = Command::new(&self.program)
            .arg("-raw")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ScoresheetError::PdftotextNotFound
                } else {
                    ScoresheetError::Conversion(format!("pdftotext failed: {e}"))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ScoresheetError::PdftotextFailed { code, stderr });
        }

        Ok(normalize_line_endings(&String::from_utf8_lossy(&output.stdout)))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_reported() {
        let converter = PdftotextConverter::with_program("pdftotext-does-not-exist");
        assert!(!converter.is_available());
        assert!(matches!(
            converter.convert(b"%PDF-1.4"),
            Err(ScoresheetError::PdftotextNotFound)
        ));
    }
}
