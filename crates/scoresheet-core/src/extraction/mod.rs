pub mod pdftotext;

use crate::error::ScoresheetError;

/// Turns a source document into the plain text the parsers read.
pub trait TextConverter: Send + Sync {
    fn convert(&self, bytes: &[u8]) -> Result<String, ScoresheetError>;

    /// Name of this conversion backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// For input that is already converter text, e.g. a saved `pdftotext -raw` dump.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextConverter;

impl TextConverter for PlainTextConverter {
    fn convert(&self, bytes: &[u8]) -> Result<String, ScoresheetError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ScoresheetError::Conversion(format!("input is not UTF-8: {e}")))?;
        Ok(normalize_line_endings(text))
    }

    fn backend_name(&self) -> &str {
        "plain-text"
    }
}

/// The patterns expect `\n` line breaks; Windows-converted sheets carry `\r\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_normalizes_crlf() {
        let text = PlainTextConverter.convert(b"LINE 1\r\nLINE 2\r\n").unwrap();
        assert_eq!(text, "LINE 1\nLINE 2\n");
    }

    #[test]
    fn test_plain_text_rejects_invalid_utf8() {
        assert!(matches!(
            PlainTextConverter.convert(&[0xff, 0xfe, 0x00]),
            Err(ScoresheetError::Conversion(_))
        ));
    }
}
