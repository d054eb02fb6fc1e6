use crate::error::ScoresheetError;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

static LINE_BREAK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\n\s*").unwrap());

static BROKEN_HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)\s*-\s*(\w)").unwrap());

/// A captured text fragment canonicalized into a typed scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Decimal(Decimal),
    Text(String),
}

impl Value {
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Integer(i) => Some(Decimal::from(*i)),
            Value::Decimal(d) => Some(*d),
            Value::Text(_) => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::Integer(i) => u32::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Render the value as text. Names that happen to be numeric ("1984") stay usable.
    pub fn into_text(self) -> String {
        match self {
            Value::Integer(i) => i.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::Text(s) => s,
        }
    }
}

/// Normalize an optional capture.
///
/// - `None` -> `None`
/// - `"1384"` -> `Integer(1384)`
/// - `"459.0"` -> `Decimal(459.0)`
/// - `"Sarah \nHicks"` -> `Text("Sarah Hicks")`
/// - `"Smith-\nJones"` -> `Text("Smith-Jones")`
pub fn normalize(capture: Option<&str>) -> Option<Value> {
    let text = capture?.trim();

    if let Ok(i) = text.parse::<i64>() {
        return Some(Value::Integer(i));
    }
    if let Ok(d) = Decimal::from_str(text) {
        return Some(Value::Decimal(d));
    }

    Some(Value::Text(clean_text(text)))
}

/// Collapse wrapped lines into single spaces and rejoin hyphen-broken words.
pub fn clean_text(text: &str) -> String {
    let joined = LINE_BREAK_RUN.replace_all(text, " ");
    BROKEN_HYPHEN.replace_all(&joined, "${1}-${2}").into_owned()
}

/// Normalize a capture that must be text (names, titles).
pub fn normalize_text(capture: Option<&str>) -> Option<String> {
    normalize(capture).map(Value::into_text)
}

/// Parse a score cell, accepting both `235` and `440.0`.
pub fn parse_score(s: &str) -> Result<Decimal, ScoresheetError> {
    let s = s.trim();
    Decimal::from_str(s)
        .map_err(|e| ScoresheetError::ParseError(format!("invalid score '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_absent_capture() {
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn test_integer() {
        assert_eq!(normalize(Some(" 1384\n")), Some(Value::Integer(1384)));
    }

    #[test]
    fn test_decimal() {
        assert_eq!(normalize(Some("459.0")), Some(Value::Decimal(dec!(459.0))));
    }

    #[test]
    fn test_wrapped_name_collapsed() {
        assert_eq!(
            normalize(Some("Sarah Hicks, Gill \nIrwin")),
            Some(Value::Text("Sarah Hicks, Gill Irwin".into()))
        );
    }

    #[test]
    fn test_hyphen_broken_name_rejoined() {
        assert_eq!(
            normalize(Some("Anne Smith-\nJones")),
            Some(Value::Text("Anne Smith-Jones".into()))
        );
        assert_eq!(clean_text("Smith - Jones"), "Smith-Jones");
    }

    #[test]
    fn test_spaces_without_line_break_kept() {
        assert_eq!(clean_text("Monica  Funnell"), "Monica  Funnell");
    }

    #[test]
    fn test_numeric_name_as_text() {
        assert_eq!(normalize_text(Some("1984")).as_deref(), Some("1984"));
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("235").unwrap(), dec!(235));
        assert_eq!(parse_score("440.0").unwrap(), dec!(440.0));
        assert!(parse_score("(- 13)").is_err());
    }
}
