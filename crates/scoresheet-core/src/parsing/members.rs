use crate::model::{MemberRecord, Role};
use crate::parsing::values::clean_text;
use regex::Regex;
use std::sync::LazyLock;

static NAME_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?: and |&|,|;|/)\s*").unwrap());

/// What a parenthesized annotation after an act name turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketContent {
    /// Chorus size, e.g. `(52)`.
    Size(u32),
    /// Exactly four names: a quartet lineup in tenor/lead/bari/bass order.
    SingerList([String; 4]),
    /// Any other number of names: one or more directors.
    DirectorList(Vec<String>),
}

impl BracketContent {
    pub fn classify(text: &str) -> BracketContent {
        let text = text.trim();
        if let Ok(size) = text.parse::<u32>() {
            return BracketContent::Size(size);
        }

        let names = split_names(text);
        match <[String; 4]>::try_from(names) {
            Ok(four) => BracketContent::SingerList(four),
            Err(other) => BracketContent::DirectorList(other),
        }
    }

    /// Members named by this annotation. A size names nobody.
    pub fn into_members(self) -> Vec<MemberRecord> {
        match self {
            BracketContent::Size(_) => Vec::new(),
            BracketContent::SingerList(names) => Role::QUARTET
                .into_iter()
                .zip(names)
                .map(|(role, name)| MemberRecord { role, name })
                .collect(),
            BracketContent::DirectorList(names) => directors(names),
        }
    }
}

/// Split a name list on comma, ampersand, "and", semicolon, or slash.
pub fn split_names(text: &str) -> Vec<String> {
    NAME_SEPARATOR
        .split(text)
        .map(|n| clean_text(n.trim()))
        .filter(|n| !n.is_empty())
        .collect()
}

/// A chorus director field, which may name joint directors.
pub fn director_members(text: &str) -> Vec<MemberRecord> {
    directors(split_names(text))
}

fn directors(names: Vec<String>) -> Vec<MemberRecord> {
    names
        .into_iter()
        .map(|name| MemberRecord {
            role: Role::Director,
            name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(members: &[MemberRecord]) -> Vec<Role> {
        members.iter().map(|m| m.role).collect()
    }

    #[test]
    fn test_integer_is_size() {
        assert_eq!(BracketContent::classify(" 52 "), BracketContent::Size(52));
        assert!(BracketContent::Size(52).into_members().is_empty());
    }

    #[test]
    fn test_comma_separated_quartet() {
        let members =
            BracketContent::classify("Andy Foster, Duncan Whinyates, Dale Kynaston, Andy Funnell")
                .into_members();
        assert_eq!(roles(&members), Role::QUARTET.to_vec());
        assert_eq!(members[0].name, "Andy Foster");
        assert_eq!(members[3].name, "Andy Funnell");
    }

    #[test]
    fn test_ampersand_quartet() {
        let content = BracketContent::classify("Ann & Bea & Cat & Dee");
        assert!(matches!(content, BracketContent::SingerList(_)));
    }

    #[test]
    fn test_and_quartet() {
        let members = BracketContent::classify("Ann, Bea, Cat and Dee").into_members();
        assert_eq!(roles(&members), Role::QUARTET.to_vec());
        assert_eq!(members[2].name, "Cat");
    }

    #[test]
    fn test_semicolon_quartet() {
        let content = BracketContent::classify("Ann; Bea; Cat; Dee");
        assert!(matches!(content, BracketContent::SingerList(_)));
    }

    #[test]
    fn test_slash_joint_directors() {
        let members = BracketContent::classify("Linda Corcoran/Ian Turner").into_members();
        assert_eq!(roles(&members), vec![Role::Director, Role::Director]);
        assert_eq!(members[1].name, "Ian Turner");
    }

    #[test]
    fn test_single_director() {
        let members = BracketContent::classify("Linda Corcoran").into_members();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].role, Role::Director);
    }

    #[test]
    fn test_three_names_are_directors() {
        let members = BracketContent::classify("A, B, C").into_members();
        assert_eq!(roles(&members), vec![Role::Director; 3]);
    }

    #[test]
    fn test_and_inside_word_not_split() {
        assert_eq!(split_names("Alexander Sandall"), vec!["Alexander Sandall"]);
    }

    #[test]
    fn test_chorus_director_field() {
        let members = director_members("Jo Braham and Sam Lee");
        assert_eq!(members.len(), 2);
        assert!(members.iter().all(|m| m.role == Role::Director));
    }
}
