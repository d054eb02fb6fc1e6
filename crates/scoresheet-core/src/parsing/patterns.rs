//! Field templates for the result-document layouts.
//!
//! Each layout is an ordered concatenation of the fragments below. The
//! capture names used by a layout are listed in its [`LayoutPattern`], so the
//! record extractor never needs to know which fragments went into the regex.

use crate::parsing::layout::Layout;
use regex::Regex;
use std::sync::LazyLock;

// 1384\n or 1384.0\n
const TOTAL_SCORE: &str = r"(?P<tot_score>\d{3,4})(?:\.\d)?\s*";
const PREVIOUS_TOTAL_SCORE: &str = r"(?P<prev_tot_score>\d{3,4})(?:\.\d)?\s*";

// Stars Fell On Alabama\nFly Me To The Moon\n
const SONG_TITLES: &str = r"(?P<name1>[^\n]+)\s(?P<name2>[^\n]+)\s";

// 228\n223\n229\n225\n231\n227\n (music x2, performance x2, singing x2)
// pdftotext sometimes glues them, ranks included: 252250247\n244\n247243111\n
const CATEGORY_SCORES: &str = concat!(
    r"(?P<m1>\d{3})\s*(?P<m2>\d{3})\s*",
    r"(?P<p1>\d{3})\s*(?P<p2>\d{3})\s*",
    r"(?P<s1>\d{3})\s*(?P<s2>\d{3})\s*",
);

// Previous (balanced):\n459.0\n458.0\n461.0\n
const PREVIOUS_SCORES: &str = concat!(
    r"(?P<nameprev>Previous) \([Bb]alanced\):\s?",
    r"(?P<mprev>\d{3})\.\d\s*(?P<pprev>\d{3})\.\d\s*(?P<sprev>\d{3})\.\d\s*",
);

// 1\n1\n1\nCategory rankings:\n
const CATEGORY_RANKS: &str =
    r"(?P<rank_m>\d{1,2})\s*(?P<rank_p>\d{1,2})\s*(?P<rank_s>\d{1,2})\s*Category [Rr]ankings:\n";

// 1:
const RANK: &str = r"(?P<rank>\d+):\s*";

// Act names never contain an opening parenthesis.
const NAME: &str = r"(?P<name>[^\(]+?)\s*";

// (Sarah Hicks, Gill \nIrwin, Julie Robinson,  Monica \nFunnell)
// Some quartets don't give a lineup. Names are split later, so any
// separator (and initials like `J. Smith`) survive the match.
const LINEUP: &str = r"(?:\((?P<lineup>[^\)]+)\)\s*)?";

// (Jo Braham) or (Jo Braham, Ann Lee)
const DIRECTOR: &str = r"\((?P<director>[^\)]+?)\)\s*";

// (47)\n
const SIZE: &str = r"\((?P<size>\d{1,3})\)\s?";

// 82.3
const PERCENTAGE: &str = r"(?P<pc_score>\d\d\.\d)";

/// Capture names for one song within a record match.
#[derive(Debug, Clone, Copy)]
pub struct SongSlot {
    pub title: &'static str,
    pub music: &'static str,
    pub performance: &'static str,
    pub singing: &'static str,
}

const FIRST_SONG: SongSlot = SongSlot {
    title: "name1",
    music: "m1",
    performance: "p1",
    singing: "s1",
};

const SECOND_SONG: SongSlot = SongSlot {
    title: "name2",
    music: "m2",
    performance: "p2",
    singing: "s2",
};

const PREVIOUS_SONG: SongSlot = SongSlot {
    title: "nameprev",
    music: "mprev",
    performance: "pprev",
    singing: "sprev",
};

/// Where a layout keeps its member names.
#[derive(Debug, Clone, Copy)]
pub enum MemberFields {
    /// One parenthesized group naming the director(s).
    Director(&'static str),
    /// An optional parenthesized quartet lineup.
    Lineup(&'static str),
}

pub const TOTAL_FIELD: &str = "tot_score";
pub const RANK_FIELD: &str = "rank";
pub const NAME_FIELD: &str = "name";
pub const PERCENTAGE_FIELD: &str = "pc_score";
pub const CATEGORY_RANK_FIELDS: [&str; 3] = ["rank_m", "rank_p", "rank_s"];

/// Printed once per act in every result layout.
pub static CATEGORY_RANKS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Category [Rr]ankings:").unwrap());

pub struct LayoutPattern {
    pub layout: Layout,
    pub regex: Regex,
    pub songs: &'static [SongSlot],
    pub members: MemberFields,
    pub size: Option<&'static str>,
}

fn compose(fragments: &[&str]) -> Regex {
    Regex::new(&fragments.concat()).unwrap()
}

static CHORUS: LazyLock<LayoutPattern> = LazyLock::new(|| LayoutPattern {
    layout: Layout::Chorus,
    regex: compose(&[
        TOTAL_SCORE,
        SONG_TITLES,
        CATEGORY_SCORES,
        CATEGORY_RANKS,
        RANK,
        NAME,
        DIRECTOR,
        SIZE,
        PERCENTAGE,
    ]),
    songs: &[FIRST_SONG, SECOND_SONG],
    members: MemberFields::Director("director"),
    size: Some("size"),
});

static QUARTET_FINAL: LazyLock<LayoutPattern> = LazyLock::new(|| LayoutPattern {
    layout: Layout::QuartetFinal,
    regex: compose(&[
        PREVIOUS_TOTAL_SCORE,
        TOTAL_SCORE,
        SONG_TITLES,
        CATEGORY_SCORES,
        PREVIOUS_SCORES,
        CATEGORY_RANKS,
        RANK,
        NAME,
        LINEUP,
        PERCENTAGE,
    ]),
    songs: &[FIRST_SONG, SECOND_SONG, PREVIOUS_SONG],
    members: MemberFields::Lineup("lineup"),
    size: None,
});

static QUARTET: LazyLock<LayoutPattern> = LazyLock::new(|| LayoutPattern {
    layout: Layout::Quartet,
    regex: compose(&[
        TOTAL_SCORE,
        SONG_TITLES,
        CATEGORY_SCORES,
        CATEGORY_RANKS,
        RANK,
        NAME,
        LINEUP,
        PERCENTAGE,
    ]),
    songs: &[FIRST_SONG, SECOND_SONG],
    members: MemberFields::Lineup("lineup"),
    size: None,
});

pub fn pattern_for(layout: Layout) -> &'static LayoutPattern {
    match layout {
        Layout::Chorus => &CHORUS,
        Layout::QuartetFinal => &QUARTET_FINAL,
        Layout::Quartet => &QUARTET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_layout_compiles_with_its_fields() {
        for layout in [Layout::Chorus, Layout::QuartetFinal, Layout::Quartet] {
            let pattern = pattern_for(layout);
            let names: Vec<&str> = pattern.regex.capture_names().flatten().collect();
            for field in [TOTAL_FIELD, RANK_FIELD, NAME_FIELD, PERCENTAGE_FIELD] {
                assert!(names.contains(&field), "{layout}: missing {field}");
            }
            for slot in pattern.songs {
                for field in [slot.title, slot.music, slot.performance, slot.singing] {
                    assert!(names.contains(&field), "{layout}: missing {field}");
                }
            }
        }
    }

    #[test]
    fn test_glued_category_scores() {
        let re = Regex::new(CATEGORY_SCORES).unwrap();
        let caps = re.captures("252250247\n244\n247243111\n").unwrap();
        assert_eq!(&caps["m1"], "252");
        assert_eq!(&caps["p1"], "247");
        assert_eq!(&caps["p2"], "244");
        assert_eq!(&caps["s2"], "243");
    }

    #[test]
    fn test_lineup_optional() {
        let re = Regex::new(&[NAME, LINEUP, PERCENTAGE].concat()).unwrap();
        let caps = re.captures("Hot Ticket 71.2").unwrap();
        assert_eq!(&caps["name"], "Hot Ticket");
        assert!(caps.name("lineup").is_none());
    }

    #[test]
    fn test_lineup_keeps_initials() {
        let re = Regex::new(&[NAME, LINEUP, PERCENTAGE].concat()).unwrap();
        let caps = re.captures("Hot Ticket (J. Smith, A. Lee, B. Ray, C. Day)\n71.2").unwrap();
        assert_eq!(&caps["lineup"], "J. Smith, A. Lee, B. Ray, C. Day");
    }

    #[test]
    fn test_director_keeps_separators() {
        let re = Regex::new(&[NAME, DIRECTOR, SIZE].concat()).unwrap();
        let caps = re.captures("Cottontown Chorus (Jo Braham, Ann Lee) (47)").unwrap();
        assert_eq!(&caps["director"], "Jo Braham, Ann Lee");
        assert_eq!(&caps["size"], "47");
    }
}
