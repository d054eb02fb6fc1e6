use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Association {
    #[serde(rename = "BABS")]
    Babs,
    #[serde(rename = "LABBS")]
    Labbs,
}

impl Association {
    pub fn code(&self) -> &'static str {
        match self {
            Association::Babs => "BABS",
            Association::Labbs => "LABBS",
        }
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompetitionType {
    #[serde(rename = "c")]
    Chorus,
    #[serde(rename = "q")]
    Quartet,
}

impl fmt::Display for CompetitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompetitionType::Chorus => write!(f, "Chorus"),
            CompetitionType::Quartet => write!(f, "Quartet"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stream {
    #[serde(rename = "I")]
    International,
    #[serde(rename = "N")]
    National,
    #[serde(rename = "Y")]
    Youth,
    #[serde(rename = "S")]
    Senior,
}

impl Stream {
    /// Map the single-letter stream marker printed after a contest title.
    pub fn from_letter(s: &str) -> Option<Stream> {
        match s.trim() {
            "I" => Some(Stream::International),
            "N" => Some(Stream::National),
            "Y" => Some(Stream::Youth),
            "S" => Some(Stream::Senior),
            _ => None,
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::International => write!(f, "International"),
            Stream::National => write!(f, "National"),
            Stream::Youth => write!(f, "Youth"),
            Stream::Senior => write!(f, "Senior"),
        }
    }
}

/// Judging category. Administration sits on the panel but never scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "m")]
    Music,
    #[serde(rename = "p")]
    Performance,
    #[serde(rename = "s")]
    Singing,
    #[serde(rename = "a")]
    Administration,
}

impl Category {
    pub const SCORED: [Category; 3] = [Category::Music, Category::Performance, Category::Singing];

    pub fn is_scored(&self) -> bool {
        !matches!(self, Category::Administration)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Music => write!(f, "Music"),
            Category::Performance => write!(f, "Performance"),
            Category::Singing => write!(f, "Singing"),
            Category::Administration => write!(f, "Administration"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tenor,
    Lead,
    Bari,
    Bass,
    Director,
}

impl Role {
    /// Quartet parts in the order scoresheets list them.
    pub const QUARTET: [Role; 4] = [Role::Tenor, Role::Lead, Role::Bari, Role::Bass];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Tenor => write!(f, "tenor"),
            Role::Lead => write!(f, "lead"),
            Role::Bari => write!(f, "bari"),
            Role::Bass => write!(f, "bass"),
            Role::Director => write!(f, "director"),
        }
    }
}

/// Raw (or summed) score for each judged category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    #[serde(rename = "m")]
    pub music: Decimal,
    #[serde(rename = "p")]
    pub performance: Decimal,
    #[serde(rename = "s")]
    pub singing: Decimal,
}

impl CategoryScores {
    pub fn new(music: Decimal, performance: Decimal, singing: Decimal) -> Self {
        Self {
            music,
            performance,
            singing,
        }
    }

    pub fn get(&self, category: Category) -> Decimal {
        match category {
            Category::Music => self.music,
            Category::Performance => self.performance,
            Category::Singing => self.singing,
            Category::Administration => Decimal::ZERO,
        }
    }

    pub fn total(&self) -> Decimal {
        self.music + self.performance + self.singing
    }
}

impl std::ops::AddAssign for CategoryScores {
    fn add_assign(&mut self, rhs: Self) {
        self.music += rhs.music;
        self.performance += rhs.performance;
        self.singing += rhs.singing;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryPercentages {
    #[serde(rename = "m_pc")]
    pub music: Decimal,
    #[serde(rename = "p_pc")]
    pub performance: Decimal,
    #[serde(rename = "s_pc")]
    pub singing: Decimal,
}

impl CategoryPercentages {
    pub fn set(&mut self, category: Category, value: Decimal) {
        match category {
            Category::Music => self.music = value,
            Category::Performance => self.performance = value,
            Category::Singing => self.singing = value,
            Category::Administration => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelEntry {
    #[serde(rename = "cat")]
    pub category: Category,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    #[serde(rename = "part")]
    pub role: Role,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    pub name: String,
    #[serde(flatten)]
    pub scores: CategoryScores,
    #[serde(rename = "mr", default, skip_serializing_if = "Option::is_none")]
    pub music_penalty: Option<Decimal>,
    #[serde(rename = "pr", default, skip_serializing_if = "Option::is_none")]
    pub performance_penalty: Option<Decimal>,
    #[serde(rename = "tot_score", default)]
    pub total_score: Decimal,
    #[serde(rename = "pc_score", default)]
    pub percentage: Decimal,
    #[serde(flatten)]
    pub percentages: CategoryPercentages,
    /// 2 for a repeat-round "Previous" song, otherwise 1.
    #[serde(rename = "n", default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl SongRecord {
    /// A freshly extracted song; derived fields are filled in by scoring.
    pub fn new(name: impl Into<String>, scores: CategoryScores) -> Self {
        Self {
            name: name.into(),
            scores,
            music_penalty: None,
            performance_penalty: None,
            total_score: Decimal::ZERO,
            percentage: Decimal::ZERO,
            percentages: CategoryPercentages::default(),
            weight: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActRecord {
    pub rank: u32,
    pub name: String,
    /// Number of singers on stage (chorus only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(rename = "rank_m", default, skip_serializing_if = "Option::is_none")]
    pub music_rank: Option<u32>,
    #[serde(rename = "rank_p", default, skip_serializing_if = "Option::is_none")]
    pub performance_rank: Option<u32>,
    #[serde(rename = "rank_s", default, skip_serializing_if = "Option::is_none")]
    pub singing_rank: Option<u32>,
    #[serde(default)]
    pub members: Vec<MemberRecord>,
    #[serde(default)]
    pub songs: Vec<SongRecord>,
    #[serde(flatten)]
    pub totals: CategoryScores,
    #[serde(flatten)]
    pub percentages: CategoryPercentages,
    #[serde(rename = "tot_score", default)]
    pub total_score: Decimal,
    #[serde(rename = "pc_score", default)]
    pub percentage: Decimal,
    /// Sum of song weights; the denominator for act percentages.
    #[serde(rename = "n", default)]
    pub weighted_songs: u32,
    /// Act total as printed on the source document, if it prints one.
    #[serde(skip)]
    pub transcribed_total: Option<Decimal>,
    #[serde(skip)]
    pub transcribed_percentage: Option<Decimal>,
}

impl ActRecord {
    pub fn new(rank: u32, name: impl Into<String>) -> Self {
        Self {
            rank,
            name: name.into(),
            size: None,
            music_rank: None,
            performance_rank: None,
            singing_rank: None,
            members: Vec::new(),
            songs: Vec::new(),
            totals: CategoryScores::default(),
            percentages: CategoryPercentages::default(),
            total_score: Decimal::ZERO,
            percentage: Decimal::ZERO,
            weighted_songs: 0,
            transcribed_total: None,
            transcribed_percentage: None,
        }
    }

    pub fn directors(&self) -> impl Iterator<Item = &MemberRecord> {
        self.members.iter().filter(|m| m.role == Role::Director)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(rename = "assoc")]
    pub association: Association,
    pub contest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<Stream>,
    pub location: String,
    pub year: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub competition_type: CompetitionType,
    /// Full converter output, kept for downstream heuristics (rolling panel).
    #[serde(default)]
    pub raw_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub judges: Vec<PanelEntry>,
    #[serde(rename = "contestants")]
    pub acts: Vec<ActRecord>,
}

impl DocumentRecord {
    pub fn judges_in(&self, category: Category) -> impl Iterator<Item = &PanelEntry> {
        self.judges.iter().filter(move |j| j.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_song_serializes_with_importer_keys() {
        let mut song = SongRecord::new(
            "Dear Old Girl",
            CategoryScores::new(dec!(135), dec!(131), dec!(138)),
        );
        song.performance_penalty = Some(dec!(-13));
        let v = serde_json::to_value(&song).unwrap();
        let obj = v.as_object().unwrap();
        let keys = [
            "name", "m", "p", "s", "pr", "tot_score", "pc_score", "m_pc", "p_pc", "s_pc", "n",
        ];
        for key in keys {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert!(!obj.contains_key("mr"));
        assert_eq!(obj["m"], "135");
    }

    #[test]
    fn test_act_round_trips_through_json() {
        let mut act = ActRecord::new(2, "Cambridge Blues");
        act.members.push(MemberRecord {
            role: Role::Tenor,
            name: "Andy Foster".into(),
        });
        act.songs.push(SongRecord::new(
            "I Got Rhythm",
            CategoryScores::new(dec!(131), dec!(126), dec!(130)),
        ));
        act.total_score = dec!(387);
        let json = serde_json::to_string(&act).unwrap();
        let back: ActRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, act);
        assert!(json.contains("\"part\":\"tenor\""));
    }

    #[test]
    fn test_category_codes() {
        let entry = PanelEntry {
            category: Category::Administration,
            name: "Jim".into(),
        };
        assert_eq!(serde_json::to_string(&entry).unwrap(), r#"{"cat":"a","name":"Jim"}"#);
        assert!(!Category::Administration.is_scored());
    }

    #[test]
    fn test_stream_from_letter() {
        assert_eq!(Stream::from_letter("Y"), Some(Stream::Youth));
        assert_eq!(Stream::from_letter("X"), None);
    }
}
