pub mod rank;
pub mod rounding;

use crate::config::ParseOptions;
use crate::diagnostics::{Warning, WarningKind};
use crate::model::{
    ActRecord, Category, CategoryPercentages, CategoryScores, DocumentRecord, PanelEntry,
};
use rounding::{round_percentage, RoundingMode};
use rust_decimal::Decimal;

/// Title fragment marking a repeat-round song, which counts as two performances.
pub const REPEAT_SONG_MARKER: &str = "Previous";

/// Effective number of judges scoring each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JudgeCounts {
    pub music: Decimal,
    pub performance: Decimal,
    pub singing: Decimal,
}

impl JudgeCounts {
    /// Count the scoring judges on a panel. A rolling panel halves every count;
    /// the result may be fractional.
    pub fn from_panel(judges: &[PanelEntry], rolling_panel: bool) -> Self {
        let count = |category: Category| {
            let n = Decimal::from(judges.iter().filter(|j| j.category == category).count());
            if rolling_panel {
                n / Decimal::TWO
            } else {
                n
            }
        };
        Self {
            music: count(Category::Music),
            performance: count(Category::Performance),
            singing: count(Category::Singing),
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

/// Weight of a song in percentage averages.
pub fn song_weight(title: &str) -> u32 {
    if title.contains(REPEAT_SONG_MARKER) {
        2
    } else {
        1
    }
}

/// `score / judges / weight`, rounded; 0 when either divisor is zero.
fn percentage(score: Decimal, judges: Decimal, weight: u32, mode: RoundingMode) -> Decimal {
    let value = score
        .checked_div(judges)
        .and_then(|v| v.checked_div(Decimal::from(weight)))
        .unwrap_or(Decimal::ZERO);
    round_percentage(value, mode)
}

fn category_percentages(
    scores: &CategoryScores,
    counts: &JudgeCounts,
    weight: u32,
    mode: RoundingMode,
) -> CategoryPercentages {
    let mut pcs = CategoryPercentages::default();
    for category in Category::SCORED {
        pcs.set(
            category,
            percentage(scores.get(category), counts.get(category), weight, mode),
        );
    }
    pcs
}

/// Fill in every derived score of a document from its raw song scores and panel.
///
/// Songs totalling zero are dropped. Returns warnings for dropped songs, panel
/// anomalies, and acts whose printed totals disagree with the recomputed ones.
pub fn calculate_scores(doc: &mut DocumentRecord, options: &ParseOptions) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let rolling_panel = options.rolling_panel.resolve(&doc.raw_text);
    let counts = JudgeCounts::from_panel(&doc.judges, rolling_panel);
    check_panel(doc, &counts, rolling_panel, &mut warnings);

    tracing::debug!(
        rolling_panel,
        music = %counts.music,
        performance = %counts.performance,
        singing = %counts.singing,
        "judge counts"
    );

    for act in &mut doc.acts {
        score_act(act, &counts, options.rounding, &mut warnings);
        check_transcribed(act, &mut warnings);
    }
    warnings
}

fn score_act(
    act: &mut ActRecord,
    counts: &JudgeCounts,
    mode: RoundingMode,
    warnings: &mut Vec<Warning>,
) {
    act.songs.retain(|song| {
        if song.scores.total().is_zero() {
            warnings.push(
                Warning::new(
                    WarningKind::ZeroTotalSong,
                    format!("dropped song '{}' with a zero total", song.name),
                )
                .for_act(&act.name),
            );
            false
        } else {
            true
        }
    });

    let mut totals = CategoryScores::default();
    for song in &mut act.songs {
        song.weight = song_weight(&song.name);
        song.total_score = song.scores.total();
        song.percentage = percentage(song.total_score, counts.total(), song.weight, mode);
        song.percentages = category_percentages(&song.scores, counts, song.weight, mode);
        totals += song.scores;
    }

    act.weighted_songs = act.songs.iter().map(|s| s.weight).sum();
    act.totals = totals;
    act.percentages = category_percentages(&totals, counts, act.weighted_songs, mode);
    act.total_score = act.songs.iter().map(|s| s.total_score).sum();
    act.percentage = percentage(act.total_score, counts.total(), act.weighted_songs, mode);
}

fn check_panel(
    doc: &DocumentRecord,
    counts: &JudgeCounts,
    rolling_panel: bool,
    warnings: &mut Vec<Warning>,
) {
    for category in Category::SCORED {
        let n = counts.get(category);
        if n.is_zero() {
            warnings.push(Warning::new(
                WarningKind::MissingField {
                    field: format!("judges.{category}").to_lowercase(),
                },
                format!("no {category} judges on the panel; {category} percentages are 0"),
            ));
        } else if rolling_panel && !n.fract().is_zero() {
            warnings.push(Warning::new(
                WarningKind::FractionalRollingPanel,
                format!(
                    "rolling panel leaves {n} {category} judges; {} listed",
                    doc.judges_in(category).count()
                ),
            ));
        }
    }

    if counts.music != counts.performance || counts.performance != counts.singing {
        warnings.push(Warning::new(
            WarningKind::UnevenPanel,
            format!(
                "judge counts differ: music {}, performance {}, singing {}",
                counts.music, counts.performance, counts.singing
            ),
        ));
    }
}

fn check_transcribed(act: &ActRecord, warnings: &mut Vec<Warning>) {
    if let Some(printed) = act.transcribed_total {
        if printed != act.total_score {
            warnings.push(
                Warning::new(
                    WarningKind::TotalMismatch,
                    format!("printed total {printed} <> computed total {}", act.total_score),
                )
                .for_act(&act.name),
            );
        }
    }
    if let Some(printed) = act.transcribed_percentage {
        if printed != act.percentage {
            warnings.push(
                Warning::new(
                    WarningKind::PercentageMismatch,
                    format!("printed percentage {printed} <> computed {}", act.percentage),
                )
                .for_act(&act.name),
            );
        }
    }
}
