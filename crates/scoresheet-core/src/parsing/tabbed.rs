//! Line-oriented parser for tab-separated scoresheets.
//!
//! Each act occupies a block of lines ending at a line that starts with a tab
//! and `Category`. The text before the first tab on each line, concatenated,
//! is the act header (`<rank>: <name> (<annotations>)`); the text after the
//! first tab is one song's fields:
//!
//! ```text
//! 1: Cambridge Blues      Dear Old Girl   235     211     218
//!                         I Got Rhythm    211     206     210     1291    71.7
//!                         Previous (balanced):    440.0   440.0   411.0   2582.0
//! ```

use crate::config::ParseOptions;
use crate::diagnostics::{Diagnostics, Warning, WarningKind};
use crate::error::ScoresheetError;
use crate::model::{ActRecord, CategoryScores, SongRecord};
use crate::parsing::members::BracketContent;
use crate::parsing::values::{clean_text, parse_score};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

static ACT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(\d+:.*?)\n\tCategory").unwrap());

// Assumes act names contain no brackets.
static RANK_AND_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+): ([^\(]+)").unwrap());

static BRACKETED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((.+?)\)").unwrap());

static PENALTY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\(- (\d+)\)").unwrap());

/// Parse every act block in a sheet. Blocks that fail are skipped with a warning.
pub fn extract_sheet_acts(
    text: &str,
    options: &ParseOptions,
    diagnostics: &mut Diagnostics,
) -> Vec<ActRecord> {
    let mut acts = Vec::new();
    for caps in ACT_BLOCK.captures_iter(text) {
        let block = &caps[1];
        match parse_act_block(block, options, diagnostics) {
            Ok(act) => acts.push(act),
            Err(e) => diagnostics.push(Warning::new(
                WarningKind::MalformedAct,
                format!("skipped act block: {e}"),
            )),
        }
    }
    tracing::debug!(acts = acts.len(), "extracted sheet acts");
    acts
}

/// Parse one act's block of lines.
pub fn parse_act_block(
    block: &str,
    options: &ParseOptions,
    diagnostics: &mut Diagnostics,
) -> Result<ActRecord, ScoresheetError> {
    let header: String = block
        .lines()
        .map(|line| line.split_once('\t').map_or(line, |(head, _)| head))
        .collect();

    // 1: Hallmark Of Harmony (81)
    // 1: The Great Western Chorus Of Bristol  (Linda Corcoran) (52)
    // 1: RECKLESS  (Andy Foster, Duncan Whinyates, Dale Kynaston, Andy Funnell)
    let caps = RANK_AND_NAME.captures(&header).ok_or_else(|| {
        ScoresheetError::ParseError(format!("no '<rank>: <name>' in act header '{header}'"))
    })?;
    let rank = caps[1]
        .parse::<u32>()
        .map_err(|e| ScoresheetError::ParseError(format!("invalid rank '{}': {e}", &caps[1])))?;
    let mut act = ActRecord::new(rank, clean_text(caps[2].trim()));

    for bracket in BRACKETED.captures_iter(&header) {
        match BracketContent::classify(&bracket[1]) {
            BracketContent::Size(size) => act.size = Some(size),
            content => act.members = content.into_members(),
        }
    }

    for line in block.lines() {
        let Some((_, fields)) = line.split_once('\t') else {
            continue;
        };
        if fields.is_empty() {
            continue;
        }
        match parse_song_fields(fields, options) {
            Ok((song, warning)) => {
                if let Some(w) = warning {
                    diagnostics.push(w.for_act(&act.name));
                }
                act.songs.push(song);
            }
            Err(e) => diagnostics.push(
                Warning::new(WarningKind::MalformedSong, format!("skipped song: {e}"))
                    .for_act(&act.name),
            ),
        }
    }

    Ok(act)
}

/// Parse one song's tab-separated fields.
///
/// Handles rows like:
/// - `Dear Old Girl	235	211	218`
/// - `I Got Rhythm	211	206	210	1291	71.7`
/// - `My Wife The Dancer	175	167	(- 13)	164	1015	56.4`
/// - `235	211	218` (no title)
///
/// Trailing totals and percentages are ignored; scoring recomputes them.
pub fn parse_song_fields(
    fields: &str,
    options: &ParseOptions,
) -> Result<(SongRecord, Option<Warning>), ScoresheetError> {
    let mut tokens = fields.split('\t').peekable();

    let mut warning = None;
    let title = match tokens.peek() {
        Some(first) if !first.is_empty() && first.chars().all(|c| c.is_ascii_digit()) => {
            warning = Some(Warning::new(
                WarningKind::MissingSongTitle,
                format!("no song title; using '{}'", options.unknown_title),
            ));
            options.unknown_title.clone()
        }
        _ => tokens.next().unwrap_or_default().trim().to_string(),
    };
    let title = if title.is_empty() {
        warning.get_or_insert_with(|| {
            Warning::new(
                WarningKind::MissingSongTitle,
                format!("empty song title; using '{}'", options.unknown_title),
            )
        });
        options.unknown_title.clone()
    } else {
        title
    };

    let music = take_score(&mut tokens, &title, "music")?;
    let music_penalty = take_penalty(&mut tokens)?;
    let performance = take_score(&mut tokens, &title, "performance")?;
    let performance_penalty = take_penalty(&mut tokens)?;
    let singing = take_score(&mut tokens, &title, "singing")?;

    let mut song = SongRecord::new(title, CategoryScores::new(music, performance, singing));
    song.music_penalty = music_penalty;
    song.performance_penalty = performance_penalty;
    Ok((song, warning))
}

fn take_score<'a, I>(
    tokens: &mut std::iter::Peekable<I>,
    title: &str,
    label: &str,
) -> Result<Decimal, ScoresheetError>
where
    I: Iterator<Item = &'a str>,
{
    let token = tokens
        .next()
        .ok_or_else(|| ScoresheetError::ParseError(format!("'{title}': missing {label} score")))?;
    parse_score(token)
}

fn take_penalty<'a, I>(
    tokens: &mut std::iter::Peekable<I>,
) -> Result<Option<Decimal>, ScoresheetError>
where
    I: Iterator<Item = &'a str>,
{
    let Some(points) = tokens
        .peek()
        .and_then(|t| PENALTY.captures(t))
        .map(|c| c[1].to_string())
    else {
        return Ok(None);
    };
    tokens.next();
    Ok(Some(-parse_score(&points)?))
}
