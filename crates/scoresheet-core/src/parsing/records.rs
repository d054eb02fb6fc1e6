use crate::config::ParseOptions;
use crate::diagnostics::{Diagnostics, Warning, WarningKind};
use crate::model::{ActRecord, CategoryScores, MemberRecord, SongRecord};
use crate::parsing::layout::Layout;
use crate::parsing::members::{director_members, BracketContent};
use crate::parsing::patterns::{
    pattern_for, MemberFields, SongSlot, CATEGORY_RANKS_LABEL, CATEGORY_RANK_FIELDS, NAME_FIELD,
    PERCENTAGE_FIELD, RANK_FIELD, TOTAL_FIELD,
};
use crate::parsing::values::{normalize, normalize_text};
use regex::Captures;
use std::ops::Range;

/// Find every act record in a result document, in source order.
///
/// Derived scores are left at zero for the score calculator to fill in. Every
/// category-rankings label not covered by a record match is reported as a
/// malformed act, so an act the pattern cannot read is never dropped silently.
pub fn extract_acts(
    text: &str,
    layout: Layout,
    options: &ParseOptions,
    diagnostics: &mut Diagnostics,
) -> Vec<ActRecord> {
    let pattern = pattern_for(layout);
    let mut acts = Vec::new();
    let mut matched: Vec<Range<usize>> = Vec::new();

    for caps in pattern.regex.captures_iter(text) {
        if let Some(whole) = caps.get(0) {
            matched.push(whole.range());
        }
        let value = |name: &str| normalize(caps.name(name).map(|m| m.as_str()));

        let name = normalize_text(caps.name(NAME_FIELD).map(|m| m.as_str())).unwrap_or_default();
        let Some(rank) = value(RANK_FIELD).and_then(|v| v.as_u32()) else {
            diagnostics.push(
                Warning::new(
                    WarningKind::MalformedAct,
                    format!("skipped act with unreadable rank '{}'", &caps[RANK_FIELD]),
                )
                .for_act(&name),
            );
            continue;
        };
        let mut act = ActRecord::new(rank, name);

        act.transcribed_total = value(TOTAL_FIELD).and_then(|v| v.as_decimal());
        act.transcribed_percentage = value(PERCENTAGE_FIELD).and_then(|v| v.as_decimal());
        let [music_rank, performance_rank, singing_rank] =
            CATEGORY_RANK_FIELDS.map(|f| value(f).and_then(|v| v.as_u32()));
        act.music_rank = music_rank;
        act.performance_rank = performance_rank;
        act.singing_rank = singing_rank;
        act.size = pattern.size.and_then(value).and_then(|v| v.as_u32());

        for slot in pattern.songs {
            match song_from_slot(&caps, slot, options) {
                Some((song, warning)) => {
                    if let Some(w) = warning {
                        diagnostics.push(w.for_act(&act.name));
                    }
                    act.songs.push(song);
                }
                None => diagnostics.push(
                    Warning::new(
                        WarningKind::MalformedSong,
                        format!("song '{}' has a non-numeric score", slot.title),
                    )
                    .for_act(&act.name),
                ),
            }
        }

        act.members = members_from(&caps, pattern.members, &act.name, diagnostics);
        acts.push(act);
    }

    report_unmatched(text, layout, &matched, diagnostics);
    tracing::debug!(layout = %layout, acts = acts.len(), "extracted act records");
    acts
}

fn report_unmatched(
    text: &str,
    layout: Layout,
    matched: &[Range<usize>],
    diagnostics: &mut Diagnostics,
) {
    for label in CATEGORY_RANKS_LABEL.find_iter(text) {
        if matched.iter().any(|r| r.contains(&label.start())) {
            continue;
        }
        // The act's rank and name follow the label.
        let act_line = text[label.end()..]
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("");
        diagnostics.push(Warning::new(
            WarningKind::MalformedAct,
            format!("record '{act_line}' does not match the {layout} layout; act skipped"),
        ));
    }
}

fn song_from_slot(
    caps: &Captures<'_>,
    slot: &SongSlot,
    options: &ParseOptions,
) -> Option<(SongRecord, Option<Warning>)> {
    let score = |name: &str| {
        normalize(caps.name(name).map(|m| m.as_str())).and_then(|v| v.as_decimal())
    };
    let scores = CategoryScores::new(
        score(slot.music)?,
        score(slot.performance)?,
        score(slot.singing)?,
    );

    let (title, warning) = match normalize_text(caps.name(slot.title).map(|m| m.as_str())) {
        Some(t) if !t.is_empty() => (t, None),
        _ => (
            options.unknown_title.clone(),
            Some(Warning::new(
                WarningKind::MissingSongTitle,
                format!("no title for song '{}'", slot.title),
            )),
        ),
    };

    Some((SongRecord::new(title, scores), warning))
}

fn members_from(
    caps: &Captures<'_>,
    fields: MemberFields,
    act: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<MemberRecord> {
    match fields {
        MemberFields::Director(field) => caps
            .name(field)
            .map(|m| director_members(m.as_str()))
            .unwrap_or_default(),
        MemberFields::Lineup(field) => {
            let Some(lineup) = caps.name(field) else {
                return Vec::new();
            };
            match BracketContent::classify(lineup.as_str()) {
                content @ BracketContent::SingerList(_) => content.into_members(),
                _ => {
                    diagnostics.push(
                        Warning::new(
                            WarningKind::MissingField {
                                field: "members".into(),
                            },
                            format!("lineup '{}' does not name four singers", lineup.as_str()),
                        )
                        .for_act(act),
                    );
                    Vec::new()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use rust_decimal_macros::dec;

    fn extract(text: &str, layout: Layout) -> (Vec<ActRecord>, Vec<Warning>) {
        let mut diags = Diagnostics::new();
        let acts = extract_acts(text, layout, &ParseOptions::default(), &mut diags);
        (acts, diags.into_vec())
    }

    /// One chorus record with the given director annotation.
    fn chorus_record(rank: u32, annotation: &str) -> String {
        format!(
            "1200\nJava Jive\nSmile\n200\n200\n200\n200\n200\n200\n{rank}\n{rank}\n{rank}\n\
             Category rankings:\n{rank}: Phoenix Chorus {annotation} (32)\n66.7\n"
        )
    }

    const CHORUS_RECORDS: &str = "\
1363
Stars Fell On Alabama
Fly Me To The Moon
228
223
229
225
231
227
1
1
1
Category rankings:
1: Cottontown Chorus (Jo Braham) (47)
75.7
1200
Java Jive
Smile
200
200
200
200
200
200
2
2
2
Category rankings:
2: Phoenix Chorus (Ann Lee/Bob Ray) (32)
66.7
";

    #[test]
    fn test_chorus_records() {
        let (acts, warnings) = extract(CHORUS_RECORDS, Layout::Chorus);
        assert_eq!(acts.len(), 2);
        assert!(warnings.is_empty());

        let first = &acts[0];
        assert_eq!(first.rank, 1);
        assert_eq!(first.name, "Cottontown Chorus");
        assert_eq!(first.size, Some(47));
        assert_eq!(first.transcribed_total, Some(dec!(1363)));
        assert_eq!(first.transcribed_percentage, Some(dec!(75.7)));
        assert_eq!(first.music_rank, Some(1));
        assert_eq!(first.members.len(), 1);
        assert_eq!(first.members[0].role, Role::Director);
        assert_eq!(first.members[0].name, "Jo Braham");
        assert_eq!(first.songs[0].name, "Stars Fell On Alabama");
        assert_eq!(
            first.songs[0].scores,
            CategoryScores::new(dec!(228), dec!(229), dec!(231))
        );
        assert_eq!(
            first.songs[1].scores,
            CategoryScores::new(dec!(223), dec!(225), dec!(227))
        );

        let second = &acts[1];
        assert_eq!(second.name, "Phoenix Chorus");
        assert_eq!(second.members.len(), 2);
        assert_eq!(second.members[1].name, "Bob Ray");
    }

    #[test]
    fn test_quartet_with_wrapped_lineup() {
        let text = "\
696
Sweet Adeline
Lida Rose
120
110
121
111
122
112
1
1
1
Category rankings:
1: Hot Ticket (Sarah Hicks, Gill \nIrwin, Julie Robinson,  Monica \nFunnell)
64.8
";
        let mut diags = Diagnostics::new();
        let acts = extract_acts(text, Layout::Quartet, &ParseOptions::default(), &mut diags);
        assert_eq!(acts.len(), 1);
        let names: Vec<&str> = acts[0].members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Sarah Hicks", "Gill Irwin", "Julie Robinson", "Monica Funnell"]);
        assert_eq!(acts[0].members[3].role, Role::Bass);
    }

    #[test]
    fn test_quartet_without_lineup() {
        let text = "\
696
Sweet Adeline
Lida Rose
120
110
121
111
122
112
3
2
1
Category rankings:
4: Hot Ticket 64.8
";
        let mut diags = Diagnostics::new();
        let acts = extract_acts(text, Layout::Quartet, &ParseOptions::default(), &mut diags);
        assert_eq!(acts.len(), 1);
        assert!(acts[0].members.is_empty());
        assert_eq!(acts[0].rank, 4);
        assert_eq!(acts[0].singing_rank, Some(1));
    }

    #[test]
    fn test_quartet_final_previous_song() {
        let text = "\
1380
2758
Heart Of My Heart
Coney Island Baby
230
231
229
228
232
230
459.0
458.0
461.0
1
1
1
Category rankings:
1: Monkey Magic (A One, B Two, C Three, D Four)
76.6
";
        let text = text.replace("459.0\n", "Previous (balanced):\n459.0\n");
        let mut diags = Diagnostics::new();
        let acts = extract_acts(&text, Layout::QuartetFinal, &ParseOptions::default(), &mut diags);
        assert_eq!(acts.len(), 1);
        let act = &acts[0];
        assert_eq!(act.songs.len(), 3);
        assert_eq!(act.songs[2].name, "Previous");
        assert_eq!(
            act.songs[2].scores,
            CategoryScores::new(dec!(459), dec!(458), dec!(461))
        );
        assert_eq!(act.transcribed_total, Some(dec!(2758)));
        assert_eq!(act.members.len(), 4);
    }

    #[test]
    fn test_no_records() {
        let (acts, warnings) = extract("nothing here", Layout::Chorus);
        assert!(acts.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_comma_joined_directors() {
        let (acts, warnings) = extract(&chorus_record(1, "(Jo Braham, Ann Lee)"), Layout::Chorus);
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(acts.len(), 1);
        let names: Vec<&str> = acts[0].directors().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Jo Braham", "Ann Lee"]);
        assert_eq!(acts[0].size, Some(32));
    }

    #[test]
    fn test_director_with_title() {
        let text = chorus_record(1, "(Jo Braham, Ann Lee)") + &chorus_record(2, "(Dr. Bob Ray)");
        let (acts, warnings) = extract(&text, Layout::Chorus);
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(acts.len(), 2);
        assert_eq!(acts[1].members[0].name, "Dr. Bob Ray");
    }

    #[test]
    fn test_lineup_with_initials() {
        let text = "\
696
Sweet Adeline
Lida Rose
120
110
121
111
122
112
1
1
1
Category rankings:
1: Hot Ticket (J. Smith, Gill Irwin, A. B. Jones, Monica Funnell)
64.8
";
        let (acts, warnings) = extract(text, Layout::Quartet);
        assert!(warnings.is_empty(), "{warnings:?}");
        let names: Vec<&str> = acts[0].members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["J. Smith", "Gill Irwin", "A. B. Jones", "Monica Funnell"]);
    }

    #[test]
    fn test_short_lineup_leaves_members_empty() {
        let text = "\
696
Sweet Adeline
Lida Rose
120
110
121
111
122
112
1
1
1
Category rankings:
1: Trio Grande (Ann Lee, Bea Cole, Cat Day)
64.8
";
        let (acts, warnings) = extract(text, Layout::Quartet);
        assert_eq!(acts.len(), 1);
        assert!(acts[0].members.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].kind,
            WarningKind::MissingField {
                field: "members".into()
            }
        );
        assert_eq!(warnings[0].act.as_deref(), Some("Trio Grande"));
    }

    #[test]
    fn test_unreadable_record_is_reported() {
        // The second record lost its percentage line in conversion.
        let truncated = chorus_record(2, "(Ann Lee)").replace("66.7\n", "");
        let text = chorus_record(1, "(Jo Braham)") + &truncated;
        let (acts, warnings) = extract(&text, Layout::Chorus);
        assert_eq!(acts.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::MalformedAct);
        assert!(warnings[0].message.contains("2: Phoenix Chorus (Ann Lee) (32)"));
    }

    #[test]
    fn test_oversized_rank_skips_act() {
        let text = chorus_record(1, "(Jo Braham)").replace("1: Phoenix", "99999999999: Phoenix");
        let (acts, warnings) = extract(&text, Layout::Chorus);
        assert!(acts.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::MalformedAct);
        assert_eq!(warnings[0].act.as_deref(), Some("Phoenix Chorus"));
    }
}
