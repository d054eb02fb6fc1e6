use crate::model::ActRecord;
use rust_decimal::Decimal;

/// Re-derive overall ranks from total scores.
///
/// Acts are sorted by total score, highest first. An act whose total equals
/// the preceding act's total takes that act's rank; otherwise it takes its
/// position. Ties compare the stored totals exactly.
pub fn rerank(acts: &mut [ActRecord]) {
    acts.sort_by(|a, b| b.total_score.cmp(&a.total_score));

    let mut previous: Option<(Decimal, u32)> = None;
    for (index, act) in acts.iter_mut().enumerate() {
        let position = index as u32 + 1;
        act.rank = match previous {
            Some((score, rank)) if score == act.total_score => rank,
            _ => position,
        };
        previous = Some((act.total_score, act.rank));
    }
}
