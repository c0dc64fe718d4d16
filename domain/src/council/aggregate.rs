//! Aggregate ranking computation
//!
//! Walks every parsed ranking, records 1-indexed positions per model, and
//! reports each model's mean position. Lower is better. Models never
//! mentioned by any ranking are absent from the result rather than assigned
//! a worst-case rank.

use crate::core::model::Model;
use crate::council::entities::{AggregateRank, Stage2Entry};
use crate::council::label::LabelMap;

/// Compute per-model average ranks across all stage-2 verdicts
///
/// Labels that do not resolve through `labels` are skipped. The result is
/// sorted ascending by average rank; the sort is stable, so ties keep the
/// order in which models were first mentioned.
pub fn aggregate_rankings(stage2: &[Stage2Entry], labels: &LabelMap) -> Vec<AggregateRank> {
    // Discovery-ordered position lists; council sizes are small enough that
    // a linear scan beats pulling in an ordered map.
    let mut positions: Vec<(Model, Vec<usize>)> = Vec::new();

    for entry in stage2 {
        for (index, token) in entry.parsed_ranking.iter().enumerate() {
            let Some(model) = labels.resolve(token) else {
                continue;
            };
            match positions.iter_mut().find(|(m, _)| m == model) {
                Some((_, list)) => list.push(index + 1),
                None => positions.push((model.clone(), vec![index + 1])),
            }
        }
    }

    let mut aggregate: Vec<AggregateRank> = positions
        .into_iter()
        .map(|(model, list)| {
            let average = list.iter().sum::<usize>() as f64 / list.len() as f64;
            AggregateRank {
                model,
                average_rank: round2(average),
                rankings_count: list.len(),
            }
        })
        .collect();

    aggregate.sort_by(|a, b| a.average_rank.total_cmp(&b.average_rank));
    aggregate
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
