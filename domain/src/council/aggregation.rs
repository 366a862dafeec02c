//! Mean-rank aggregation across judges.

use super::label::LabelMap;
use super::value_objects::{AggregateRanking, Stage2Result};
use crate::core::model::Model;

/// Combine every judge's parsed ranking into a per-model mean rank.
///
/// Each label's 1-based position in a judge's list counts once toward the
/// model it resolves to; unresolvable labels are skipped. Models that no
/// judge mentioned are absent from the output. The result is sorted by
/// ascending average (best first); equal averages keep the order in which
/// the models were first encountered.
pub fn aggregate_rankings(stage2: &[Stage2Result], labels: &LabelMap) -> Vec<AggregateRanking> {
    let mut positions: Vec<(Model, Vec<usize>)> = Vec::new();

    for judge in stage2 {
        for (index, label) in judge.parsed_ranking.iter().enumerate() {
            let Some(model) = labels.resolve(label) else {
                continue;
            };
            let position = index + 1;
            match positions.iter_mut().find(|(m, _)| m == model) {
                Some((_, list)) => list.push(position),
                None => positions.push((model.clone(), vec![position])),
            }
        }
    }

    let mut aggregate: Vec<AggregateRanking> = positions
        .into_iter()
        .map(|(model, list)| {
            let sum: usize = list.iter().sum();
            let average = sum as f64 / list.len() as f64;
            AggregateRanking {
                model,
                average_rank: round2(average),
                judge_count: list.len(),
            }
        })
        .collect();

    // sort_by is stable: ties stay in first-seen order
    aggregate.sort_by(|a, b| a.average_rank.total_cmp(&b.average_rank));
    aggregate
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
