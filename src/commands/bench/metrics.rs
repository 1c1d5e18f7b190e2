use super::*;

const P95_MIN_SAMPLES: usize = 20;

pub(super) fn summarize_engine(rows: &[BenchmarkRow], engine: Engine) -> Option<EngineSummary> {
    let subset = rows
        .iter()
        .filter(|row| row.engine == engine)
        .collect::<Vec<&BenchmarkRow>>();
    if subset.is_empty() {
        return None;
    }

    let hits = subset.iter().filter(|row| row.hit()).count();
    let ranks = subset.iter().map(|row| row.rank).collect::<Vec<Option<usize>>>();
    let latencies = subset
        .iter()
        .map(|row| row.latency_ms)
        .collect::<Vec<f64>>();

    Some(EngineSummary {
        engine,
        count: subset.len(),
        hit_rate: hits as f64 / subset.len() as f64,
        mrr: mean_reciprocal_rank(&ranks).unwrap_or(0.0),
        latency_p50_ms: median(&latencies).unwrap_or(0.0),
        latency_p95_ms: p95(&latencies),
    })
}

/// Sum of reciprocal ranks over every row, divided by the full row count:
/// misses count toward the denominator.
pub(super) fn mean_reciprocal_rank(ranks: &[Option<usize>]) -> Option<f64> {
    if ranks.is_empty() {
        return None;
    }

    let reciprocal_sum = ranks
        .iter()
        .flatten()
        .map(|rank| 1.0 / *rank as f64)
        .sum::<f64>();
    Some(reciprocal_sum / ranks.len() as f64)
}

pub(super) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let sorted = sorted_values(values);
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[middle])
    } else {
        Some((sorted[middle - 1] + sorted[middle]) / 2.0)
    }
}

/// 95th percentile as the 19th of 20 cut points under the exclusive
/// quantile method. Undefined below twenty samples.
pub(super) fn p95(values: &[f64]) -> Option<f64> {
    if values.len() < P95_MIN_SAMPLES {
        return None;
    }
    Some(exclusive_cut_point(&sorted_values(values), 20, 19))
}

fn exclusive_cut_point(sorted: &[f64], parts: usize, index: usize) -> f64 {
    let len = sorted.len();
    let scaled = index * (len + 1);
    let lower = (scaled / parts).clamp(1, len - 1);
    let delta = scaled as f64 - (lower * parts) as f64;
    let parts = parts as f64;
    (sorted[lower - 1] * (parts - delta) + sorted[lower] * delta) / parts
}

fn sorted_values(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|left, right| left.total_cmp(right));
    sorted
}
