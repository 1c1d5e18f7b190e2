use super::*;

/// Orders files by descending match count, ties broken by ascending path.
pub(super) fn rank_by_match_count(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut ranked = counts.into_iter().collect::<Vec<(String, usize)>>();
    ranked.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));
    ranked
}

/// 1-based position of the first candidate within the top `limit` that is an
/// accepted target, or `None` on a miss.
pub(super) fn evaluate_hit(
    candidates: &[String],
    targets: &HashSet<String>,
    limit: usize,
) -> Option<usize> {
    candidates
        .iter()
        .take(limit)
        .position(|candidate| targets.contains(candidate))
        .map(|index| index + 1)
}

pub(super) struct RowContext<'a> {
    pub(super) id: &'a str,
    pub(super) query_type: QueryType,
    pub(super) query: &'a str,
    pub(super) target_files: &'a [String],
}

pub(super) fn score_outcome(
    context: &RowContext<'_>,
    engine: Engine,
    outcome: EngineOutcome,
    limit: usize,
) -> BenchmarkRow {
    let targets = context
        .target_files
        .iter()
        .cloned()
        .collect::<HashSet<String>>();
    let rank = evaluate_hit(&outcome.candidates, &targets, limit);

    BenchmarkRow {
        id: context.id.to_string(),
        engine,
        query_type: context.query_type,
        query: context.query.to_string(),
        target_files: context.target_files.to_vec(),
        rank,
        latency_ms: outcome.latency_ms,
        exit_code: outcome.exit_code,
        stderr: outcome.stderr,
    }
}
