use super::*;

pub fn run(args: BenchArgs) -> Result<()> {
    let repo = fs::canonicalize(&args.repo)
        .with_context(|| format!("failed to resolve repository root: {}", args.repo.display()))?;
    let items = read_jsonl::<QueryItem>(&args.queries)?;
    let config = EngineConfig::new(repo, args.limit, &args.engines);

    info!(
        repo = %config.repo_root.display(),
        queries = items.len(),
        limit = config.limit,
        mode = args.mode.as_str(),
        "running synthesized benchmark"
    );

    let mut rows = Vec::<BenchmarkRow>::with_capacity(items.len() * Engine::ALL.len());
    let mut skipped = 0usize;
    for item in &items {
        let Some((query_type, query)) = select_query(item, args.mode) else {
            skipped += 1;
            continue;
        };
        rows.extend(bench_item(&config, item, query_type, query));
    }

    if skipped > 0 {
        warn!(skipped, mode = args.mode.as_str(), "items without a usable query were skipped");
    }

    emit_run_outputs(
        &config,
        &RunDescription {
            input_path: &args.queries,
            query_mode: args.mode.as_str(),
            report_path: &args.out,
        },
        &rows,
    )
}

/// Picks the query text an item contributes under `mode`, or `None` when
/// the item has nothing usable for it.
pub(super) fn select_query(item: &QueryItem, mode: QueryMode) -> Option<(QueryType, &str)> {
    match mode {
        QueryMode::Keyword => item
            .keyword_query()
            .map(|query| (QueryType::Keyword, query)),
        QueryMode::Semantic => item
            .semantic_query()
            .map(|query| (QueryType::Semantic, query)),
        QueryMode::Mixed => item
            .semantic_query()
            .map(|query| (QueryType::Semantic, query))
            .or_else(|| {
                item.keyword_query()
                    .map(|query| (QueryType::Keyword, query))
            }),
    }
}

fn bench_item(
    config: &EngineConfig,
    item: &QueryItem,
    query_type: QueryType,
    query: &str,
) -> [BenchmarkRow; 2] {
    let target_files = vec![normalize_path(&item.file, &config.repo_root)];
    let context = RowContext {
        id: &item.id,
        query_type,
        query,
        target_files: &target_files,
    };

    let semantic = query_semantic_engine(config, query);
    let literal = query_literal_engine(config, &[query.to_string()], false);

    let rows = [
        score_outcome(&context, Engine::Semantic, semantic, config.limit),
        score_outcome(&context, Engine::Literal, literal, config.limit),
    ];
    debug!(
        id = %item.id,
        semantic_rank = ?rows[0].rank,
        literal_rank = ?rows[1].rank,
        "scored query"
    );
    rows
}
