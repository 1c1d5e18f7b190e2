use super::*;

const MAX_KEYWORDS: usize = 3;
const MIN_KEYWORD_CHARS: usize = 3;
const GOLD_QUERY_MODE: &str = "gold";

const STOPWORDS: &[&str] = &[
    "where",
    "is",
    "the",
    "a",
    "an",
    "and",
    "or",
    "to",
    "of",
    "in",
    "on",
    "for",
    "with",
    "does",
    "do",
    "how",
    "are",
    "be",
    "implemented",
    "handled",
    "what",
    "when",
    "why",
    "which",
    "what's",
    "its",
    "it",
    "this",
    "that",
    "via",
    "from",
    "into",
    "using",
    "use",
    "uses",
    "used",
    "only",
];

pub fn run_gold(args: GoldBenchArgs) -> Result<()> {
    let repo = fs::canonicalize(&args.repo)
        .with_context(|| format!("failed to resolve repository root: {}", args.repo.display()))?;
    let items = read_jsonl::<GoldQueryItem>(&args.gold)?;
    let config = EngineConfig::new(repo, args.limit, &args.engines);
    let token_pattern = Regex::new(r"[A-Za-z0-9_-]+").context("failed to compile token pattern")?;

    info!(
        repo = %config.repo_root.display(),
        queries = items.len(),
        limit = config.limit,
        "running gold benchmark"
    );

    let mut rows = Vec::<BenchmarkRow>::with_capacity(items.len() * Engine::ALL.len());
    for item in &items {
        let query = item.query.trim();
        if query.is_empty() {
            warn!(id = %item.id, "gold item has an empty query; skipping");
            continue;
        }
        if item.answers.is_empty() {
            warn!(id = %item.id, "gold item has no answers; every engine will miss");
        }
        rows.extend(bench_gold_item(&config, &token_pattern, item, query));
    }

    emit_run_outputs(
        &config,
        &RunDescription {
            input_path: &args.gold,
            query_mode: GOLD_QUERY_MODE,
            report_path: &args.out,
        },
        &rows,
    )
}

/// Reduces a natural-language question to at most three literal search
/// terms.
pub(super) fn keywordize(token_pattern: &Regex, query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let mut keywords = Vec::<String>::new();
    for token in token_pattern.find_iter(&lowered).map(|found| found.as_str()) {
        if token.chars().count() < MIN_KEYWORD_CHARS || STOPWORDS.contains(&token) {
            continue;
        }
        if keywords.iter().any(|existing| existing == token) {
            continue;
        }
        keywords.push(token.to_string());
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
    }
    keywords
}

fn bench_gold_item(
    config: &EngineConfig,
    token_pattern: &Regex,
    item: &GoldQueryItem,
    query: &str,
) -> [BenchmarkRow; 2] {
    let target_files = item
        .answers
        .iter()
        .map(|answer| normalize_path(&answer.path, &config.repo_root))
        .collect::<Vec<String>>();

    let semantic_context = RowContext {
        id: &item.id,
        query_type: QueryType::Semantic,
        query,
        target_files: &target_files,
    };
    let semantic = query_semantic_engine(config, query);

    let keywords = keywordize(token_pattern, query);
    if keywords.is_empty() {
        debug!(id = %item.id, "no literal terms survived keywordization");
    }
    let literal_query = keywords.join(" ");
    let literal_context = RowContext {
        id: &item.id,
        query_type: QueryType::Keyword,
        query: &literal_query,
        target_files: &target_files,
    };
    let literal = query_literal_engine(config, &keywords, true);

    [
        score_outcome(&semantic_context, Engine::Semantic, semantic, config.limit),
        score_outcome(&literal_context, Engine::Literal, literal, config.limit),
    ]
}
