use super::*;

const PATH_FIELDS: [&str; 3] = ["path", "file", "filename"];

/// Everything the adapters need to invoke the two engines.
#[derive(Debug, Clone)]
pub(super) struct EngineConfig {
    pub(super) repo_root: PathBuf,
    pub(super) limit: usize,
    pub(super) semantic_program: String,
    pub(super) literal_program: String,
    pub(super) semantic_timeout: Duration,
    pub(super) literal_timeout: Duration,
}

impl EngineConfig {
    pub(super) fn new(repo_root: PathBuf, limit: usize, engines: &EngineArgs) -> Self {
        Self {
            repo_root,
            limit: limit.max(1),
            semantic_program: engines.semantic_bin.clone(),
            literal_program: engines.literal_bin.clone(),
            semantic_timeout: Duration::from_millis(engines.semantic_timeout_ms.max(1)),
            literal_timeout: Duration::from_millis(engines.literal_timeout_ms.max(1)),
        }
    }
}

/// Ranked, canonicalized candidates from one engine for one query.
#[derive(Debug, Clone)]
pub(super) struct EngineOutcome {
    pub(super) candidates: Vec<String>,
    pub(super) latency_ms: f64,
    pub(super) exit_code: i32,
    pub(super) stderr: String,
}

/// Accepted top-level shapes of the semantic engine's JSON output.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum SemanticPayload {
    Ranked(Vec<Value>),
    Wrapped { results: Vec<Value> },
}

impl SemanticPayload {
    fn into_records(self) -> Vec<Value> {
        match self {
            Self::Ranked(records) | Self::Wrapped { results: records } => records,
        }
    }
}

/// Parses semantic engine stdout into its result records. Any parse
/// failure or unexpected shape yields no records.
pub(super) fn parse_semantic_output(raw: &str) -> Vec<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<SemanticPayload>(trimmed) {
        Ok(payload) => payload.into_records(),
        Err(err) => {
            debug!(error = %err, "semantic engine output not recognised");
            Vec::new()
        }
    }
}

/// Reads each record's path from the first present of `path`, `file`,
/// `filename`, falling back to `location.path`. Records without one are
/// dropped.
pub(super) fn semantic_result_paths(records: &[Value]) -> Vec<String> {
    records.iter().filter_map(record_path).collect()
}

fn record_path(record: &Value) -> Option<String> {
    let object = record.as_object()?;
    PATH_FIELDS
        .iter()
        .find_map(|field| object.get(*field).and_then(Value::as_str))
        .or_else(|| {
            object
                .get("location")
                .and_then(|location| location.get("path"))
                .and_then(Value::as_str)
        })
        .map(ToOwned::to_owned)
}

pub(super) fn semantic_args(config: &EngineConfig, query: &str) -> Vec<String> {
    vec![
        "search".to_string(),
        "--json".to_string(),
        "-n".to_string(),
        config.limit.to_string(),
        "-p".to_string(),
        config.repo_root.display().to_string(),
        query.to_string(),
    ]
}

pub(super) fn literal_args(
    config: &EngineConfig,
    term: &str,
    case_insensitive: bool,
) -> Vec<String> {
    let mut args = vec!["-F".to_string()];
    if case_insensitive {
        args.push("-i".to_string());
    }
    for flag in ["--no-heading", "--line-number", "--color=never", "-e"] {
        args.push(flag.to_string());
    }
    args.push(term.to_string());
    args.push(config.repo_root.display().to_string());
    args
}

/// Adds one unit per `path:line:...` output line to that path's tally.
pub(super) fn tally_literal_output(raw: &str, counts: &mut HashMap<String, usize>) {
    for line in raw.lines() {
        if line.is_empty() {
            continue;
        }
        let mut fields = line.splitn(3, ':');
        let (Some(path), Some(_)) = (fields.next(), fields.next()) else {
            continue;
        };
        if path.is_empty() {
            continue;
        }
        *counts.entry(path.to_string()).or_insert(0) += 1;
    }
}

pub(super) fn query_semantic_engine(config: &EngineConfig, query: &str) -> EngineOutcome {
    let args = semantic_args(config, query);
    let invocation =
        run_engine_command(&config.semantic_program, &args, config.semantic_timeout);
    log_invocation(Engine::Semantic, &invocation);

    let records = parse_semantic_output(&invocation.stdout);
    let candidates = semantic_result_paths(&records)
        .iter()
        .map(|path| normalize_path(path, &config.repo_root))
        .collect();

    EngineOutcome {
        candidates,
        latency_ms: invocation.elapsed_ms,
        exit_code: invocation.exit_code,
        stderr: stderr_snippet(&invocation.stderr),
    }
}

/// Runs the literal engine once per term, summing latency and per-file
/// match tallies, then ranks files by match density.
pub(super) fn query_literal_engine(
    config: &EngineConfig,
    terms: &[String],
    case_insensitive: bool,
) -> EngineOutcome {
    let mut counts = HashMap::<String, usize>::new();
    let mut latency_ms = 0.0_f64;
    let mut exit_code = 0;
    let mut stderr_parts = Vec::<String>::new();

    for term in terms {
        let args = literal_args(config, term, case_insensitive);
        let invocation =
            run_engine_command(&config.literal_program, &args, config.literal_timeout);
        log_invocation(Engine::Literal, &invocation);

        tally_literal_output(&invocation.stdout, &mut counts);
        latency_ms += invocation.elapsed_ms;
        if exit_code == 0 {
            exit_code = invocation.exit_code;
        }
        let snippet = stderr_snippet(&invocation.stderr);
        if !snippet.is_empty() {
            stderr_parts.push(snippet);
        }
    }

    let candidates = rank_by_match_count(counts)
        .into_iter()
        .map(|(path, _)| normalize_path(&path, &config.repo_root))
        .collect();

    EngineOutcome {
        candidates,
        latency_ms,
        exit_code,
        stderr: stderr_snippet(&stderr_parts.join(" | ")),
    }
}

fn log_invocation(engine: Engine, invocation: &EngineInvocation) {
    if invocation.timed_out || invocation.exit_code != 0 {
        debug!(
            engine = engine.as_str(),
            exit_code = invocation.exit_code,
            timed_out = invocation.timed_out,
            latency_ms = invocation.elapsed_ms,
            "engine returned non-zero status"
        );
    }
}
