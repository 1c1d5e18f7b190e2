use super::*;

const REPORT_HEADERS: [&str; 10] = [
    "id",
    "engine",
    "query_type",
    "query",
    "target_file",
    "rank",
    "hit",
    "latency_ms",
    "exit",
    "stderr",
];

pub(super) struct RunDescription<'a> {
    pub(super) input_path: &'a Path,
    pub(super) query_mode: &'a str,
    pub(super) report_path: &'a Path,
}

/// Writes the report table, prints the per-engine summary, and records the
/// summary manifest beside the report.
pub(super) fn emit_run_outputs(
    config: &EngineConfig,
    run: &RunDescription<'_>,
    rows: &[BenchmarkRow],
) -> Result<()> {
    write_report(run.report_path, rows)?;
    info!(path = %run.report_path.display(), rows = rows.len(), "wrote benchmark report");

    let summaries = Engine::ALL
        .iter()
        .filter_map(|engine| summarize_engine(rows, *engine))
        .collect::<Vec<EngineSummary>>();
    print_summary(&summaries)?;

    let manifest = BenchmarkSummaryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        repo: config.repo_root.display().to_string(),
        input_path: run.input_path.display().to_string(),
        input_sha256: sha256_file(run.input_path)?,
        limit: config.limit,
        query_mode: run.query_mode.to_string(),
        report_path: run.report_path.display().to_string(),
        row_count: rows.len(),
        engines: summaries,
    };
    let manifest_path = summary_manifest_path(run.report_path);
    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote benchmark summary manifest");

    Ok(())
}

pub(super) fn write_report(path: &Path, rows: &[BenchmarkRow]) -> Result<()> {
    ensure_parent_directory(path)?;

    let file = File::create(path)
        .with_context(|| format!("failed to create report: {}", path.display()))?;
    let mut output = BufWriter::new(file);

    writeln!(output, "{}", REPORT_HEADERS.join(","))
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    for row in rows {
        let record = report_record(row)
            .iter()
            .map(|value| csv_field(value))
            .collect::<Vec<String>>()
            .join(",");
        writeln!(output, "{record}")
            .with_context(|| format!("failed to write report: {}", path.display()))?;
    }

    output
        .flush()
        .with_context(|| format!("failed to flush report: {}", path.display()))?;
    Ok(())
}

fn report_record(row: &BenchmarkRow) -> [String; 10] {
    [
        row.id.clone(),
        row.engine.as_str().to_string(),
        row.query_type.as_str().to_string(),
        row.query.clone(),
        row.target_files.join("|"),
        row.rank.map(|rank| rank.to_string()).unwrap_or_default(),
        u8::from(row.hit()).to_string(),
        format!("{:.2}", row.latency_ms),
        row.exit_code.to_string(),
        row.stderr.clone(),
    ]
}

/// Quotes a value containing the delimiter, a quote, or a line break,
/// doubling embedded quotes.
pub(super) fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub(super) fn summary_manifest_path(report_path: &Path) -> PathBuf {
    let mut name = report_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".summary.json");
    report_path.with_file_name(name)
}

pub(super) fn format_summary_line(summary: &EngineSummary) -> String {
    let p95 = summary
        .latency_p95_ms
        .map(|value| format!("{value:.2}"))
        .unwrap_or_default();
    format!(
        "  {}: count={} hit_rate={:.3} mrr={:.3} latency_p50_ms={:.2} latency_p95_ms={}",
        summary.engine.as_str(),
        summary.count,
        summary.hit_rate,
        summary.mrr,
        summary.latency_p50_ms,
        p95
    )
}

fn print_summary(summaries: &[EngineSummary]) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "Summary:")?;
    for summary in summaries {
        writeln!(output, "{}", format_summary_line(summary))?;
    }
    output.flush()?;
    Ok(())
}
