use super::*;

const OVERGENERATION_FACTOR: usize = 3;
const MIN_COMMENT_QUERY_WORDS: usize = 5;

pub fn run(args: BuildQueriesArgs) -> Result<()> {
    let repo = fs::canonicalize(&args.repo)
        .with_context(|| format!("failed to resolve repository root: {}", args.repo.display()))?;

    info!(
        repo = %repo.display(),
        mode = args.mode.as_str(),
        max_items = args.max_items,
        "building query set"
    );

    let rules = RuleTable::compile()?;
    let synthesizer = QuerySynthesizer::new()?;
    let items = build_query_set(&repo, args.max_items, args.mode, &rules, &synthesizer)?;

    write_jsonl_ascii(&args.out, &items)?;

    let semantic_count = items
        .iter()
        .filter(|item| item.semantic_query().is_some())
        .count();
    info!(
        path = %args.out.display(),
        items = items.len(),
        semantic = semantic_count,
        "wrote query set"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(
        output,
        "Wrote {} queries to {}",
        items.len(),
        args.out.display()
    )?;
    output.flush()?;
    Ok(())
}

pub(super) fn build_query_set(
    repo: &Path,
    max_items: usize,
    mode: ExtractionMode,
    rules: &RuleTable,
    synthesizer: &QuerySynthesizer,
) -> Result<Vec<QueryItem>> {
    let scan_cap = max_items.saturating_mul(OVERGENERATION_FACTOR);
    let mut extracted = Vec::<ExtractedItem>::new();
    let mut files_scanned = 0usize;

    for source in discover_source_files(repo) {
        if extracted.len() >= scan_cap {
            break;
        }
        let Some(lines) = read_source_lines(&source.path) else {
            continue;
        };
        files_scanned += 1;

        match mode {
            ExtractionMode::Comments => {
                extract_comment_items(&source, &lines, synthesizer, scan_cap, &mut extracted)
            }
            ExtractionMode::Symbols | ExtractionMode::Semantic => extract_symbol_items(
                &source,
                &lines,
                mode,
                rules,
                synthesizer,
                scan_cap,
                &mut extracted,
            ),
        }
    }

    debug!(files_scanned, candidates = extracted.len(), "scan complete");

    let items = assemble_query_set(extracted, max_items);
    if items.is_empty() {
        bail!(
            "no items extracted from {}; try another repository or increase --max-items",
            repo.display()
        );
    }
    Ok(items)
}

fn extract_symbol_items(
    source: &SourceFile,
    lines: &[String],
    mode: ExtractionMode,
    rules: &RuleTable,
    synthesizer: &QuerySynthesizer,
    cap: usize,
    out: &mut Vec<ExtractedItem>,
) {
    if !rules.supports(source.language) {
        return;
    }

    let prefix = source.language.comment_prefix();
    for (index, line) in lines.iter().enumerate() {
        if out.len() >= cap {
            break;
        }
        let Some(symbol) = rules.match_symbol(source.language, line) else {
            continue;
        };

        let comment = extract_leading_comment(lines, index, prefix);
        let query_semantic = synthesizer.synthesize(mode, symbol, comment.as_deref());
        out.push(ExtractedItem {
            file: source.path.display().to_string(),
            line: index + 1,
            symbol: symbol.to_string(),
            language: source.language,
            query_keyword: symbol.to_string(),
            query_semantic,
            comment,
        });
    }
}

fn extract_comment_items(
    source: &SourceFile,
    lines: &[String],
    synthesizer: &QuerySynthesizer,
    cap: usize,
    out: &mut Vec<ExtractedItem>,
) {
    let blocks = extract_comment_blocks(lines, source.language.comment_prefix());
    for (line, text) in blocks {
        if out.len() >= cap {
            break;
        }
        if text.split_whitespace().count() < MIN_COMMENT_QUERY_WORDS {
            continue;
        }

        let query_semantic =
            synthesizer.synthesize(ExtractionMode::Comments, "", Some(text.as_str()));
        out.push(ExtractedItem {
            file: source.path.display().to_string(),
            line,
            symbol: String::new(),
            language: source.language,
            query_keyword: String::new(),
            query_semantic,
            comment: Some(text),
        });
    }
}
