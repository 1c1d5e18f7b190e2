use super::*;

const BLOCK_COMMENT_START: &str = "/*";
const BLOCK_COMMENT_END: &str = "*/";
const MAX_LEADING_COMMENT_LINES: usize = 8;
const MIN_LEADING_COMMENT_WORDS: usize = 3;

/// Recovers the comment attached to the definition at `index`: either the
/// contiguous run of `prefix` comments directly above it or, when the line
/// above closes a block comment, the whole block. Comments shorter than
/// three words are treated as absent.
pub(super) fn extract_leading_comment<S: AsRef<str>>(
    lines: &[S],
    index: usize,
    prefix: &str,
) -> Option<String> {
    let mut collected = Vec::<String>::new();

    for cursor in (0..index.min(lines.len())).rev() {
        if collected.len() >= MAX_LEADING_COMMENT_LINES {
            break;
        }

        let trimmed = lines[cursor].as_ref().trim();
        if trimmed.is_empty() {
            if collected.is_empty() {
                continue;
            }
            break;
        }

        if trimmed.starts_with(prefix) {
            collected.push(strip_line_comment(trimmed, prefix).to_string());
            continue;
        }

        if trimmed.ends_with(BLOCK_COMMENT_END) {
            let block = collect_block_above(lines, cursor);
            if !block.is_empty() {
                collected = vec![block];
            }
        }
        break;
    }

    if collected.is_empty() {
        return None;
    }

    collected.reverse();
    let text = normalize_whitespace(&collected.join(" "));
    if text.split_whitespace().count() < MIN_LEADING_COMMENT_WORDS {
        return None;
    }
    Some(text)
}

fn collect_block_above<S: AsRef<str>>(lines: &[S], end: usize) -> String {
    let mut block = Vec::<&str>::new();
    for cursor in (0..=end).rev() {
        let line = lines[cursor].as_ref();
        block.push(line);
        if line.trim().starts_with(BLOCK_COMMENT_START) {
            break;
        }
    }
    block.reverse();

    let parts = block
        .into_iter()
        .map(clean_block_line)
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>();
    normalize_whitespace(&parts.join(" "))
}

fn clean_block_line(line: &str) -> &str {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_suffix(BLOCK_COMMENT_END).unwrap_or(trimmed);
    trimmed
        .trim_start_matches(|character: char| character == '/' || character == '*')
        .trim()
}

/// Finds every comment run and block comment in a file, wherever it sits.
/// Returns the 1-based first line of each along with its cleaned text.
pub(super) fn extract_comment_blocks<S: AsRef<str>>(
    lines: &[S],
    prefix: &str,
) -> Vec<(usize, String)> {
    let mut blocks = Vec::<(usize, String)>::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let line = lines[cursor].as_ref();
        let start = cursor;

        if line.trim().starts_with(prefix) {
            let mut texts = Vec::<&str>::new();
            while cursor < lines.len() && lines[cursor].as_ref().trim().starts_with(prefix) {
                texts.push(strip_line_comment(lines[cursor].as_ref(), prefix));
                cursor += 1;
            }
            let text = normalize_whitespace(&texts.join(" "));
            if !text.is_empty() {
                blocks.push((start + 1, text));
            }
            continue;
        }

        if let Some(open) = line.find(BLOCK_COMMENT_START) {
            let after_open = &line[open + BLOCK_COMMENT_START.len()..];
            let mut texts = Vec::<&str>::new();
            cursor += 1;

            if let Some(close) = after_open.find(BLOCK_COMMENT_END) {
                texts.push(&after_open[..close]);
            } else {
                texts.push(after_open);
                while cursor < lines.len() {
                    let inner = lines[cursor].as_ref();
                    cursor += 1;
                    if let Some(close) = inner.find(BLOCK_COMMENT_END) {
                        texts.push(&inner[..close]);
                        break;
                    }
                    texts.push(inner);
                }
            }

            let parts = texts
                .into_iter()
                .map(clean_block_line)
                .filter(|part| !part.is_empty())
                .collect::<Vec<&str>>();
            let text = normalize_whitespace(&parts.join(" "));
            if !text.is_empty() {
                blocks.push((start + 1, text));
            }
            continue;
        }

        cursor += 1;
    }

    blocks
}

fn strip_line_comment<'a>(line: &'a str, prefix: &str) -> &'a str {
    line.trim()
        .trim_start_matches(|character: char| prefix.contains(character))
        .trim()
}
