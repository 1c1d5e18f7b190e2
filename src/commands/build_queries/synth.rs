use super::*;

const MIN_PHRASE_TOKENS: usize = 2;

/// Turns a symbol and its optional comment into natural-language queries.
#[derive(Debug)]
pub(super) struct QuerySynthesizer {
    separators: Regex,
    lower_upper: Regex,
    acronym: Regex,
}

impl QuerySynthesizer {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            separators: Regex::new(r"[-_]+").context("failed to compile separator regex")?,
            lower_upper: Regex::new(r"([a-z0-9])([A-Z])")
                .context("failed to compile camel-case regex")?,
            acronym: Regex::new(r"([A-Z]+)([A-Z][a-z])")
                .context("failed to compile acronym regex")?,
        })
    }

    /// Splits an identifier on `_`/`-` and on case boundaries, lowercased.
    /// `HTTPServerConfig` yields `["http", "server", "config"]`.
    pub(super) fn identifier_tokens(&self, symbol: &str) -> Vec<String> {
        let spaced = self.separators.replace_all(symbol, " ");
        let mut tokens = Vec::<String>::new();
        for part in spaced.split_whitespace() {
            let split = self.lower_upper.replace_all(part, "${1} ${2}");
            let split = self.acronym.replace_all(&split, "${1} ${2}");
            tokens.extend(split.split_whitespace().map(str::to_lowercase));
        }
        tokens
    }

    pub(super) fn identifier_phrase(&self, symbol: &str) -> Option<String> {
        let tokens = self.identifier_tokens(symbol);
        if tokens.len() < MIN_PHRASE_TOKENS {
            return None;
        }
        Some(tokens.join(" "))
    }

    /// Removes every case-insensitive occurrence of `symbol` from `comment`
    /// and collapses whitespace.
    pub(super) fn sanitize_comment(&self, comment: &str, symbol: &str) -> String {
        if symbol.is_empty() {
            return normalize_whitespace(comment);
        }

        let pattern = format!("(?i){}", regex::escape(symbol));
        match Regex::new(&pattern) {
            Ok(symbol_pattern) => normalize_whitespace(&symbol_pattern.replace_all(comment, "")),
            Err(err) => {
                debug!(symbol, error = %err, "symbol pattern rejected, leaving comment as-is");
                normalize_whitespace(comment)
            }
        }
    }

    pub(super) fn synthesize(
        &self,
        mode: ExtractionMode,
        symbol: &str,
        comment: Option<&str>,
    ) -> Option<String> {
        match mode {
            ExtractionMode::Semantic => self
                .identifier_phrase(symbol)
                .map(|phrase| format!("code for {phrase}")),
            ExtractionMode::Symbols => comment
                .map(|text| self.sanitize_comment(text, symbol))
                .map(|text| sentence_fragment(&text))
                .filter(|text| !text.is_empty())
                .or_else(|| self.identifier_phrase(symbol))
                .map(|text| format!("Where is the code that {text}?")),
            ExtractionMode::Comments => comment
                .map(normalize_whitespace)
                .filter(|text| !text.is_empty()),
        }
    }
}

/// Shapes a cleaned comment to sit mid-sentence after "Where is the code
/// that". The comment's own trailing `.`/`:` is dropped so the query ends in
/// a single `?`, and the first letter is lowercased unless it opens an
/// acronym. Interior punctuation is kept.
fn sentence_fragment(text: &str) -> String {
    let trimmed = text
        .trim()
        .trim_end_matches(|character: char| character == '.' || character == ':')
        .trim_end();
    let mut characters = trimmed.chars();
    let Some(first) = characters.next() else {
        return String::new();
    };

    let opens_acronym = characters
        .clone()
        .next()
        .is_some_and(|second| second.is_uppercase());
    if !first.is_uppercase() || opens_acronym {
        return trimmed.to_string();
    }

    let mut out = String::with_capacity(trimmed.len());
    out.extend(first.to_lowercase());
    out.push_str(characters.as_str());
    out
}
