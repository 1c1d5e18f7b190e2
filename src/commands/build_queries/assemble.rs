use super::*;

/// A query candidate found during the scan, before ids are assigned.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ExtractedItem {
    pub(super) file: String,
    pub(super) line: usize,
    pub(super) symbol: String,
    pub(super) language: Language,
    pub(super) query_keyword: String,
    pub(super) query_semantic: Option<String>,
    pub(super) comment: Option<String>,
}

impl ExtractedItem {
    fn has_semantic_query(&self) -> bool {
        self.query_semantic
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty())
    }

    fn has_query(&self) -> bool {
        self.has_semantic_query() || !self.query_keyword.trim().is_empty()
    }

    fn into_query_item(self, id: String) -> QueryItem {
        QueryItem {
            id,
            file: self.file,
            line: self.line,
            symbol: self.symbol,
            language: self.language,
            query_keyword: self.query_keyword,
            query_semantic: self.query_semantic,
            comment: self.comment,
        }
    }
}

pub(super) fn query_id(index: usize) -> String {
    format!("q{index:04}")
}

/// Caps the set at `max_items`, taking semantic-bearing items first and
/// filling the remainder with keyword-only ones. Scan order is preserved
/// within each group and ids are assigned in output order.
pub(super) fn assemble_query_set(items: Vec<ExtractedItem>, max_items: usize) -> Vec<QueryItem> {
    let (semantic, keyword_only): (Vec<ExtractedItem>, Vec<ExtractedItem>) = items
        .into_iter()
        .filter(ExtractedItem::has_query)
        .partition(ExtractedItem::has_semantic_query);

    let keyword_room = max_items.saturating_sub(semantic.len().min(max_items));
    semantic
        .into_iter()
        .take(max_items)
        .chain(keyword_only.into_iter().take(keyword_room))
        .enumerate()
        .map(|(index, item)| item.into_query_item(query_id(index)))
        .collect()
}
