use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Go,
    Rust,
    Java,
    Kotlin,
    CSharp,
    C,
    Cpp,
    ObjC,
    Swift,
    Ruby,
    Php,
}

impl Language {
    pub fn from_extension(ext: &str) -> Option<Self> {
        let language = match ext.to_ascii_lowercase().as_str() {
            "py" => Self::Python,
            "js" | "jsx" => Self::JavaScript,
            "ts" | "tsx" => Self::TypeScript,
            "go" => Self::Go,
            "rs" => Self::Rust,
            "java" => Self::Java,
            "kt" => Self::Kotlin,
            "cs" => Self::CSharp,
            "c" | "h" => Self::C,
            "cc" | "cpp" | "hpp" => Self::Cpp,
            "m" | "mm" => Self::ObjC,
            "swift" => Self::Swift,
            "rb" => Self::Ruby,
            "php" => Self::Php,
            _ => return None,
        };
        Some(language)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn comment_prefix(self) -> &'static str {
        match self {
            Self::Python | Self::Ruby => "#",
            _ => "//",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Java => "java",
            Self::Kotlin => "kotlin",
            Self::CSharp => "csharp",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::ObjC => "objc",
            Self::Swift => "swift",
            Self::Ruby => "ruby",
            Self::Php => "php",
        }
    }
}

/// One synthesized query, written once per line of the query-set store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryItem {
    pub id: String,
    pub file: String,
    pub line: usize,
    #[serde(default)]
    pub symbol: String,
    #[serde(alias = "lang")]
    pub language: Language,
    #[serde(default)]
    pub query_keyword: String,
    #[serde(default)]
    pub query_semantic: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl QueryItem {
    pub fn semantic_query(&self) -> Option<&str> {
        self.query_semantic
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }

    pub fn keyword_query(&self) -> Option<&str> {
        Some(self.query_keyword.as_str()).filter(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldAnswer {
    pub path: String,
    #[serde(default)]
    pub line: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldQueryItem {
    pub id: String,
    pub query: String,
    #[serde(default)]
    pub answers: Vec<GoldAnswer>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Semantic,
    Literal,
}

impl Engine {
    pub const ALL: [Engine; 2] = [Engine::Semantic, Engine::Literal];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Semantic => "semantic",
            Self::Literal => "literal",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Keyword,
    Semantic,
}

impl QueryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Semantic => "semantic",
        }
    }
}

/// One (query, engine) outcome. `hit` is derived from `rank` so the two
/// cannot disagree.
#[derive(Debug, Clone)]
pub struct BenchmarkRow {
    pub id: String,
    pub engine: Engine,
    pub query_type: QueryType,
    pub query: String,
    pub target_files: Vec<String>,
    pub rank: Option<usize>,
    pub latency_ms: f64,
    pub exit_code: i32,
    pub stderr: String,
}

impl BenchmarkRow {
    pub fn hit(&self) -> bool {
        self.rank.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineSummary {
    pub engine: Engine,
    pub count: usize,
    pub hit_rate: f64,
    pub mrr: f64,
    pub latency_p50_ms: f64,
    pub latency_p95_ms: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkSummaryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub repo: String,
    pub input_path: String,
    pub input_sha256: String,
    pub limit: usize,
    pub query_mode: String,
    pub report_path: String,
    pub row_count: usize,
    pub engines: Vec<EngineSummary>,
}
