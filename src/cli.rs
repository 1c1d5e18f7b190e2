use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "searchbench",
    version,
    about = "Query-set synthesis and retrieval benchmarking for code-search engines"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a query set from a repository's symbols and comments.
    BuildQueries(BuildQueriesArgs),
    /// Run a synthesized query set against both engines.
    Bench(BenchArgs),
    /// Run a hand-curated gold set against both engines.
    GoldBench(GoldBenchArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExtractionMode {
    Symbols,
    Comments,
    Semantic,
}

impl ExtractionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Symbols => "symbols",
            Self::Comments => "comments",
            Self::Semantic => "semantic",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum QueryMode {
    Keyword,
    Semantic,
    Mixed,
}

impl QueryMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Semantic => "semantic",
            Self::Mixed => "mixed",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct BuildQueriesArgs {
    #[arg(long)]
    pub repo: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = 100)]
    pub max_items: usize,

    #[arg(long, value_enum, default_value_t = ExtractionMode::Symbols)]
    pub mode: ExtractionMode,
}

#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    #[arg(long, default_value = "sgrep")]
    pub semantic_bin: String,

    #[arg(long, default_value = "rg")]
    pub literal_bin: String,

    #[arg(long, default_value_t = 60_000)]
    pub semantic_timeout_ms: u64,

    #[arg(long, default_value_t = 30_000)]
    pub literal_timeout_ms: u64,
}

#[derive(Args, Debug, Clone)]
pub struct BenchArgs {
    #[arg(long)]
    pub repo: PathBuf,

    #[arg(long)]
    pub queries: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    #[arg(long, value_enum, default_value_t = QueryMode::Mixed)]
    pub mode: QueryMode,

    #[command(flatten)]
    pub engines: EngineArgs,
}

#[derive(Args, Debug, Clone)]
pub struct GoldBenchArgs {
    #[arg(long)]
    pub repo: PathBuf,

    #[arg(long)]
    pub gold: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    #[command(flatten)]
    pub engines: EngineArgs,
}
