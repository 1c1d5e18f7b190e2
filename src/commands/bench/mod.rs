use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cli::{BenchArgs, EngineArgs, GoldBenchArgs, QueryMode};
use crate::model::{
    BenchmarkRow, BenchmarkSummaryManifest, Engine, EngineSummary, GoldQueryItem, QueryItem,
    QueryType,
};
use crate::util::{
    ensure_parent_directory, normalize_path, now_utc_string, read_jsonl, sha256_file,
    write_json_pretty,
};

mod engines;
mod gold;
mod metrics;
mod process;
mod ranking;
mod report;
mod run;

pub use gold::run_gold;
pub use run::run;

use engines::*;
use gold::*;
use metrics::*;
use process::*;
use ranking::*;
use report::*;
use run::*;
