use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::cli::{BuildQueriesArgs, ExtractionMode};
use crate::model::{Language, QueryItem};
use crate::util::{normalize_whitespace, write_jsonl_ascii};

mod assemble;
mod comments;
mod rules;
mod run;
mod scan;
mod synth;
#[cfg(test)]
mod tests;

pub use run::run;

use assemble::*;
use comments::*;
use rules::*;
use run::*;
use scan::*;
use synth::*;
