use super::*;

const IGNORE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "dist",
    "build",
    "target",
    "vendor",
    ".next",
    ".turbo",
    ".cache",
    "__pycache__",
    ".venv",
    "venv",
];

#[derive(Debug, Clone)]
pub(super) struct SourceFile {
    pub(super) path: PathBuf,
    pub(super) language: Language,
}

/// Walks `root` in file-name order, pruning ignored directories, and yields
/// every file whose extension maps to a known language.
pub(super) fn discover_source_files(root: &Path) -> impl Iterator<Item = SourceFile> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored_dir(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.into_path();
            Language::from_path(&path).map(|language| SourceFile { path, language })
        })
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORE_DIRS.contains(&name))
}

pub(super) fn read_source_lines(path: &Path) -> Option<Vec<String>> {
    match fs::read(path) {
        Ok(raw) => Some(
            String::from_utf8_lossy(&raw)
                .lines()
                .map(ToOwned::to_owned)
                .collect(),
        ),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "skipping unreadable source file");
            None
        }
    }
}
