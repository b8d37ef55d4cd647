use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use ignore::WalkBuilder;
use crate::error::WatchError;
use crate::filter::PatternSet;
use crate::hasher::{self, Digest};

/// Content digest and metadata for one file within a snapshot.
///
/// Only the digest participates in change detection; size and mtime are
/// informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub digest: Digest,
    pub size: u64,
    pub modified: SystemTime,
}

/// Point-in-time view of a directory tree: relative forward-slash path to
/// [`FileRecord`], restricted to paths that passed the active [`PatternSet`].
///
/// Snapshots are values. A capture produces a fresh one and nothing mutates
/// it afterwards; the poll loop hands the previous snapshot into each diff
/// by reference and replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    files: HashMap<String, FileRecord>,
}

impl Snapshot {
    /// The baseline before the first poll: contains no files, so every file
    /// found by the first capture diffs as created.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Walks `root` and builds a snapshot of every matching regular file.
    ///
    /// Two phases: enumerate candidate paths first, then hash them. A file
    /// that vanishes or turns unreadable between the two phases is skipped
    /// with a warning; only a missing or non-directory root is fatal.
    pub fn capture(root: &Path, patterns: &PatternSet) -> Result<Self, WatchError> {
        if !root.exists() {
            return Err(WatchError::invalid_root(root, "path does not exist"));
        }
        if !root.is_dir() {
            return Err(WatchError::invalid_root(root, "path is not a directory"));
        }

        let candidates = enumerate(root, patterns);

        let mut files = HashMap::with_capacity(candidates.len());
        for (relative, absolute) in candidates {
            let metadata = match std::fs::metadata(&absolute) {
                Ok(metadata) => metadata,
                Err(err) => {
                    tracing::warn!("Skipping {}: {}", relative, err);
                    continue;
                }
            };

            let digest = match hasher::hash_file(&absolute) {
                Ok(digest) => digest,
                Err(err) => {
                    tracing::warn!("Skipping unreadable file: {}", err);
                    continue;
                }
            };

            files.insert(
                relative,
                FileRecord {
                    digest,
                    size: metadata.len(),
                    modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
                },
            );
        }

        Ok(Self { files })
    }

    pub fn get(&self, relative_path: &str) -> Option<&FileRecord> {
        self.files.get(relative_path)
    }

    pub fn contains(&self, relative_path: &str) -> bool {
        self.files.contains_key(relative_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FileRecord)> {
        self.files.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.files.keys()
    }
}

impl FromIterator<(String, FileRecord)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, FileRecord)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// Phase one: list matching regular files under `root` as
/// (relative key, absolute path) pairs.
///
/// Symlinked directories are not followed; a symlink to a file is hashed
/// through the link. Unreadable subtrees are skipped with a warning so the
/// rest of the walk continues.
fn enumerate(root: &Path, patterns: &PatternSet) -> Vec<(String, PathBuf)> {
    let mut candidates = Vec::new();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .follow_links(false)
        .build();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                let subtree = match &err {
                    ignore::Error::WithPath { path, .. } => path.clone(),
                    _ => root.to_path_buf(),
                };
                let err = WatchError::Enumeration {
                    path: subtree,
                    message: err.to_string(),
                };
                tracing::warn!("Skipping subtree: {}", err);
                continue;
            }
        };

        let path = entry.path();
        if path.components().any(|comp| comp.as_os_str() == ".git") {
            continue;
        }

        let is_file = match entry.file_type() {
            Some(ft) if ft.is_file() => true,
            // Dangling links and links to directories fall out here; links
            // to files resolve and get hashed through the link.
            Some(ft) if ft.is_symlink() => path.metadata().map(|m| m.is_file()).unwrap_or(false),
            _ => false,
        };
        if !is_file {
            continue;
        }

        let Some(relative) = relative_key(root, path) else {
            tracing::warn!("Skipping non-UTF-8 path: {}", path.display());
            continue;
        };

        if patterns.matches(&relative) {
            candidates.push((relative, path.to_path_buf()));
        }
    }

    candidates
}

/// Relative path with forward-slash separators, stable across platforms.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    if relative.as_os_str().is_empty() {
        return None;
    }

    let parts = relative
        .components()
        .map(|comp| comp.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;

    Some(parts.join("/"))
}
