/*!
 * Path resolution
 *
 * Turns the configured selection (`dirs`, `files`, `regexfiles`) into a flat,
 * deduplicated sequence of `ResolvedItem`s in configuration order. Exclusion
 * rules are consulted during directory walks so excluded subtrees are never
 * descended into; explicitly listed files bypass exclusion entirely.
 *
 * Local failures (missing paths, unreadable entries, invalid regexes) become
 * `NotFound` items instead of aborting the run.
 */

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use crate::config::ProjectConfig;
use crate::pattern::Matcher;
use crate::utils::{file_name_str, normalize_path};

/// What a configured path resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// An existing directory
    Directory,
    /// An existing regular file
    File,
    /// A path that could not be located or read
    NotFound,
}

/// Which configuration step produced an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A `dirs` entry
    ExplicitDir,
    /// A `files` entry
    ExplicitFile,
    /// A `regexfiles` match (or its missing base directory)
    Regex,
    /// A descendant discovered while walking a `dirs` entry
    DirWalk,
}

/// Outcome of resolving one path. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct ResolvedItem {
    /// Normalized path as configured or discovered
    pub path: PathBuf,
    /// Directory, file, or not found
    pub kind: ItemKind,
    /// Originating configuration step
    pub source: Source,
    /// Configured root this item belongs to (dir walks only)
    pub root: Option<PathBuf>,
    /// Failure detail for `NotFound` items beyond plain non-existence
    pub reason: Option<String>,
}

impl ResolvedItem {
    /// A not-found marker for a path that could not be located or read
    pub fn not_found(path: PathBuf, source: Source, reason: Option<String>) -> Self {
        Self {
            path,
            kind: ItemKind::NotFound,
            source,
            root: None,
            reason,
        }
    }
}

/// Deterministic walk order: files before directories, alphabetical within
/// each group. Tree rendering relies on this.
fn walk_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    a_dir
        .cmp(&b_dir)
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Resolves the configured selection against the filesystem
pub struct Resolver<'a> {
    config: &'a ProjectConfig,
    matcher: &'a Matcher,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over a loaded configuration and compiled matcher
    pub fn new(config: &'a ProjectConfig, matcher: &'a Matcher) -> Self {
        Self { config, matcher }
    }

    /// Resolve all configured entries in order: `dirs`, then `files`, then
    /// `regexfiles`. The first occurrence of a path wins; later steps never
    /// re-emit it.
    pub fn resolve(&self) -> Vec<ResolvedItem> {
        let mut items = Vec::new();
        // Tree entries and content files are deduplicated independently: a
        // file shown in a tree is still eligible for content selection.
        let mut tree_seen: HashSet<PathBuf> = HashSet::new();
        let mut file_seen: HashSet<PathBuf> = HashSet::new();

        for dir in &self.config.dirs {
            self.resolve_dir(&normalize_path(dir), &mut tree_seen, &mut items);
        }

        for file in &self.config.files {
            self.resolve_file(&normalize_path(file), &mut file_seen, &mut items);
        }

        for selector in &self.config.regexfiles {
            let (Some(dir), Some(pattern)) = (&selector.dir, &selector.pattern) else {
                warn!("regexfiles entry missing 'dir' or 'pattern', skipping");
                continue;
            };
            self.resolve_regex(
                &normalize_path(dir),
                pattern,
                selector.subdirs,
                &mut file_seen,
                &mut items,
            );
        }

        debug!("resolved {} items", items.len());
        items
    }

    /// Walk one configured directory root, pruning excluded subtrees
    fn resolve_dir(
        &self,
        dir: &Path,
        tree_seen: &mut HashSet<PathBuf>,
        items: &mut Vec<ResolvedItem>,
    ) {
        if !dir.is_dir() {
            items.push(ResolvedItem::not_found(
                dir.to_path_buf(),
                Source::ExplicitDir,
                None,
            ));
            return;
        }

        if tree_seen.insert(dir.to_path_buf()) {
            items.push(ResolvedItem {
                path: dir.to_path_buf(),
                kind: ItemKind::Directory,
                source: Source::ExplicitDir,
                root: Some(dir.to_path_buf()),
                reason: None,
            });
        }

        let matcher = self.matcher;
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .sort_by(walk_order)
            .into_iter()
            .filter_entry(|e| !matcher.is_excluded_abs(e.path(), e.file_type().is_dir()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| dir.to_path_buf());
                    warn!("walk error under {}: {}", dir.display(), e);
                    items.push(ResolvedItem::not_found(
                        path,
                        Source::DirWalk,
                        Some(e.to_string()),
                    ));
                    continue;
                }
            };

            let kind = if entry.file_type().is_dir() {
                ItemKind::Directory
            } else {
                ItemKind::File
            };
            let path = entry.path().to_path_buf();
            if tree_seen.insert(path.clone()) {
                items.push(ResolvedItem {
                    path,
                    kind,
                    source: Source::DirWalk,
                    root: Some(dir.to_path_buf()),
                    reason: None,
                });
            }
        }
    }

    /// Resolve one explicitly listed file. Existence is checked independent of
    /// exclusion rules: naming a file selects it.
    fn resolve_file(
        &self,
        file: &Path,
        file_seen: &mut HashSet<PathBuf>,
        items: &mut Vec<ResolvedItem>,
    ) {
        if file_seen.contains(file) {
            return;
        }

        match fs::metadata(file) {
            Ok(md) if md.is_file() => {
                file_seen.insert(file.to_path_buf());
                items.push(ResolvedItem {
                    path: file.to_path_buf(),
                    kind: ItemKind::File,
                    source: Source::ExplicitFile,
                    root: None,
                    reason: None,
                });
            }
            Ok(_) => {
                items.push(ResolvedItem::not_found(
                    file.to_path_buf(),
                    Source::ExplicitFile,
                    Some("not a regular file".to_string()),
                ));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                items.push(ResolvedItem::not_found(
                    file.to_path_buf(),
                    Source::ExplicitFile,
                    None,
                ));
            }
            Err(e) => {
                warn!("cannot stat {}: {}", file.display(), e);
                items.push(ResolvedItem::not_found(
                    file.to_path_buf(),
                    Source::ExplicitFile,
                    Some(e.to_string()),
                ));
            }
        }
    }

    /// Scan one regexfiles entry. Basenames must match the pattern in full
    /// (`^pattern$` semantics), and exclusion rules still apply.
    fn resolve_regex(
        &self,
        dir: &Path,
        pattern: &str,
        subdirs: bool,
        file_seen: &mut HashSet<PathBuf>,
        items: &mut Vec<ResolvedItem>,
    ) {
        if !dir.is_dir() {
            items.push(ResolvedItem::not_found(
                dir.to_path_buf(),
                Source::Regex,
                None,
            ));
            return;
        }

        let regex = match Regex::new(&format!("^(?:{})$", pattern)) {
            Ok(regex) => regex,
            Err(e) => {
                warn!("invalid regexfiles pattern '{}': {}", pattern, e);
                items.push(ResolvedItem::not_found(
                    dir.to_path_buf(),
                    Source::Regex,
                    Some(format!("Invalid regex pattern '{}': {}", pattern, e)),
                ));
                return;
            }
        };

        let matcher = self.matcher;
        let max_depth = if subdirs { usize::MAX } else { 1 };
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by(walk_order)
            .into_iter()
            .filter_entry(|e| !matcher.is_excluded_abs(e.path(), e.file_type().is_dir()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| dir.to_path_buf());
                    warn!("walk error under {}: {}", dir.display(), e);
                    items.push(ResolvedItem::not_found(
                        path,
                        Source::DirWalk,
                        Some(e.to_string()),
                    ));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            if !regex.is_match(&file_name_str(entry.path())) {
                continue;
            }
            let path = entry.path().to_path_buf();
            if file_seen.insert(path.clone()) {
                items.push(ResolvedItem {
                    path,
                    kind: ItemKind::File,
                    source: Source::Regex,
                    root: None,
                    reason: None,
                });
            }
        }
    }
}
