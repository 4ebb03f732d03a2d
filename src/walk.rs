//! The tree walker. Depth-first traversal with name-based pruning of
//! directories and files, built on `walkdir`.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::SearcherConfig;

/// Produce the ordered stream of candidate file paths rooted at `root`,
/// applying directory pruning and the file-filtering pipeline of spec
/// §4.4. Permission errors on a subtree are skipped silently (walkdir
/// already does this by yielding an `Err` entry we simply drop).
pub fn walk(root: &Path, cfg: &SearcherConfig) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.file_type().is_dir() {
                // the root itself is never pruned even if its name would
                // otherwise match (e.g. running the tool from `.git`)
                if entry.depth() == 0 {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                return !cfg.is_pruned_dir(&name);
            }
            true
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| accept_file(entry.path(), cfg))
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

/// Single-level directory scan for when `-r` was not given: only direct
/// children of `root` are candidates, no descent into subdirectories.
pub fn walk_shallow(root: &Path, cfg: &SearcherConfig) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| accept_file(p, cfg))
        .collect()
}

fn accept_file(path: &Path, cfg: &SearcherConfig) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    // 1. no dotfiles
    if name.starts_with('.') {
        return false;
    }

    // 2. must have an extension. A filename with no extension is never a
    // candidate, even if an `--include` glob is given.
    let has_extension = path.extension().is_some();
    if !has_extension {
        return false;
    }

    // 3 & 4. size bounds
    let Ok(metadata) = path.metadata() else {
        return false;
    };
    let size = metadata.len();
    if size < cfg.needle.len() as u64 {
        return false;
    }
    if size > cfg.max_file_size {
        return false;
    }

    // 5. suffix/filename blacklist
    if cfg.is_blacklisted_file(name) {
        return false;
    }

    // 6 & 7. include/exclude globs
    if !cfg.include_globs.is_empty() && !cfg.is_included(name) {
        return false;
    }
    if !cfg.exclude_globs.is_empty() && cfg.is_excluded(name) {
        return false;
    }

    // 8. otherwise (no include/exclude given), fall back to the whole-path
    // fnmatch filter.
    if cfg.include_globs.is_empty() && cfg.exclude_globs.is_empty() {
        let path_str = path.to_string_lossy();
        if !cfg.matches_filter(&path_str) {
            return false;
        }
    }

    true
}
