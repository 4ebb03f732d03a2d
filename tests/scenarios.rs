//! End-to-end scenarios driven through the public walk/process pipeline
//! rather than any single module in isolation.

use std::fs;

use blitzgrep::config::{OutputMode, SearcherConfig};
use blitzgrep::scanner::Scanner;
use blitzgrep::{process, walk};
use tempfile::tempdir;

fn base_config(needle: &str, mode: OutputMode) -> SearcherConfig {
    SearcherConfig {
        needle: needle.as_bytes().to_vec(),
        ignore_case: false,
        output_mode: mode,
        max_count: None,
        print_line_numbers: true,
        process_binary_as_text: false,
        is_tty: false,
        worker_count: 1,
        filter_glob: "*.*".to_string(),
        include_globs: vec![],
        exclude_globs: vec![],
        pruned_dirs: blitzgrep::config::DEFAULT_PRUNED_DIRS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        blacklisted_suffixes: blitzgrep::config::DEFAULT_BLACKLISTED_SUFFIXES
            .iter()
            .map(|s| s.to_string())
            .collect(),
        blacklisted_filenames: blitzgrep::config::DEFAULT_BLACKLISTED_FILENAMES
            .iter()
            .map(|s| s.to_string())
            .collect(),
        max_file_size: blitzgrep::config::DEFAULT_MAX_FILE_SIZE,
    }
}

/// Walk a small tree and check the pruning rules exclude `.git` and
/// blacklisted suffixes while still finding the real source file, then
/// run every candidate through the file processor and aggregate matches.
#[test]
fn walks_and_searches_a_small_tree() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(".git/config"), b"needle\n").unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/lib.rs"), b"fn needle() {}\n").unwrap();
    fs::write(dir.path().join("src/image.png"), b"needle\n").unwrap();
    fs::write(dir.path().join("src/no_needle.rs"), b"fn other() {}\n").unwrap();

    let cfg = base_config("needle", OutputMode::Lines);
    let scanner = Scanner::new(false);

    let candidates = walk::walk(dir.path(), &cfg);
    assert!(!candidates.iter().any(|p| p.to_string_lossy().contains(".git")));
    assert!(!candidates.iter().any(|p| p.extension().unwrap() == "png"));

    let mut matched_files = 0;
    for path in &candidates {
        if process::process_file(path, &cfg, &scanner).is_some() {
            matched_files += 1;
        }
    }
    assert_eq!(matched_files, 1);
}

/// `-l` and `-L` are exact complements over the same candidate set.
#[test]
fn files_with_and_without_matches_partition_the_tree() {
    let dir = tempdir().unwrap();
    for i in 0..5 {
        let body = if i % 2 == 0 { "has needle here\n" } else { "nothing here\n" };
        fs::write(dir.path().join(format!("f{i}.txt")), body).unwrap();
    }

    let scanner = Scanner::new(false);
    let with_cfg = base_config("needle", OutputMode::FilesWithMatches);
    let without_cfg = base_config("needle", OutputMode::FilesWithoutMatch);

    let candidates = walk::walk(dir.path(), &with_cfg);
    let mut with_matches = Vec::new();
    let mut without_matches = Vec::new();
    for path in &candidates {
        if process::process_file(path, &with_cfg, &scanner).is_some() {
            with_matches.push(path.clone());
        }
        if process::process_file(path, &without_cfg, &scanner).is_some() {
            without_matches.push(path.clone());
        }
    }

    assert_eq!(with_matches.len() + without_matches.len(), candidates.len());
    for path in &with_matches {
        assert!(!without_matches.contains(path));
    }
}

/// `-m N` caps every per-file record count.
#[test]
fn max_count_caps_every_file_independently() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("many.txt"), "needle\n".repeat(10)).unwrap();

    let mut cfg = base_config("needle", OutputMode::Lines);
    cfg.max_count = Some(3);
    let scanner = Scanner::new(false);

    let path = dir.path().join("many.txt");
    let out = process::process_file(&path, &cfg, &scanner).unwrap();
    let text = String::from_utf8(out.buffer).unwrap();
    assert_eq!(text.lines().count(), 3);
}

/// A non-recursive scan only sees direct children, never descending into
/// subdirectories (the `-r` flag's absence).
#[test]
fn shallow_walk_ignores_subdirectories() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("top.txt"), b"needle\n").unwrap();
    fs::create_dir_all(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested/deep.txt"), b"needle\n").unwrap();

    let cfg = base_config("needle", OutputMode::Lines);
    let found = walk::walk_shallow(dir.path(), &cfg);
    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("top.txt"));
}
