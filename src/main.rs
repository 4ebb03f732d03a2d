//! Command-line interface for blitzgrep.
//!
//! Thin glue over the library: parse flags into a `SearcherConfig`,
//! decide which of the three entry points (single file, tree walk, stdin
//! pipeline) applies, and hand off.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use blitzgrep::config::{
    OutputMode, SearcherConfig, DEFAULT_BLACKLISTED_FILENAMES, DEFAULT_BLACKLISTED_SUFFIXES,
    DEFAULT_MAX_FILE_SIZE, DEFAULT_PRUNED_DIRS,
};
use blitzgrep::error::SearchError;
use blitzgrep::scanner::Scanner;
use blitzgrep::{dispatch, stdin_pipeline, walk};

#[cfg(feature = "debug")]
use tracing::debug;

/// Recursive literal-substring search with SIMD-tiered scanning.
#[derive(Parser, Debug)]
#[command(name = "blitzgrep", author, version, about, long_about = None)]
struct Args {
    /// The substring to search for.
    query: String,

    /// Files or directories to search. Defaults to "." when omitted and
    /// stdin is a TTY; otherwise input is read from stdin as a line filter.
    paths: Vec<PathBuf>,

    /// ASCII case-insensitive compare.
    #[arg(short = 'i', long = "ignore-case")]
    ignore_case: bool,

    /// Prefix each match record with its 1-based line number.
    #[arg(short = 'n', long = "line-number")]
    line_number: bool,

    /// Per file, print only the count of matching lines.
    #[arg(short = 'c', long = "count")]
    count: bool,

    /// Per file with >=1 match, print only the filename.
    #[arg(short = 'l', long = "files-with-matches")]
    files_with_matches: bool,

    /// Per file with 0 matches, print only the filename.
    #[arg(short = 'L', long = "files-without-match")]
    files_without_match: bool,

    /// Print only the matched substring, not the whole line.
    #[arg(short = 'o', long = "only-matching")]
    only_matching: bool,

    /// Stop a file after N matches.
    #[arg(short = 'm', long = "max-count", value_name = "N")]
    max_count: Option<usize>,

    /// Process binary files as text.
    #[arg(short = 'a', long = "text")]
    text: bool,

    /// Recurse into subdirectories.
    #[arg(short = 'r', long = "recursive")]
    recursive: bool,

    /// fnmatch filter against the full path.
    #[arg(short = 'f', long = "filter", value_name = "GLOB", default_value = "*.*")]
    filter: String,

    /// Worker count (0 = synchronous in-thread execution).
    #[arg(short = 'j', value_name = "N")]
    jobs: Option<usize>,

    /// Whitelist filename glob, repeatable.
    #[arg(long = "include", value_name = "GLOB")]
    include: Vec<String>,

    /// Blacklist filename glob, repeatable.
    #[arg(long = "exclude", value_name = "GLOB")]
    exclude: Vec<String>,
}

fn output_mode(args: &Args) -> OutputMode {
    if args.count {
        OutputMode::Count
    } else if args.files_with_matches {
        OutputMode::FilesWithMatches
    } else if args.files_without_match {
        OutputMode::FilesWithoutMatch
    } else if args.only_matching {
        OutputMode::OnlyMatching
    } else {
        OutputMode::Lines
    }
}

fn build_config(args: &Args, is_tty: bool) -> SearcherConfig {
    SearcherConfig {
        needle: args.query.clone().into_bytes(),
        ignore_case: args.ignore_case,
        output_mode: output_mode(args),
        max_count: args.max_count,
        print_line_numbers: args.line_number,
        process_binary_as_text: args.text,
        is_tty,
        worker_count: args.jobs.unwrap_or_else(rayon::current_num_threads),
        filter_glob: args.filter.clone(),
        include_globs: args.include.clone(),
        exclude_globs: args.exclude.clone(),
        pruned_dirs: DEFAULT_PRUNED_DIRS.iter().map(|s| s.to_string()).collect(),
        blacklisted_suffixes: DEFAULT_BLACKLISTED_SUFFIXES
            .iter()
            .map(|s| s.to_string())
            .collect(),
        blacklisted_filenames: DEFAULT_BLACKLISTED_FILENAMES
            .iter()
            .map(|s| s.to_string())
            .collect(),
        max_file_size: DEFAULT_MAX_FILE_SIZE,
    }
}

fn main() -> ExitCode {
    #[cfg(feature = "debug")]
    {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    let args = Args::parse();

    if args.query.is_empty() {
        eprintln!("error: {}", SearchError::EmptyNeedle);
        return ExitCode::FAILURE;
    }

    let stdin_is_tty = std::io::stdin().is_terminal();
    let stdout_is_tty = std::io::stdout().is_terminal();

    if args.paths.is_empty() && !stdin_is_tty {
        let cfg = build_config(&args, false);
        let scanner = Scanner::new(cfg.ignore_case);
        #[cfg(feature = "debug")]
        debug!(tier = ?scanner.tier(), "stdin pipeline selected");
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        if stdin_pipeline::run(stdin.lock(), stdout.lock(), &cfg, &scanner).is_err() {
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    let cfg = build_config(&args, stdout_is_tty);
    let scanner = Scanner::new(cfg.ignore_case);
    #[cfg(feature = "debug")]
    debug!(tier = ?scanner.tier(), recursive = args.recursive, "walker selected");

    let roots: Vec<PathBuf> = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };

    let mut candidates = Vec::new();
    for root in &roots {
        if !root.exists() {
            eprintln!("error: {}", SearchError::PathNotFound(root.clone()));
            return ExitCode::FAILURE;
        }
        if root.is_file() {
            candidates.push(root.clone());
        } else if args.recursive {
            candidates.extend(walk::walk(root, &cfg));
        } else {
            candidates.extend(walk::walk_shallow(root, &cfg));
        }
    }

    dispatch::run(candidates, &cfg, &scanner);
    ExitCode::SUCCESS
}
