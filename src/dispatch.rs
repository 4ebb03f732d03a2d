//! The dispatcher. A fixed-size worker pool pulls file-processing tasks
//! and serializes their output so concurrent scans never interleave on
//! stdout.
//!
//! Built on `rayon` (`par_iter().for_each`, a custom `ThreadPoolBuilder`
//! when the caller wants a non-default worker count). Each worker
//! assembles its file's entire output in a private buffer
//! (`process::process_file`) and only holds the stdout mutex while
//! copying those bytes out.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use rayon::prelude::*;

use crate::config::SearcherConfig;
use crate::process::process_file;
use crate::scanner::Scanner;

/// Run every candidate path through the file processor and flush each
/// file's output atomically, in parallel across `cfg.worker_count`
/// workers. `worker_count == 0` runs synchronously on the calling thread.
pub fn run(paths: Vec<PathBuf>, cfg: &SearcherConfig, scanner: &Scanner) {
    let stdout = Mutex::new(io::stdout());
    // Once a write hits a broken pipe, stop attempting further writes.
    let pipe_broken = AtomicBool::new(false);

    let flush = |buffer: Vec<u8>| {
        if pipe_broken.load(Ordering::Relaxed) {
            return;
        }
        let mut handle = stdout.lock().unwrap();
        if let Err(e) = handle.write_all(&buffer) {
            if e.kind() == io::ErrorKind::BrokenPipe {
                pipe_broken.store(true, Ordering::Relaxed);
            }
        }
    };

    if cfg.worker_count == 0 {
        for path in &paths {
            if let Some(outcome) = process_file(path, cfg, scanner) {
                flush(outcome.buffer);
            }
        }
        return;
    }

    let run_all = || {
        paths.par_iter().for_each(|path| {
            if let Some(outcome) = process_file(path, cfg, scanner) {
                flush(outcome.buffer);
            }
        });
    };

    if cfg.worker_count == rayon::current_num_threads() {
        run_all();
    } else {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(cfg.worker_count)
            .build()
        {
            Ok(pool) => pool.install(run_all),
            Err(_) => run_all(),
        }
    }
}
