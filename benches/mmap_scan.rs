use std::hint::black_box;
use std::path::PathBuf;

use blitzgrep::config::{OutputMode, SearcherConfig};
use blitzgrep::process::process_file;
use blitzgrep::scanner::Scanner;
use criterion::{criterion_group, criterion_main, Criterion};

const PATTERN: &str = "hello";

fn generate_test_data(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    for i in 0..size {
        data.push(((i / 64) % 256) as u8);
    }
    data
}

fn cfg() -> SearcherConfig {
    SearcherConfig {
        needle: PATTERN.as_bytes().to_vec(),
        ignore_case: false,
        output_mode: OutputMode::Count,
        max_count: None,
        print_line_numbers: false,
        process_binary_as_text: true,
        is_tty: false,
        worker_count: 0,
        filter_glob: "*.*".to_string(),
        include_globs: vec![],
        exclude_globs: vec![],
        pruned_dirs: vec![],
        blacklisted_suffixes: vec![],
        blacklisted_filenames: vec![],
        max_file_size: u64::MAX,
    }
}

fn bench_for_size(c: &mut Criterion, name: &str, size: usize) {
    let data = generate_test_data(size);
    let path: PathBuf = std::env::temp_dir().join(format!("blitzgrep_bench_{name}.bin"));
    std::fs::write(&path, &data).expect("failed to write temp file");
    let scanner = Scanner::new(false);
    let searcher_cfg = cfg();

    c.bench_function(name, |b| {
        b.iter(|| {
            let outcome = black_box(process_file(&path, &searcher_cfg, &scanner));
            black_box(outcome.map(|o| o.buffer.len()).unwrap_or(0))
        });
    });

    std::fs::remove_file(&path).ok();
}

fn bench_mmap_small(c: &mut Criterion) {
    bench_for_size(c, "mmap_small", 1024);
}

fn bench_mmap_medium(c: &mut Criterion) {
    bench_for_size(c, "mmap_medium", 1024 * 1024);
}

fn bench_mmap_large(c: &mut Criterion) {
    bench_for_size(c, "mmap_large", 10 * 1024 * 1024);
}

criterion_group!(benches, bench_mmap_small, bench_mmap_medium, bench_mmap_large);
criterion_main!(benches);
