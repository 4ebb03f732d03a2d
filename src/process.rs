//! The file processor. Maps a file, classifies it, drives the scanner
//! and line emitter across its bytes, and accumulates per-file output
//! into a private buffer that the dispatcher later flushes atomically.
//!
//! Mirrors `MmapFinder`'s "map once, scan the borrowed slice, never let
//! a reference to it escape the mapping's lifetime" shape, with a plain
//! read as a fallback when mapping the file fails.

use std::fs::File;
use std::io::Write as _;
use std::path::Path;

use memmap2::Mmap;
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::config::{OutputMode, SearcherConfig};
use crate::error::FileError;
use crate::line::{line_bounds, highlight_segments, LineCursor, Segment};
use crate::scanner::Scanner;

#[cfg(feature = "debug")]
use tracing::debug;

/// What scanning this file produced, if anything worth flushing.
pub struct FileOutcome {
    pub buffer: Vec<u8>,
}

/// Read the file's bytes, preferring a memory map and falling back to a
/// plain read when mapping is unavailable or fails.
fn load_bytes(path: &Path) -> Result<Bytes, FileError> {
    let file = File::open(path).map_err(FileError::Open)?;
    match unsafe { Mmap::map(&file) } {
        Ok(mmap) => Ok(Bytes::Mapped(mmap)),
        Err(mmap_err) => {
            let mmap_err = FileError::Mmap(mmap_err);
            #[cfg(feature = "debug")]
            debug!(path = %path.display(), error = %mmap_err, "mmap failed, falling back to a full read");
            let _ = mmap_err;
            std::fs::read(path).map(Bytes::Owned).map_err(FileError::Read)
        }
    }
}

enum Bytes {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl std::ops::Deref for Bytes {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        match self {
            Bytes::Mapped(m) => m,
            Bytes::Owned(v) => v,
        }
    }
}

/// Process one file to completion. Returns `None` if the file contributes
/// no output (open/mmap/read failure, or the file's matches don't call
/// for output under the current mode, e.g. `-l` with zero matches).
pub fn process_file(path: &Path, cfg: &SearcherConfig, scanner: &Scanner) -> Option<FileOutcome> {
    let haystack = match load_bytes(path) {
        Ok(bytes) => bytes,
        Err(file_err) => {
            #[cfg(feature = "debug")]
            debug!(path = %path.display(), error = %file_err, "skipping file");
            let _ = file_err;
            return None;
        }
    };
    let haystack: &[u8] = &haystack;

    let is_binary = memchr::memchr(0, haystack).is_some();
    #[cfg(feature = "debug")]
    debug!(path = %path.display(), is_binary, "classified file");

    let mut out = if cfg.is_tty {
        Buffer::ansi()
    } else {
        Buffer::no_color()
    };

    let path_display = path.display().to_string();
    let mut cursor = LineCursor::new();
    let mut count = 0usize;
    let mut header_written = false;
    let mut pos = 0usize;

    loop {
        if let Some(max) = cfg.max_count {
            if count >= max {
                break;
            }
        }
        if pos >= haystack.len() {
            break;
        }

        let Some(rel) = scanner.find(&haystack[pos..], &cfg.needle) else {
            break;
        };
        let match_offset = pos + rel;
        count += 1;

        if cfg.output_mode == OutputMode::Count {
            let (_, line_end) = line_bounds(scanner, haystack, match_offset);
            pos = next_search_pos(haystack, line_end);
            continue;
        }

        if cfg.output_mode == OutputMode::FilesWithoutMatch {
            return None;
        }

        if cfg.output_mode == OutputMode::FilesWithMatches {
            write_filename_only(&mut out, &path_display);
            return Some(FileOutcome { buffer: out.into_inner() });
        }

        if is_binary && !cfg.process_binary_as_text {
            write_binary_notice(&mut out, &path_display);
            return Some(FileOutcome { buffer: out.into_inner() });
        }

        if cfg.is_tty && !header_written {
            write_path_header(&mut out, &path_display);
            header_written = true;
        }

        let (line_start, line_end) = line_bounds(scanner, haystack, match_offset);
        let line_no = cursor.advance(haystack, line_start, line_end);
        write_match_record(
            &mut out,
            cfg,
            scanner,
            &path_display,
            line_no,
            haystack,
            line_start,
            line_end,
            match_offset,
        );

        pos = next_search_pos(haystack, line_end);
    }

    match cfg.output_mode {
        OutputMode::Count => {
            if count > 0 {
                write_count(&mut out, &path_display, count);
                Some(FileOutcome { buffer: out.into_inner() })
            } else {
                None
            }
        }
        OutputMode::FilesWithoutMatch => {
            write_filename_only(&mut out, &path_display);
            Some(FileOutcome { buffer: out.into_inner() })
        }
        OutputMode::FilesWithMatches => None,
        OutputMode::Lines | OutputMode::OnlyMatching => {
            let buf = out.into_inner();
            if buf.is_empty() {
                None
            } else {
                Some(FileOutcome { buffer: buf })
            }
        }
    }
}

/// Offset to resume searching from: the first byte after the newline
/// that follows `line_end`, so at most one match is reported per line.
fn next_search_pos(haystack: &[u8], line_end: usize) -> usize {
    if line_end >= haystack.len() {
        haystack.len()
    } else {
        line_end + 1
    }
}

fn write_path_header(out: &mut Buffer, path: &str) {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Cyan)).set_bold(true);
    let _ = out.set_color(&spec);
    let _ = write!(out, "{}", path);
    let _ = out.reset();
    let _ = writeln!(out);
}

fn write_filename_only(out: &mut Buffer, path: &str) {
    write_path_header(out, path);
}

fn write_binary_notice(out: &mut Buffer, path: &str) {
    let _ = writeln!(out, "Binary file {} matches", path);
}

fn write_count(out: &mut Buffer, path: &str, count: usize) {
    let _ = writeln!(out, "{}:{}", path, count);
}

#[allow(clippy::too_many_arguments)]
fn write_match_record(
    out: &mut Buffer,
    cfg: &SearcherConfig,
    scanner: &Scanner,
    path: &str,
    line_no: usize,
    haystack: &[u8],
    line_start: usize,
    line_end: usize,
    match_offset: usize,
) {
    if !cfg.is_tty {
        let _ = write!(out, "{}:", path);
    }
    if cfg.print_line_numbers {
        if cfg.is_tty {
            let mut spec = ColorSpec::new();
            spec.set_fg(Some(Color::Magenta));
            let _ = out.set_color(&spec);
            let _ = write!(out, "{}", line_no);
            let _ = out.reset();
            let _ = write!(out, ":");
        } else {
            let _ = write!(out, "{}:", line_no);
        }
    }

    if cfg.output_mode == OutputMode::OnlyMatching {
        let matched = &haystack[match_offset..match_offset + cfg.needle.len()];
        write_highlighted(out, matched);
        let _ = writeln!(out);
        return;
    }

    let line = &haystack[line_start..line_end];
    for segment in highlight_segments(scanner, line, &cfg.needle) {
        match segment {
            Segment::Plain(bytes) => {
                let _ = out.write_all(bytes);
            }
            Segment::Match(bytes) => write_highlighted(out, bytes),
        }
    }
    let _ = writeln!(out);
}

fn write_highlighted(out: &mut Buffer, bytes: &[u8]) {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Red)).set_bold(true);
    let _ = out.set_color(&spec);
    let _ = out.write_all(bytes);
    let _ = out.reset();
}
