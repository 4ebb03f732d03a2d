//! The stdin pipeline. When stdin is piped rather than a TTY, each line
//! is treated as its own haystack and scanned synchronously: no walker,
//! no dispatcher, no mmap, no file name or line number.

use std::io::{self, BufRead, Write};

use crate::config::SearcherConfig;
use crate::scanner::Scanner;

/// Read `input` line by line until EOF, writing every matching line to
/// `output`. Lines shorter than the needle are skipped without
/// scanning, same short file filter the walker applies. Reads raw
/// bytes rather than UTF-8 text, so matching stays byte-level and a
/// non-UTF-8 line is not an error.
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    cfg: &SearcherConfig,
    scanner: &Scanner,
) -> io::Result<()> {
    let mut line = Vec::new();
    loop {
        line.clear();
        let n = input.read_until(b'\n', &mut line)?;
        if n == 0 {
            break;
        }
        while line.last() == Some(&b'\n') || line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.is_empty() || line.len() < cfg.needle.len() {
            continue;
        }
        if scanner.find(&line, &cfg.needle).is_some() {
            output.write_all(&line)?;
            output.write_all(b"\n")?;
        }
    }
    Ok(())
}
