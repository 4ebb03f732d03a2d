//! Plain error enums with hand-written `Display` and `std::error::Error`
//! impls. Only two error kinds abort the whole run (bad CLI usage,
//! nonexistent root path); everything else is caught and swallowed at
//! the file or directory boundary.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SearchError {
    EmptyNeedle,
    PathNotFound(PathBuf),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::EmptyNeedle => write!(f, "needle must not be empty"),
            SearchError::PathNotFound(p) => write!(f, "path does not exist: {}", p.display()),
        }
    }
}

impl std::error::Error for SearchError {}

/// Per-file failures (open/mmap/read). Never propagated past the file
/// processor: the caller treats any `FileError` as "this file contributes
/// no output" and keeps walking.
#[derive(Debug)]
pub enum FileError {
    Open(std::io::Error),
    Mmap(std::io::Error),
    Read(std::io::Error),
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::Open(e) => write!(f, "open failed: {}", e),
            FileError::Mmap(e) => write!(f, "mmap failed: {}", e),
            FileError::Read(e) => write!(f, "read failed: {}", e),
        }
    }
}

impl std::error::Error for FileError {}
