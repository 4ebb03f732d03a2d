//! A recursive, literal-substring search engine: a SIMD-tiered scanner
//! fused with a line-aware emitter, a pruning tree walker, and a
//! parallel per-file dispatcher.
//!
//! The CLI (`main.rs`) is thin glue over this library, per the scope note
//! that argument parsing and help text are external collaborators to the
//! throughput core defined here.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod line;
pub mod process;
pub mod scanner;
pub mod stdin_pipeline;
pub mod walk;
pub mod wildcard;

pub use config::{OutputMode, SearcherConfig};
pub use error::SearchError;
pub use scanner::{Scanner, Tier};
