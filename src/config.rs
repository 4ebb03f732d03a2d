//! Searcher configuration: a value built once at startup and shared by
//! reference with every worker. No process-wide mutable statics; the
//! run's whole behavior lives in one immutable value.

use crate::wildcard;

/// Default per-file size cap: 400 KiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 400 * 1024;

/// Directory names pruned whole by the walker. Extendable at
/// construction time.
pub const DEFAULT_PRUNED_DIRS: &[&str] = &[
    ".git",
    ".github",
    "build",
    "cmake-build-debug",
    "Debug",
    "Debugs",
    "Release",
    "Releases",
    "Bin",
    "bin",
    ".vscode",
    ".idea",
    "node_modules",
    "__pycache__",
    "doc",
    "docs",
    "Doc",
    "Docs",
    "Documentation",
    "img",
    "images",
    "imgs",
    ".DS_Store",
    "Binaries",
    "Plugins",
    "Content",
    "snap",
    "LICENSES",
    "CMakeFiles",
    "patches",
    "tar-install",
    "install",
    "debugPublic",
    "DebugPublic",
];

/// Filename suffix blacklist: archives, binaries, and media that almost
/// never contain a text match worth scanning for.
pub const DEFAULT_BLACKLISTED_SUFFIXES: &[&str] = &[
    ".a", ".bin", ".bz2", ".cr2", ".crw", ".dll", ".dmg", ".dtb", ".dtbo", ".dwo", ".elf", ".eps",
    ".exe", ".fbx", ".FBX", ".gcno", ".gif", ".gz", ".iso", ".jar", ".jpeg", ".jpg", ".ko", ".lz4",
    ".lzma", ".lzo", ".mod", ".nef", ".o", ".orf", ".pak", ".patch", ".pdb", ".pdf", ".pef", ".pem",
    ".png", ".ply", ".priv", ".pyc", ".qml", ".raw", ".rar", ".s", ".so", ".sql", ".sqlite", ".sr2",
    ".su", ".suo", ".sys", ".tar", ".tif", ".tiff", ".ttf", ".uasset", ".umap", ".user", ".x509",
    ".xz", ".zip", ".zst",
    ".7z", ".bmp", ".psd", ".ai", ".indd", ".lst", ".epf", ".arc", ".meta", ".d", ".gch", ".orig",
    "~",
];

/// Filenames excluded outright regardless of extension.
pub const DEFAULT_BLACKLISTED_FILENAMES: &[&str] = &[
    "Thumbs.db",
    "ehthumbs.db",
    ".Spotlight-V100",
    ".Trashes",
];

/// What a matched line gets reduced to in the output record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Print the full matching line (default).
    Lines,
    /// `-o`: print only the matched substring.
    OnlyMatching,
    /// `-c`: print only the per-file match count.
    Count,
    /// `-l`: print only filenames of files with >=1 match.
    FilesWithMatches,
    /// `-L`: print only filenames of files with 0 matches.
    FilesWithoutMatch,
}

/// Immutable, shared run configuration. Constructed once in `main`, then
/// held by reference by every worker. Never mutated after construction.
pub struct SearcherConfig {
    pub needle: Vec<u8>,
    pub ignore_case: bool,
    pub output_mode: OutputMode,
    pub max_count: Option<usize>,
    pub print_line_numbers: bool,
    pub process_binary_as_text: bool,
    pub is_tty: bool,
    pub worker_count: usize,

    pub filter_glob: String,
    pub include_globs: Vec<String>,
    pub exclude_globs: Vec<String>,

    pub pruned_dirs: Vec<String>,
    pub blacklisted_suffixes: Vec<String>,
    pub blacklisted_filenames: Vec<String>,
    pub max_file_size: u64,
}

impl SearcherConfig {
    pub fn matches_filter(&self, path_str: &str) -> bool {
        wildcard::matches(path_str, &self.filter_glob)
    }

    pub fn is_included(&self, filename: &str) -> bool {
        self.include_globs.is_empty()
            || self.include_globs.iter().any(|p| wildcard::matches(filename, p))
    }

    pub fn is_excluded(&self, filename: &str) -> bool {
        self.exclude_globs.iter().any(|p| wildcard::matches(filename, p))
    }

    pub fn is_pruned_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.pruned_dirs.iter().any(|d| d == name)
    }

    pub fn is_blacklisted_file(&self, name: &str) -> bool {
        if self.blacklisted_filenames.iter().any(|b| b == name) {
            return true;
        }
        self.blacklisted_suffixes.iter().any(|suf| name.ends_with(suf.as_str()))
    }
}
