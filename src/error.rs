use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no dataset found in any of {} candidate locations (cwd: {})", attempted.len(), cwd.display())]
    NotFound { attempted: Vec<PathBuf>, cwd: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed data in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write load diagnostics: {0}")]
    Output(#[from] io::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("bin configuration needs at least two edges, got {0}")]
    TooFewEdges(usize),

    #[error("bin edges must be strictly ascending ({prev} followed by {next})")]
    NotAscending { prev: u64, next: u64 },

    #[error("expected {expected} bin labels for {edges} edges, got {got}")]
    LabelCount {
        expected: usize,
        edges: usize,
        got: usize,
    },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("column `{0}` has no values")]
    EmptyColumn(&'static str),

    #[error("derived column `{0}` was never added")]
    MissingRangeColumn(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
