use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlignError {
    #[error("failed to open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("i/o failure while reading {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("gold file {} is encoded as {format}, which is not supported; use json or text", .path.display())]
    UnsupportedFormat { path: PathBuf, format: &'static str },

    #[error("malformed reference on line {line} of {}: {reason}", .path.display())]
    MalformedReference {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("attempted to read past the end of {} ({length} samples)", .path.display())]
    EndOfStore { path: PathBuf, length: usize },
}
