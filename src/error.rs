use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

/// Error type for simulator operations.
#[derive(Debug)]
pub enum Error {
    /// physical memory size, page size, or frame capacity unusable
    Configuration(String),
    /// descriptor file could not be opened or read
    Io { path: PathBuf, source: io::Error },
    /// descriptor bytes do not match the wire format
    Format { path: PathBuf },
    /// no free frame left while building a page table
    OutOfFrames,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(reason) => write!(f, "invalid configuration: {reason}"),
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Format { path } => write!(f, "malformed descriptor {}", path.display()),
            Self::OutOfFrames => write!(f, "out of physical frames"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
