use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Which kind of input a failed source was expected to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Document,
    NoiseWords,
    DocumentList,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Document => "document",
            SourceKind::NoiseWords => "noise-word list",
            SourceKind::DocumentList => "document list",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// The named source could not be located.
    #[error("{kind} not found: {}", path.display())]
    NotFound { kind: SourceKind, path: PathBuf },

    #[error("failed to read {kind} {}: {source}", path.display())]
    Io {
        kind: SourceKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Classify an I/O failure on `path`, keeping "not found" distinct from other read errors.
    pub fn from_io(kind: SourceKind, path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        if err.kind() == io::ErrorKind::NotFound {
            Error::NotFound { kind, path }
        } else {
            Error::Io { kind, path, source: err }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
