//! An lalg compilation error

use lalg_parsing::AnalysisError;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The kind of error
#[derive(Debug, Error)]
pub enum LalgcErrorKind {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// An error occurred while attempting to compile an lalg file
#[derive(Debug, Error)]
pub struct LalgcError {
    #[source]
    kind: LalgcErrorKind,
    path: Option<PathBuf>,
}

impl LalgcError {
    /// Creates a new [LalgcError] using a quick constructor
    #[inline]
    pub fn new(error: impl Into<LalgcErrorKind>, path: impl Into<Option<PathBuf>>) -> Self {
        Self {
            kind: error.into(),
            path: path.into(),
        }
    }

    /// Attaches the path of the file being compiled
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }

    pub fn kind(&self) -> &LalgcErrorKind {
        &self.kind
    }

    /// The file being compiled when the error occurred, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Display for LalgcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{}: ", path.display())?;
        }
        write!(f, "{}", self.kind)
    }
}

impl<T> From<T> for LalgcError
where
    LalgcErrorKind: From<T>,
{
    fn from(value: T) -> Self {
        Self::new(LalgcErrorKind::from(value), None)
    }
}

/// A type alias for general results in lalgc
pub type LalgcResult<T> = Result<T, LalgcError>;
