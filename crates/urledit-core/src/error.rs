//! Fatal error taxonomy with stable exit codes.

use thiserror::Error;

/// A fatal failure; each category maps to a stable process exit code.
///
/// Messages are preformatted at construction, so `Display` is the exact
/// diagnostic line body the binary prints.
#[derive(Debug, Error)]
pub enum Error {
    /// `--url-file` could not be opened.
    #[error("{0}")]
    File(String),
    /// `--append` directive problem.
    #[error("{0}")]
    Append(String),
    /// A command line option misses its argument.
    #[error("{0}")]
    Arg(String),
    /// Command line flag misuse.
    #[error("{0}")]
    Flag(String),
    /// `--set` directive problem.
    #[error("{0}")]
    Set(String),
    /// The available components do not assemble into a URL.
    #[error("{0}")]
    Url(String),
    /// `--trim` directive problem.
    #[error("{0}")]
    Trim(String),
    /// `--verify` is on and a URL failed to parse.
    #[error("{0}")]
    BadUrl(String),
    /// `--iterate` directive problem.
    #[error("{0}")]
    Iterate(String),
}

impl Error {
    /// Stable process exit code for this category.
    ///
    /// Code 6 is reserved for allocation failure, which in Rust aborts the
    /// process before an error value can exist.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::File(_) => 1,
            Error::Append(_) => 2,
            Error::Arg(_) => 3,
            Error::Flag(_) => 4,
            Error::Set(_) => 5,
            Error::Url(_) => 7,
            Error::Trim(_) => 8,
            Error::BadUrl(_) => 9,
            Error::Iterate(_) => 10,
        }
    }
}
