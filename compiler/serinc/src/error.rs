//! Front-end errors.
//!
//! Problems with the user's C# code are diagnostics, not errors. These cover
//! everything that stops a command from running at all.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read `{}`: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write `{}`: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),

    #[error("no such file or directory: `{}`", .0.display())]
    NotFound(PathBuf),

    #[error("no `.cs` files found")]
    NoSources,

    #[error("missing value for `{0}`")]
    MissingValue(String),

    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("invalid color mode `{0}` (expected auto, always or never)")]
    InvalidColor(String),

    #[error("unknown error code `{0}`")]
    UnknownCode(String),

    #[error("cannot serialize analysis: {0}")]
    Json(#[from] serde_json::Error),
}
