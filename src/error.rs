//! Error types for side effects that can fail inside a handler
//!
//! None of these escape a handler: each one is rendered into the
//! apologetic response the user hears.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to launch {target}: {source}")]
    Launch {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("could not create notes directory {path}: {source}")]
    NotesDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write {path}: {source}")]
    NoteWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Calc(#[from] crate::calc::CalcError),
}

pub type Result<T> = std::result::Result<T, Error>;
