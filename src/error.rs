// Nothing in this crate panics on bad input or a full device; every
// operation returns Result instead.

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("no such file or directory")]
    NotFound,

    #[error("file or directory already exists")]
    AlreadyExists,

    #[error("not a directory")]
    NotADirectory,

    #[error("is a directory")]
    IsADirectory,

    #[error("directory not empty")]
    NotEmpty,

    #[error("no space left on device")]
    OutOfSpace,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // wrong image size, a referenced block marked free, etc.
    #[error("filesystem image is corrupt: {0}")]
    Corruption(&'static str),
}
