// A filesystem over a single 32 MiB block-device backing file: a
// free-block bitmap, an inode table with direct/indirect/double-indirect
// addressing, and fixed-width directory blocks.

mod bitmap;
mod block_store;
mod directory;
mod error;
mod file;
mod fs;
mod layout;
mod path;

pub use error::{Error, Result};
pub use fs::{DirEntryInfo, Fd, FileSystem};
pub use layout::{FileKind, SeekFrom};
