// Absolute path parsing. Same segment walk as the teacher's
// skipelem/namex (kernel/src/fs/fs.rs), but over owned &str segments
// instead of xv6's C-string-with-null-terminator convention.

use crate::error::{Error, Result};
use crate::layout::DIR_ENTRY_NAME_LEN;

// one byte reserved for the NUL terminator in the 64-byte on-disk name field.
pub const MAX_NAME_LEN: usize = DIR_ENTRY_NAME_LEN - 1;

// Splits an absolute path into the ancestor segments to walk and the final
// ("leaf") segment, which the caller looks up or inserts itself.
//
// "/" splits into (vec![], ""): no ancestors, an empty leaf, meaning "the
// root itself". A trailing slash ("/a/") also produces an empty leaf,
// which is invalid wherever a real name is required (create, open, remove).
pub fn split_path(path: &str) -> Result<(Vec<String>, String)> {
    if path.is_empty() || !path.starts_with('/') {
        return Err(Error::InvalidArgument("path must be absolute"));
    }

    let mut parts: Vec<&str> = path.split('/').collect();
    parts.remove(0); // drop the empty component before the leading '/'

    let leaf = parts.pop().unwrap_or("").to_string();
    let ancestors: Vec<String> = parts
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect();

    for segment in ancestors.iter().chain(std::iter::once(&leaf)) {
        if segment.len() > MAX_NAME_LEN {
            return Err(Error::InvalidArgument("path segment too long"));
        }
    }

    Ok((ancestors, leaf))
}
