//! String encoding of file attributes.
//!
//! This is a permanent wire format shared by every version that reads or
//! writes string attributes:
//!
//! - a file is its absolute path string
//! - a file collection is its members' absolute path strings joined with
//!   [`FILE_LIST_SEPARATOR`] (NUL)
//! - an empty collection is the empty string
//!
//! A path containing the separator has no faithful encoding. The encoder
//! logs a warning and writes it anyway; what comes back out is undefined.
//! Non UTF-8 path bytes are replaced lossily.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::consts::FILE_LIST_SEPARATOR;

/// Encode a single file as its absolute path string.
///
/// Relative paths are made absolute against the current directory.
pub fn encode_file(path: &Path) -> String {
  let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
  absolute.to_string_lossy().into_owned()
}

pub fn decode_file(raw: &str) -> PathBuf {
  PathBuf::from(raw)
}

/// Encode a file collection, preserving order.
pub fn encode_files(paths: &[PathBuf]) -> String {
  let encoded: Vec<String> = paths
    .iter()
    .map(|path| {
      let file = encode_file(path);
      if file.contains(FILE_LIST_SEPARATOR) {
        warn!(path = ?path, "path contains the reserved file list separator; encoded value is undefined");
      }
      file
    })
    .collect();

  let separator = FILE_LIST_SEPARATOR.to_string();
  encoded.join(separator.as_str())
}

/// Decode a file collection. The empty string is the empty collection.
pub fn decode_files(raw: &str) -> Vec<PathBuf> {
  if raw.is_empty() {
    return Vec::new();
  }
  raw.split(FILE_LIST_SEPARATOR).map(decode_file).collect()
}
