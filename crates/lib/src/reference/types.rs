use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ReferenceResolutionError;
use crate::util::hash::ContentHash;

/// A content-addressed reference to a file that may not exist on disk.
///
/// `id` is relative to a named root (`${OUT}/classes/Main.class`) or, when
/// the converter allows it, an absolute machine path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashedVirtualFileRef {
  pub id: String,
  pub content_hash: ContentHash,
  pub size_bytes: u64,
}

impl HashedVirtualFileRef {
  pub fn new(id: impl Into<String>, content_hash: ContentHash, size_bytes: u64) -> Self {
    Self {
      id: id.into(),
      content_hash,
      size_bytes,
    }
  }

  /// Last segment of the id.
  ///
  /// A bare root id such as `${OUT}` has no segment of its own and is its own
  /// name. The directory the root maps to is only known to a converter, so
  /// this differs from the classic model's name for that directory.
  pub fn name(&self) -> &str {
    self.id.rsplit('/').next().unwrap_or(&self.id)
  }
}

impl fmt::Display for HashedVirtualFileRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.id)
  }
}

/// Host capability translating between virtual references and paths.
///
/// Supplied by the host for each build invocation and passed through on
/// every call that needs it. Implementations shared across threads must be
/// safe for concurrent reads.
pub trait FileConverter {
  /// Concrete location of a reference.
  fn to_path(&self, reference: &HashedVirtualFileRef) -> Result<PathBuf, ReferenceResolutionError>;

  /// Reference for the content currently at `path`.
  fn to_virtual_file(&self, path: &Path) -> Result<HashedVirtualFileRef, ReferenceResolutionError>;
}
