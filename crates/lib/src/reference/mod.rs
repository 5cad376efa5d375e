//! Reference model adapter.
//!
//! Converts between the host's native file identity (`ReferenceModel::Handle`)
//! and concrete filesystem paths. The classic model's handle already is a
//! path; the virtual model's handle is a content-addressed reference that
//! needs a [`FileConverter`] to become one.
//!
//! Collection forms preserve order, and the labelled forms keep each label
//! paired with its entry.

pub mod converter;
pub mod types;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::attributes::types::Attributed;
use crate::util::hash::DirHashError;

pub use types::{FileConverter, HashedVirtualFileRef};

/// A handle cannot be resolved to or from a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceResolutionError {
  /// The virtual model was called without a conversion context.
  #[error("no conversion context supplied")]
  MissingContext,

  /// The id names a root the converter does not know.
  #[error("unknown root '{root}' in virtual id '{id}'")]
  UnknownRoot { root: String, id: String },

  /// The id is not of the form `${ROOT}/rel/path`.
  #[error("malformed virtual id: {0}")]
  MalformedId(String),

  /// The path lives outside every root and machine paths are disabled.
  #[error("path '{0}' is outside every converter root")]
  OutsideRoots(PathBuf),

  /// A machine-specific id was given but machine paths are disabled.
  #[error("machine path '{0}' is not allowed by this converter")]
  MachinePath(String),

  /// The path cannot be represented as a virtual id.
  #[error("path '{0}' is not valid UTF-8")]
  NonUtf8Path(PathBuf),

  /// The content behind the path could not be hashed.
  #[error("failed to hash '{path}': {source}")]
  Content {
    path: PathBuf,
    #[source]
    source: DirHashError,
  },
}

/// Conversion between a host file handle and a concrete path.
///
/// Both implementations expose the same functions so calling code can stay
/// generic over the model. `ctx` is optional: the classic model ignores it,
/// the virtual model fails with [`ReferenceResolutionError::MissingContext`]
/// without it.
pub trait ReferenceModel {
  /// The host's native file identity.
  type Handle: Clone + fmt::Debug + PartialEq + Send + Sync;

  /// Resolve a handle to a concrete path.
  fn resolve_path(handle: &Self::Handle, ctx: Option<&dyn FileConverter>) -> Result<PathBuf, ReferenceResolutionError>;

  /// Obtain the handle that denotes `path`.
  ///
  /// A relative `path` is taken against the working directory. The classic
  /// model keeps it as given; the virtual model resolves it back in absolute
  /// form, so `resolve_path(to_handle(p))` returns `p` itself only when `p`
  /// is absolute.
  fn to_handle(path: &Path, ctx: Option<&dyn FileConverter>) -> Result<Self::Handle, ReferenceResolutionError>;

  /// Display name of a handle: the last segment of what it denotes.
  fn name(handle: &Self::Handle) -> String;

  fn resolve_paths(
    handles: &[Self::Handle],
    ctx: Option<&dyn FileConverter>,
  ) -> Result<Vec<PathBuf>, ReferenceResolutionError> {
    handles.iter().map(|handle| Self::resolve_path(handle, ctx)).collect()
  }

  fn to_handles(paths: &[PathBuf], ctx: Option<&dyn FileConverter>) -> Result<Vec<Self::Handle>, ReferenceResolutionError> {
    paths.iter().map(|path| Self::to_handle(path, ctx)).collect()
  }

  /// Convert `(path, label)` pairs, e.g. packaging mappings.
  fn to_handle_mappings(
    entries: &[(PathBuf, String)],
    ctx: Option<&dyn FileConverter>,
  ) -> Result<Vec<(Self::Handle, String)>, ReferenceResolutionError> {
    entries
      .iter()
      .map(|(path, label)| Self::to_handle(path, ctx).map(|handle| (handle, label.clone())))
      .collect()
  }

  /// Inverse of [`ReferenceModel::to_handle_mappings`].
  fn to_path_mappings(
    entries: &[(Self::Handle, String)],
    ctx: Option<&dyn FileConverter>,
  ) -> Result<Vec<(PathBuf, String)>, ReferenceResolutionError> {
    entries
      .iter()
      .map(|(handle, label)| Self::resolve_path(handle, ctx).map(|path| (path, label.clone())))
      .collect()
  }

  /// Convert an attributed classpath, keeping each entry's metadata.
  fn to_classpath<A: Clone>(
    classpath: &[Attributed<PathBuf, A>],
    ctx: Option<&dyn FileConverter>,
  ) -> Result<Vec<Attributed<Self::Handle, A>>, ReferenceResolutionError> {
    classpath
      .iter()
      .map(|entry| entry.try_map(|path| Self::to_handle(path, ctx)))
      .collect()
  }

  /// Inverse of [`ReferenceModel::to_classpath`].
  fn resolve_classpath<A: Clone>(
    classpath: &[Attributed<Self::Handle, A>],
    ctx: Option<&dyn FileConverter>,
  ) -> Result<Vec<Attributed<PathBuf, A>>, ReferenceResolutionError> {
    classpath
      .iter()
      .map(|entry| entry.try_map(|handle| Self::resolve_path(handle, ctx)))
      .collect()
  }
}
