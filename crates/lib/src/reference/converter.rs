//! Root-mapped file converter.
//!
//! Maps named roots to directories so that virtual ids stay independent of
//! where a project is checked out:
//!
//! ```text
//! BASE = /home/user/project              ${BASE}/src/main/App.java
//! OUT  = /home/user/project/target/out   ${OUT}/classes/App.class
//! ```
//!
//! The longest matching root wins, so `OUT` nested under `BASE` produces
//! `${OUT}/...` ids. Paths outside every root are rejected unless machine
//! paths are allowed, in which case the absolute path itself is the id.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace};

use super::{FileConverter, HashedVirtualFileRef, ReferenceResolutionError};
use crate::consts::{BASE_ROOT, ENV_ALLOW_MACHINE_PATH, ENV_BASE, ENV_OUT, OUT_ROOT, ROOT_ID_PREFIX, ROOT_ID_SUFFIX};
use crate::util::hash::hash_path;

/// Roots and policy of a [`MappedConverter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
  /// Root name to directory.
  pub roots: BTreeMap<String, PathBuf>,
  /// Accept paths outside every root, using the absolute path as id.
  pub allow_machine_path: bool,
}

impl ConverterConfig {
  /// Config with the standard `BASE` and `OUT` roots.
  pub fn new(base: PathBuf, out: PathBuf) -> Self {
    let mut roots = BTreeMap::new();
    roots.insert(BASE_ROOT.to_string(), base);
    roots.insert(OUT_ROOT.to_string(), out);
    Self {
      roots,
      allow_machine_path: false,
    }
  }

  /// Config from the environment.
  ///
  /// - `PLUGCOMPAT_BASE`: project base (default: current directory)
  /// - `PLUGCOMPAT_OUT`: output directory (default: `<base>/target/out`)
  /// - `PLUGCOMPAT_ALLOW_MACHINE_PATH`: `1` or `true` to accept outside paths
  pub fn current() -> Self {
    let base = std::env::var(ENV_BASE)
      .map(PathBuf::from)
      .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let out = std::env::var(ENV_OUT)
      .map(PathBuf::from)
      .unwrap_or_else(|_| base.join("target").join("out"));
    let allow_machine_path = std::env::var(ENV_ALLOW_MACHINE_PATH)
      .map(|v| matches!(v.as_str(), "1" | "true"))
      .unwrap_or(false);

    Self::new(base, out).with_machine_paths(allow_machine_path)
  }

  /// Add or replace a root.
  pub fn with_root(mut self, name: &str, dir: PathBuf) -> Self {
    self.roots.insert(name.to_string(), dir);
    self
  }

  pub fn with_machine_paths(mut self, allow: bool) -> Self {
    self.allow_machine_path = allow;
    self
  }
}

/// A [`FileConverter`] backed by named root directories.
#[derive(Debug, Clone)]
pub struct MappedConverter {
  config: ConverterConfig,
}

impl MappedConverter {
  pub fn new(config: ConverterConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &ConverterConfig {
    &self.config
  }

  /// Virtual id for a path, without touching the filesystem.
  pub fn id_for(&self, path: &Path) -> Result<String, ReferenceResolutionError> {
    let path = std::path::absolute(path).map_err(|_| ReferenceResolutionError::OutsideRoots(path.to_path_buf()))?;

    let best = self
      .config
      .roots
      .iter()
      .map(|(name, dir)| (name, absolute_dir(dir)))
      .filter(|(_, dir)| path.starts_with(dir))
      .max_by_key(|(_, dir)| dir.components().count());

    if let Some((name, dir)) = best {
      let relative = path.strip_prefix(&dir).unwrap_or(&path);
      let mut id = format!("{ROOT_ID_PREFIX}{name}{ROOT_ID_SUFFIX}");
      for component in relative.components() {
        let segment = component
          .as_os_str()
          .to_str()
          .ok_or_else(|| ReferenceResolutionError::NonUtf8Path(path.clone()))?;
        id.push('/');
        id.push_str(segment);
      }
      trace!(path = %path.display(), id = %id, "mapped path to root");
      return Ok(id);
    }

    if !self.config.allow_machine_path {
      return Err(ReferenceResolutionError::OutsideRoots(path));
    }

    path
      .to_str()
      .map(str::to_string)
      .ok_or(ReferenceResolutionError::NonUtf8Path(path.clone()))
  }

  /// Concrete path for a virtual id, without touching the filesystem.
  pub fn path_for(&self, id: &str) -> Result<PathBuf, ReferenceResolutionError> {
    let Some(rest) = id.strip_prefix(ROOT_ID_PREFIX) else {
      return self.machine_path(id);
    };

    let (root, relative) = rest
      .split_once(ROOT_ID_SUFFIX)
      .ok_or_else(|| ReferenceResolutionError::MalformedId(id.to_string()))?;

    if !relative.is_empty() && !relative.starts_with('/') {
      return Err(ReferenceResolutionError::MalformedId(id.to_string()));
    }

    let dir = self
      .config
      .roots
      .get(root)
      .ok_or_else(|| ReferenceResolutionError::UnknownRoot {
        root: root.to_string(),
        id: id.to_string(),
      })?;

    let mut path = absolute_dir(dir);
    for segment in relative.split('/').filter(|s| !s.is_empty()) {
      path.push(segment);
    }
    Ok(path)
  }

  fn machine_path(&self, id: &str) -> Result<PathBuf, ReferenceResolutionError> {
    let path = PathBuf::from(id);
    let absolute = path.components().next().is_some_and(|c| matches!(c, Component::RootDir | Component::Prefix(_)));

    if !absolute {
      return Err(ReferenceResolutionError::MalformedId(id.to_string()));
    }
    if !self.config.allow_machine_path {
      return Err(ReferenceResolutionError::MachinePath(id.to_string()));
    }
    Ok(path)
  }
}

/// Roots may be configured relative to the working directory.
fn absolute_dir(dir: &Path) -> PathBuf {
  std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf())
}

impl FileConverter for MappedConverter {
  fn to_path(&self, reference: &HashedVirtualFileRef) -> Result<PathBuf, ReferenceResolutionError> {
    self.path_for(&reference.id)
  }

  fn to_virtual_file(&self, path: &Path) -> Result<HashedVirtualFileRef, ReferenceResolutionError> {
    let id = self.id_for(path)?;
    let (content_hash, size_bytes) = hash_path(path).map_err(|source| ReferenceResolutionError::Content {
      path: path.to_path_buf(),
      source,
    })?;

    debug!(id = %id, hash = %content_hash, size = size_bytes, "hashed virtual file");
    Ok(HashedVirtualFileRef::new(id, content_hash, size_bytes))
  }
}
