//! Test utilities for plugcompat-lib.
//!
//! Builds small project trees on disk so converters have real content to hash.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::reference::converter::{ConverterConfig, MappedConverter};

/// A temporary project with a base directory and an output directory.
pub struct Project {
  pub temp: TempDir,
  pub base: PathBuf,
  pub out: PathBuf,
}

impl Project {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let base = temp.path().canonicalize().unwrap().join("project");
    let out = base.join("target").join("out");
    fs::create_dir_all(&out).unwrap();
    Self { temp, base, out }
  }

  /// Write a file relative to `root`, creating parent directories.
  pub fn write(&self, root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
  }

  pub fn converter(&self) -> MappedConverter {
    MappedConverter::new(ConverterConfig::new(self.base.clone(), self.out.clone()))
  }
}

/// Switches the process working directory until dropped.
///
/// Tests using it must be `#[serial]`.
pub struct CurrentDir {
  previous: PathBuf,
}

impl CurrentDir {
  pub fn enter(dir: &Path) -> Self {
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir).unwrap();
    Self { previous }
  }
}

impl Drop for CurrentDir {
  fn drop(&mut self) {
    let _ = std::env::set_current_dir(&self.previous);
  }
}
