//! Scoped settings.
//!
//! A setting is identified by a scope and a key name. The scope has three
//! axes (project, configuration, task); an unset axis is `Zero`. The same
//! setting can be named by a single composite string:
//!
//! ```text
//! <project>/<config>/<task>/<key>      root/Compile/Zero/scalacOptions
//! ```
//!
//! Axis and key names cannot contain `/`, and `Zero` is never a name.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::consts::ZERO_AXIS;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingKeyError {
  #[error("malformed setting key '{0}', expected <project>/<config>/<task>/<key>")]
  Malformed(String),

  #[error("invalid segment '{segment}' in setting key '{key}'")]
  InvalidSegment { key: String, segment: String },
}

/// Where a setting applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Scope {
  pub project: Option<String>,
  pub config: Option<String>,
  pub task: Option<String>,
}

impl Scope {
  /// The global scope.
  pub fn zero() -> Self {
    Self::default()
  }

  pub fn project(name: &str) -> Self {
    Self {
      project: Some(name.to_string()),
      ..Self::default()
    }
  }

  pub fn with_config(mut self, config: &str) -> Self {
    self.config = Some(config.to_string());
    self
  }

  pub fn with_task(mut self, task: &str) -> Self {
    self.task = Some(task.to_string());
    self
  }
}

impl fmt::Display for Scope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let axis = |a: &Option<String>| a.clone().unwrap_or_else(|| ZERO_AXIS.to_string());
    write!(f, "{}/{}/{}", axis(&self.project), axis(&self.config), axis(&self.task))
  }
}

/// A setting identified by scope and key name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopedKey {
  pub scope: Scope,
  pub key: String,
}

impl ScopedKey {
  pub fn new(scope: Scope, key: &str) -> Self {
    Self {
      scope,
      key: key.to_string(),
    }
  }

  /// The single-string name of this key.
  pub fn composite(&self) -> String {
    format!("{}/{}", self.scope, self.key)
  }

  /// Parse a composite key.
  pub fn parse_composite(raw: &str) -> Result<Self, SettingKeyError> {
    let segments: Vec<&str> = raw.split('/').collect();
    let [project, config, task, key] = segments[..] else {
      return Err(SettingKeyError::Malformed(raw.to_string()));
    };

    let invalid = |segment: &str| SettingKeyError::InvalidSegment {
      key: raw.to_string(),
      segment: segment.to_string(),
    };

    let axis = |segment: &str| -> Result<Option<String>, SettingKeyError> {
      match segment {
        "" => Err(invalid(segment)),
        ZERO_AXIS => Ok(None),
        name => Ok(Some(name.to_string())),
      }
    };

    if key.is_empty() || key == ZERO_AXIS {
      return Err(invalid(key));
    }

    Ok(Self {
      scope: Scope {
        project: axis(project)?,
        config: axis(config)?,
        task: axis(task)?,
      },
      key: key.to_string(),
    })
  }
}

impl fmt::Display for ScopedKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.composite())
  }
}

/// The host's settings, keyed by scoped key.
///
/// Updates return a new store and leave the original untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsStore {
  entries: BTreeMap<ScopedKey, String>,
}

impl SettingsStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, key: &ScopedKey) -> Option<&str> {
    self.entries.get(key).map(String::as_str)
  }

  pub fn set(&self, key: ScopedKey, value: &str) -> SettingsStore {
    let mut next = self.clone();
    next.entries.insert(key, value.to_string());
    next
  }

  pub fn get_composite(&self, key: &str) -> Result<Option<&str>, SettingKeyError> {
    Ok(self.get(&ScopedKey::parse_composite(key)?))
  }

  pub fn set_composite(&self, key: &str, value: &str) -> Result<SettingsStore, SettingKeyError> {
    Ok(self.set(ScopedKey::parse_composite(key)?, value))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
