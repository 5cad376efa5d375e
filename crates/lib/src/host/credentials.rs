//! Repository credentials.
//!
//! Credentials are either given directly or point at a properties file:
//!
//! ```text
//! realm=Sonatype Nexus Repository Manager
//! host=repo.example.com
//! user=deploy
//! password=secret
//! ```
//!
//! `realm` is optional; the other three keys are required.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Credentials for one repository host.
#[derive(Clone, PartialEq, Eq)]
pub struct DirectCredentials {
  pub realm: Option<String>,
  pub host: String,
  pub user_name: String,
  pub passwd: String,
}

impl DirectCredentials {
  pub fn new(realm: Option<&str>, host: &str, user_name: &str, passwd: &str) -> Self {
    Self {
      realm: realm.map(str::to_string),
      host: host.to_string(),
      user_name: user_name.to_string(),
      passwd: passwd.to_string(),
    }
  }
}

impl fmt::Debug for DirectCredentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DirectCredentials")
      .field("realm", &self.realm)
      .field("host", &self.host)
      .field("user_name", &self.user_name)
      .field("passwd", &"****")
      .finish()
  }
}

/// Credentials as a build definition declares them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
  Direct(DirectCredentials),
  File(PathBuf),
}

#[derive(Debug, Error)]
pub enum CredentialsError {
  #[error("failed to read credentials file '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("credentials file '{path}' is missing '{key}'")]
  MissingKey { path: PathBuf, key: &'static str },
}

/// Resolve credentials to their direct form, reading the file if needed.
pub fn to_direct(credentials: &Credentials) -> Result<DirectCredentials, CredentialsError> {
  match credentials {
    Credentials::Direct(direct) => Ok(direct.clone()),
    Credentials::File(path) => load_file(path),
  }
}

/// Resolve every entry to its direct form.
pub fn all_direct(credentials: &[Credentials]) -> Result<Vec<DirectCredentials>, CredentialsError> {
  credentials.iter().map(to_direct).collect()
}

/// First credentials for `host`. No match is `Ok(None)`.
pub fn for_host(credentials: &[Credentials], host: &str) -> Result<Option<DirectCredentials>, CredentialsError> {
  Ok(for_host_direct(&all_direct(credentials)?, host))
}

/// First direct credentials for `host`.
pub fn for_host_direct(credentials: &[DirectCredentials], host: &str) -> Option<DirectCredentials> {
  let found = credentials.iter().find(|c| c.host == host).cloned();
  debug!(host, found = found.is_some(), "credentials lookup");
  found
}

fn load_file(path: &Path) -> Result<DirectCredentials, CredentialsError> {
  let content = fs::read_to_string(path).map_err(|source| CredentialsError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  let mut properties = parse_properties(&content);
  let mut required = |key: &'static str| {
    properties.remove(key).ok_or_else(|| CredentialsError::MissingKey {
      path: path.to_path_buf(),
      key,
    })
  };

  let host = required("host")?;
  let user_name = required("user")?;
  let passwd = required("password")?;

  Ok(DirectCredentials {
    realm: properties.remove("realm"),
    host,
    user_name,
    passwd,
  })
}

/// Parse `key=value` lines. Blank lines and `#`/`!` comments are skipped.
fn parse_properties(content: &str) -> HashMap<String, String> {
  content
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
    .filter_map(|line| line.split_once(['=', ':']))
    .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
    .collect()
}
