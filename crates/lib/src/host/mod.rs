//! Host primitives and the adapter that forwards to them.
//!
//! [`credentials`] and [`settings`] stand in for what the build tool provides
//! natively. [`HostSettings`] is the call-shape translation on top of them;
//! it adds no logic of its own.

pub mod credentials;
pub mod settings;

use std::fmt;

use credentials::{Credentials, CredentialsError, DirectCredentials};
use settings::{Scope, SettingKeyError, SettingsStore};

/// Credential lookup and scoped-setting access in the host's own terms.
pub trait HostSettings {
  /// How the host names a single setting.
  type SettingKey: Clone + fmt::Debug + PartialEq + Send + Sync;

  /// Direct credentials for `host`. No match is `Ok(None)`, not an error.
  fn credentials_for_host(
    credentials: &[Credentials],
    host: &str,
  ) -> Result<Option<DirectCredentials>, CredentialsError>;

  fn setting_key(scope: &Scope, key: &str) -> Self::SettingKey;

  /// A copy of `store` with the setting assigned.
  fn set_setting(store: &SettingsStore, key: &Self::SettingKey, value: &str) -> Result<SettingsStore, SettingKeyError>;

  fn get_setting<'a>(store: &'a SettingsStore, key: &Self::SettingKey) -> Result<Option<&'a str>, SettingKeyError>;
}
