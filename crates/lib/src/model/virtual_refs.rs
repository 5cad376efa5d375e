//! Content-addressed host model.
//!
//! Handles are [`HashedVirtualFileRef`]s that only a [`FileConverter`] can
//! turn into paths, attributes are strings and records travel as canonical
//! JSON.

use std::path::{Path, PathBuf};

use tracing::trace;

use super::Compat;
use crate::attributes::{AttributeKey, AttributeStore, AttributeValue, Attributed, StringAttributes};
use crate::host::HostSettings;
use crate::host::credentials::{self, Credentials, CredentialsError, DirectCredentials};
use crate::host::settings::{Scope, ScopedKey, SettingKeyError, SettingsStore};
use crate::record::{DomainRecord, RecordCodec, RecordDecodeError, RecordEncodeError};
use crate::reference::{FileConverter, HashedVirtualFileRef, ReferenceModel, ReferenceResolutionError};

#[derive(Debug, Clone, Copy, Default)]
pub struct Virtual;

impl ReferenceModel for Virtual {
  type Handle = HashedVirtualFileRef;

  fn resolve_path(
    handle: &HashedVirtualFileRef,
    ctx: Option<&dyn FileConverter>,
  ) -> Result<PathBuf, ReferenceResolutionError> {
    let converter = ctx.ok_or(ReferenceResolutionError::MissingContext)?;
    let path = converter.to_path(handle)?;
    trace!(id = %handle.id, path = %path.display(), "resolved virtual reference");
    Ok(path)
  }

  fn to_handle(path: &Path, ctx: Option<&dyn FileConverter>) -> Result<HashedVirtualFileRef, ReferenceResolutionError> {
    let converter = ctx.ok_or(ReferenceResolutionError::MissingContext)?;
    converter.to_virtual_file(path)
  }

  /// The reference's own name, available even when nothing is on disk.
  ///
  /// A bare root reference is named by its id, see [`HashedVirtualFileRef::name`].
  fn name(handle: &HashedVirtualFileRef) -> String {
    handle.name().to_string()
  }
}

impl AttributeStore for Virtual {
  type Attributes = StringAttributes;

  fn put<T: Clone, V: AttributeValue>(
    entry: &Attributed<T, StringAttributes>,
    key: &AttributeKey<V>,
    value: V,
  ) -> Attributed<T, StringAttributes> {
    let mut next = entry.clone();
    next.metadata.insert(key.label(), value.encode());
    next
  }

  fn get<T, V: AttributeValue>(entry: &Attributed<T, StringAttributes>, key: &AttributeKey<V>) -> Option<V> {
    entry.metadata.get(key.label()).and_then(V::decode)
  }
}

impl RecordCodec for Virtual {
  type Encoded<R: DomainRecord> = String;

  fn encode_record<R: DomainRecord>(record: &R) -> Result<String, RecordEncodeError> {
    record.to_canonical_json()
  }

  fn decode_record<R: DomainRecord>(encoded: &String) -> Result<R, RecordDecodeError> {
    R::from_canonical_json(encoded)
  }
}

impl HostSettings for Virtual {
  type SettingKey = String;

  fn credentials_for_host(
    credentials: &[Credentials],
    host: &str,
  ) -> Result<Option<DirectCredentials>, CredentialsError> {
    let direct = credentials::all_direct(credentials)?;
    Ok(credentials::for_host_direct(&direct, host))
  }

  fn setting_key(scope: &Scope, key: &str) -> String {
    ScopedKey::new(scope.clone(), key).composite()
  }

  fn set_setting(store: &SettingsStore, key: &String, value: &str) -> Result<SettingsStore, SettingKeyError> {
    store.set_composite(key, value)
  }

  fn get_setting<'a>(store: &'a SettingsStore, key: &String) -> Result<Option<&'a str>, SettingKeyError> {
    store.get_composite(key)
  }
}

impl Compat for Virtual {
  const NAME: &'static str = "virtual";
}
