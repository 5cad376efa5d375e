//! Path-based host model.
//!
//! Handles are paths, attributes are typed values and records stay typed, so
//! every conversion is the identity and nothing here can fail to resolve.

use std::path::{Path, PathBuf};

use super::Compat;
use crate::attributes::{AttributeKey, AttributeStore, AttributeValue, Attributed, TypedAttributes};
use crate::host::HostSettings;
use crate::host::credentials::{self, Credentials, CredentialsError, DirectCredentials};
use crate::host::settings::{Scope, ScopedKey, SettingKeyError, SettingsStore};
use crate::record::{DomainRecord, RecordCodec, RecordDecodeError, RecordEncodeError};
use crate::reference::{FileConverter, ReferenceModel, ReferenceResolutionError};

#[derive(Debug, Clone, Copy, Default)]
pub struct Classic;

impl ReferenceModel for Classic {
  type Handle = PathBuf;

  fn resolve_path(handle: &PathBuf, _ctx: Option<&dyn FileConverter>) -> Result<PathBuf, ReferenceResolutionError> {
    Ok(handle.clone())
  }

  fn to_handle(path: &Path, _ctx: Option<&dyn FileConverter>) -> Result<PathBuf, ReferenceResolutionError> {
    Ok(path.to_path_buf())
  }

  /// Last path segment, or empty for a path without one (`/`, `..`).
  fn name(handle: &PathBuf) -> String {
    handle
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_default()
  }
}

impl AttributeStore for Classic {
  type Attributes = TypedAttributes;

  fn put<T: Clone, V: AttributeValue>(
    entry: &Attributed<T, TypedAttributes>,
    key: &AttributeKey<V>,
    value: V,
  ) -> Attributed<T, TypedAttributes> {
    let mut next = entry.clone();
    next.metadata.insert(key, value);
    next
  }

  fn get<T, V: AttributeValue>(entry: &Attributed<T, TypedAttributes>, key: &AttributeKey<V>) -> Option<V> {
    entry.metadata.get(key).cloned()
  }
}

impl RecordCodec for Classic {
  type Encoded<R: DomainRecord> = R;

  fn encode_record<R: DomainRecord>(record: &R) -> Result<R, RecordEncodeError> {
    Ok(record.clone())
  }

  fn decode_record<R: DomainRecord>(encoded: &R) -> Result<R, RecordDecodeError> {
    Ok(encoded.clone())
  }
}

impl HostSettings for Classic {
  type SettingKey = ScopedKey;

  fn credentials_for_host(
    credentials: &[Credentials],
    host: &str,
  ) -> Result<Option<DirectCredentials>, CredentialsError> {
    credentials::for_host(credentials, host)
  }

  fn setting_key(scope: &Scope, key: &str) -> ScopedKey {
    ScopedKey::new(scope.clone(), key)
  }

  fn set_setting(store: &SettingsStore, key: &ScopedKey, value: &str) -> Result<SettingsStore, SettingKeyError> {
    Ok(store.set(key.clone(), value))
  }

  fn get_setting<'a>(store: &'a SettingsStore, key: &ScopedKey) -> Result<Option<&'a str>, SettingKeyError> {
    Ok(store.get(key))
  }
}

impl Compat for Classic {
  const NAME: &'static str = "classic";
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::attributes::Lossy;
  use crate::attributes::keys::{ANALYSIS, CONFIGURATION, MODULE_ID};
  use crate::record::ModuleId;

  const CLASS_DIRS: AttributeKey<Vec<PathBuf>> = AttributeKey::new("classDirectories");

  #[test]
  fn conversions_are_identity_without_context() {
    let path = PathBuf::from("/work/a/b/report.txt");
    let handle = Classic::to_handle(&path, None).unwrap();

    assert_eq!(handle, path);
    assert_eq!(Classic::resolve_path(&handle, None).unwrap(), path);
  }

  #[test]
  fn name_is_last_segment() {
    assert_eq!(Classic::name(&PathBuf::from("/work/a/b/report.txt")), "report.txt");
    assert_eq!(Classic::name(&PathBuf::from("/")), "");
  }

  #[test]
  fn mappings_keep_labels_and_order() {
    let mappings = vec![
      (PathBuf::from("/out/b.class"), "b.class".to_string()),
      (PathBuf::from("/out/a.class"), "pkg/a.class".to_string()),
    ];

    let handles = Classic::to_handle_mappings(&mappings, None).unwrap();
    assert_eq!(Classic::to_path_mappings(&handles, None).unwrap(), mappings);
  }

  #[test]
  fn typed_values_are_stored_as_is() {
    let entry = Classic::blank(PathBuf::from("/out/classes"));
    let module = ModuleId::new("org.example", "core", "1.0");
    let dirs = vec![PathBuf::from("/out/classes"), PathBuf::from("/out/resources")];

    let entry = Classic::put(&entry, &MODULE_ID, module.clone());
    let entry = Classic::put(&entry, &CONFIGURATION, "compile".to_string());
    let entry = Classic::put(&entry, &CLASS_DIRS, dirs.clone());

    assert_eq!(Classic::get(&entry, &MODULE_ID), Some(module));
    assert_eq!(Classic::get(&entry, &CONFIGURATION), Some("compile".to_string()));
    assert_eq!(Classic::get(&entry, &CLASS_DIRS), Some(dirs));
    assert_eq!(Classic::get(&entry, &ANALYSIS), None);
  }

  #[test]
  fn lossy_values_are_exact_in_typed_storage() {
    const RATIO: AttributeKey<Lossy<f64>> = AttributeKey::new("ratio");
    let entry = Classic::put(&Classic::blank(()), &RATIO, Lossy(0.1 + 0.2));
    assert_eq!(Classic::get(&entry, &RATIO), Some(Lossy(0.1 + 0.2)));
  }

  #[test]
  fn put_does_not_touch_the_original() {
    let entry = Classic::blank(PathBuf::from("/out/classes"));
    let _ = Classic::put(&entry, &CONFIGURATION, "test".to_string());
    assert!(entry.metadata.is_empty());
  }

  #[test]
  fn records_are_kept_typed() {
    let module = ModuleId::new("org.example", "core", "1.0");
    let encoded: ModuleId = Classic::encode_record(&module).unwrap();
    assert_eq!(encoded, module);
    assert_eq!(Classic::decode_record(&encoded).unwrap(), module);
  }

  #[test]
  fn settings_use_scoped_keys() {
    let key = Classic::setting_key(&Scope::project("root").with_config("Compile"), "javacOptions");
    let store = Classic::set_setting(&SettingsStore::new(), &key, "-Xlint").unwrap();

    assert_eq!(key.composite(), "root/Compile/Zero/javacOptions");
    assert_eq!(Classic::get_setting(&store, &key).unwrap(), Some("-Xlint"));
  }
}
