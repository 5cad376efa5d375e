//! Attributed store adapter.
//!
//! Reads and writes typed values in the attribute map attached to an
//! [`Attributed`] entry. The classic model keeps values as they are; the
//! virtual model keeps their string encoding (see [`encoding`]) under the
//! key's label. Either way `get(put(entry, k, v), k) == Some(v)` for files,
//! file collections, strings and domain records.

pub mod encoding;
pub mod keys;
pub mod types;

use std::fmt;

pub use types::{AttributeKey, AttributeValue, Attributed, Lossy, StringAttributes, TypedAttributes};

/// Typed access to an entry's attributes.
pub trait AttributeStore {
  /// Storage behind an entry's metadata.
  type Attributes: Clone + Default + fmt::Debug + Send + Sync;

  /// A copy of `entry` with `key` set to `value`. `entry` is untouched.
  fn put<T: Clone, V: AttributeValue>(
    entry: &Attributed<T, Self::Attributes>,
    key: &AttributeKey<V>,
    value: V,
  ) -> Attributed<T, Self::Attributes>;

  /// The value under `key`, if present and readable as `V`.
  fn get<T, V: AttributeValue>(entry: &Attributed<T, Self::Attributes>, key: &AttributeKey<V>) -> Option<V>;

  /// An entry without attributes.
  fn blank<T>(data: T) -> Attributed<T, Self::Attributes> {
    Attributed::blank(data)
  }
}
