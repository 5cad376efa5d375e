use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::encoding::{decode_file, decode_files, encode_file, encode_files};

/// A value plus a side channel of named attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Attributed<T, A> {
  pub data: T,
  pub metadata: A,
}

impl<T, A: Default> Attributed<T, A> {
  /// An entry with no attributes.
  pub fn blank(data: T) -> Self {
    Self {
      data,
      metadata: A::default(),
    }
  }
}

impl<T, A: Clone> Attributed<T, A> {
  /// Convert the data, carrying the attributes over unchanged.
  pub fn try_map<U, E>(&self, f: impl FnOnce(&T) -> Result<U, E>) -> Result<Attributed<U, A>, E> {
    Ok(Attributed {
      data: f(&self.data)?,
      metadata: self.metadata.clone(),
    })
  }
}

/// A logically typed attribute key.
///
/// The label is what string storage sees; the type parameter is what typed
/// storage and callers see.
pub struct AttributeKey<V> {
  label: &'static str,
  _value: PhantomData<fn() -> V>,
}

impl<V> AttributeKey<V> {
  pub const fn new(label: &'static str) -> Self {
    Self {
      label,
      _value: PhantomData,
    }
  }

  pub fn label(&self) -> &'static str {
    self.label
  }
}

impl<V> Clone for AttributeKey<V> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<V> Copy for AttributeKey<V> {}

impl<V> fmt::Debug for AttributeKey<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("AttributeKey").field(&self.label).finish()
  }
}

/// A value that can live in either kind of attribute map.
///
/// `decode(encode(v))` is exact for files, file collections, strings and
/// domain records. Values wrapped in [`Lossy`] only promise a best effort.
pub trait AttributeValue: Any + Clone + Send + Sync + fmt::Debug {
  fn encode(&self) -> String;

  /// `None` when `raw` is not a valid encoding.
  fn decode(raw: &str) -> Option<Self>;
}

impl AttributeValue for PathBuf {
  fn encode(&self) -> String {
    encode_file(self)
  }

  fn decode(raw: &str) -> Option<Self> {
    Some(decode_file(raw))
  }
}

impl AttributeValue for Vec<PathBuf> {
  fn encode(&self) -> String {
    encode_files(self)
  }

  fn decode(raw: &str) -> Option<Self> {
    Some(decode_files(raw))
  }
}

impl AttributeValue for String {
  fn encode(&self) -> String {
    self.clone()
  }

  fn decode(raw: &str) -> Option<Self> {
    Some(raw.to_string())
  }
}

/// An arbitrary value stored through its `Display` form.
///
/// String storage writes `to_string()` and reads back with `FromStr`. Nothing
/// guarantees that gives back an equal value: treat these attributes as
/// write-mostly, for diagnostics rather than data exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Lossy<T>(pub T);

impl<T> AttributeValue for Lossy<T>
where
  T: fmt::Display + FromStr + Clone + Send + Sync + fmt::Debug + 'static,
{
  fn encode(&self) -> String {
    self.0.to_string()
  }

  fn decode(raw: &str) -> Option<Self> {
    raw.parse().ok().map(Lossy)
  }
}

/// In-memory attributes holding typed values.
///
/// Entries are keyed by label and value type, so two keys sharing a label
/// but not a type never see each other's values.
#[derive(Clone, Default)]
pub struct TypedAttributes {
  entries: HashMap<(&'static str, TypeId), Arc<dyn Any + Send + Sync>>,
}

impl TypedAttributes {
  pub fn insert<V: AttributeValue>(&mut self, key: &AttributeKey<V>, value: V) {
    self.entries.insert((key.label(), TypeId::of::<V>()), Arc::new(value));
  }

  pub fn get<V: AttributeValue>(&self, key: &AttributeKey<V>) -> Option<&V> {
    self
      .entries
      .get(&(key.label(), TypeId::of::<V>()))
      .and_then(|value| value.downcast_ref::<V>())
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Labels of all stored attributes, sorted.
  pub fn labels(&self) -> Vec<&'static str> {
    let mut labels: Vec<_> = self.entries.keys().map(|(label, _)| *label).collect();
    labels.sort_unstable();
    labels
  }
}

impl fmt::Debug for TypedAttributes {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.labels()).finish()
  }
}

/// String-keyed, string-valued attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringAttributes(BTreeMap<String, String>);

impl StringAttributes {
  pub fn insert(&mut self, label: &str, raw: String) {
    self.0.insert(label.to_string(), raw);
  }

  pub fn get(&self, label: &str) -> Option<&str> {
    self.0.get(label).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
