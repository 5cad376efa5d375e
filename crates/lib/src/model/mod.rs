//! The two host models and which one is active.
//!
//! [`Classic`] works with concrete paths and typed attributes, [`Virtual`]
//! with content-addressed references and string attributes. Both implement
//! every adapter trait, so code written against [`Compat`] (or against the
//! [`Active`] alias) runs unchanged on either.
//!
//! `Active` is chosen at compile time by the `virtual-refs` cargo feature.

pub mod classic;
pub mod virtual_refs;

pub use classic::Classic;
pub use virtual_refs::Virtual;

use crate::attributes::{AttributeStore, Attributed};
use crate::host::HostSettings;
use crate::record::RecordCodec;
use crate::reference::ReferenceModel;

/// Every adapter of one host model.
pub trait Compat: ReferenceModel + AttributeStore + RecordCodec + HostSettings {
  /// Short model name for diagnostics.
  const NAME: &'static str;
}

/// An attributed entry in model `M`.
pub type Entry<M, T> = Attributed<T, <M as AttributeStore>::Attributes>;

/// An attributed classpath in model `M`.
pub type Classpath<M> = Vec<Entry<M, <M as ReferenceModel>::Handle>>;

#[cfg(feature = "virtual-refs")]
pub type Active = Virtual;

#[cfg(not(feature = "virtual-refs"))]
pub type Active = Classic;
