//! Serialized record adapter.
//!
//! Domain records (module coordinates, artifact descriptors) are kept typed
//! by the classic model and travel as canonical JSON in the virtual model.
//! Canonical means: fields in declaration order, maps sorted by key, fields
//! at their default value omitted. Decoding is all or nothing; a malformed
//! string never yields a partially filled record.

pub mod types;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

pub use types::{Artifact, Checksum, CrossVersion, ExclusionRule, ModuleId};

/// A serialized record could not be decoded.
#[derive(Debug, Error)]
pub enum RecordDecodeError {
  #[error("malformed {kind} record: {source}")]
  Malformed {
    kind: &'static str,
    #[source]
    source: serde_json::Error,
  },
}

/// A record could not be serialized.
#[derive(Debug, Error)]
#[error("failed to serialize {kind} record: {source}")]
pub struct RecordEncodeError {
  pub kind: &'static str,
  #[source]
  pub source: serde_json::Error,
}

/// A structured value with a canonical string form.
pub trait DomainRecord: Serialize + DeserializeOwned + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
  /// Short name used in error messages.
  const KIND: &'static str;

  fn to_canonical_json(&self) -> Result<String, RecordEncodeError> {
    serde_json::to_string(self).map_err(|source| RecordEncodeError {
      kind: Self::KIND,
      source,
    })
  }

  fn from_canonical_json(raw: &str) -> Result<Self, RecordDecodeError> {
    serde_json::from_str(raw).map_err(|source| RecordDecodeError::Malformed {
      kind: Self::KIND,
      source,
    })
  }
}

/// Conversion of records to and from their transport form.
pub trait RecordCodec {
  /// Transport form of a record of type `R`.
  type Encoded<R: DomainRecord>: Clone + fmt::Debug + PartialEq + Send + Sync;

  fn encode_record<R: DomainRecord>(record: &R) -> Result<Self::Encoded<R>, RecordEncodeError>;

  fn decode_record<R: DomainRecord>(encoded: &Self::Encoded<R>) -> Result<R, RecordDecodeError>;
}

pub(crate) fn encode_record_attribute<R: DomainRecord>(record: &R) -> String {
  match record.to_canonical_json() {
    Ok(json) => json,
    Err(e) => {
      warn!(kind = R::KIND, error = %e, "record attribute stored empty");
      String::new()
    }
  }
}

pub(crate) fn decode_record_attribute<R: DomainRecord>(raw: &str) -> Option<R> {
  match R::from_canonical_json(raw) {
    Ok(record) => Some(record),
    Err(e) => {
      debug!(kind = R::KIND, error = %e, "unreadable record attribute");
      None
    }
  }
}
