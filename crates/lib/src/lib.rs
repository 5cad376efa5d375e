//! plugcompat-lib: one plugin codebase, two host file models.
//!
//! This crate provides the adapter a build plugin calls instead of the host
//! API directly:
//! - `reference`: host file handles to and from concrete paths
//! - `attributes`: typed values in an entry's attribute map
//! - `record`: domain records to and from their transport form
//! - `host`: credential lookup and scoped settings
//! - `model`: the classic and virtual implementations, and which is active
//!
//! Calling code is written once, generic over `model::Compat` or against
//! `model::Active`, and behaves the same under either host model.

pub mod attributes;
pub mod consts;
pub mod host;
pub mod model;
pub mod record;
pub mod reference;
pub mod util;
