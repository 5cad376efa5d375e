//! Shared utilities.
//!
//! Content hashing for virtual references and test helpers.

pub mod hash;

#[cfg(test)]
pub mod testutil;
