//! DB-compatible (e.g. de/serialisable) types.
//!
//! Field names are camelCase to stay compatible with existing `votingDB`
//! documents.

pub mod admin;
pub mod candidate;
pub mod voter;
