//! Request and response schemas for the JSON API.
//!
//! Request fields are all optional at the serde level so that a missing field
//! is reported with the endpoint's own 400 message rather than a generic
//! deserialisation failure. Scalars of the wrong JSON type are read as text
//! (see [`lenient_string`](crate::model::validation::lenient_string)), so they
//! also reach the endpoint's own validation.

pub mod auth;
pub mod candidate;
pub mod id;
pub mod message;
pub mod voter;
