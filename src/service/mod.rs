//! The operations behind each endpoint, independent of HTTP.
//!
//! Each service validates its input, then reads and writes through a
//! [`Store`](crate::store::Store).

pub mod candidates;
pub mod identity;
pub mod registry;
pub mod voting;
