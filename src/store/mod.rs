//! Persistence for voters, admins and candidates.
//!
//! Services only ever see a [`Store`]. The server runs on [`MongoStore`];
//! [`MemoryStore`] holds the same collections in process memory and backs the
//! test suite.

use std::sync::Arc;

use crate::{
    error::Result,
    model::{
        db::{
            admin::{Admin, NewAdmin},
            candidate::{Candidate, NewCandidate},
            voter::{NewVoter, Voter, VoterDetails},
        },
        mongodb::Id,
        validation::IdNumber,
    },
};

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Shared handle on the store, as held in Rocket's managed state.
pub type StoreHandle = Arc<dyn Store>;

#[rocket::async_trait]
pub trait Store: Send + Sync {
    async fn voter_by_email(&self, email: &str) -> Result<Option<Voter>>;

    async fn voter_by_id_number(&self, id_number: &IdNumber) -> Result<Option<Voter>>;

    /// Overwrite the name, ID number and province of the voter with the
    /// given email. `hasVoted` is left untouched.
    ///
    /// Fails with [`Error::DuplicateId`](crate::error::Error::DuplicateId) if
    /// another voter already holds the new ID number.
    async fn update_voter(&self, details: &VoterDetails) -> Result<()>;

    /// Fails with [`Error::DuplicateId`](crate::error::Error::DuplicateId) if
    /// the ID number is already taken, else with
    /// [`Error::DuplicateEmail`](crate::error::Error::DuplicateEmail) if the
    /// email is.
    async fn insert_voter(&self, voter: &NewVoter) -> Result<()>;

    async fn admin_by_id_number(&self, id_number: &IdNumber) -> Result<Option<Admin>>;

    /// Insert the given admins iff there are no admins yet. Returns how many
    /// were inserted.
    async fn seed_admins(&self, admins: &[NewAdmin]) -> Result<usize>;

    async fn insert_candidate(&self, candidate: &NewCandidate) -> Result<Id>;

    /// Returns whether a candidate was deleted.
    async fn delete_candidate(&self, id: Id) -> Result<bool>;

    /// All candidates, in insertion order.
    async fn candidates(&self) -> Result<Vec<Candidate>>;

    /// Record a vote by the given voter for the named candidate.
    ///
    /// Both the tally increment and the voter's `hasVoted` flag are applied,
    /// or neither is. Fails with `VoterNotFound`, `AlreadyVoted` or
    /// `CandidateNotFound` (checked in that order) without changing anything.
    async fn cast_vote(&self, id_number: &IdNumber, candidate_name: &str) -> Result<()>;
}
