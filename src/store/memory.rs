use std::sync::Arc;

use rocket::tokio::sync::Mutex;

use crate::{
    error::{Error, Result},
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

use super::Store;

/// A [`Store`] that keeps everything in process memory.
///
/// Clones share the same data. Every operation holds a single lock for its
/// whole duration, so each one is atomic, and uniqueness of voter ID numbers
/// and emails is enforced the same way the MongoDB indexes enforce it.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<Collections>>,
}

#[derive(Default)]
struct Collections {
    admins: Vec<Admin>,
    voters: Vec<Voter>,
    candidates: Vec<Candidate>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all voters, in insertion order.
    pub async fn voters(&self) -> Vec<Voter> {
        self.collections.lock().await.voters.clone()
    }

    /// Snapshot of all admins, in insertion order.
    pub async fn admins(&self) -> Vec<Admin> {
        self.collections.lock().await.admins.clone()
    }
}

#[rocket::async_trait]
impl Store for MemoryStore {
    async fn voter_by_email(&self, email: &str) -> Result<Option<Voter>> {
        let collections = self.collections.lock().await;
        Ok(collections
            .voters
            .iter()
            .find(|voter| voter.email == email)
            .cloned())
    }

    async fn voter_by_id_number(&self, id_number: &IdNumber) -> Result<Option<Voter>> {
        let collections = self.collections.lock().await;
        Ok(collections
            .voters
            .iter()
            .find(|voter| &voter.id_number == id_number)
            .cloned())
    }

    async fn update_voter(&self, details: &VoterDetails) -> Result<()> {
        let mut collections = self.collections.lock().await;
        let taken = collections
            .voters
            .iter()
            .any(|voter| voter.id_number == details.id_number && voter.email != details.email);
        if taken {
            return Err(Error::DuplicateId);
        }
        if let Some(voter) = collections
            .voters
            .iter_mut()
            .find(|voter| voter.email == details.email)
        {
            voter.name = details.name.clone();
            voter.id_number = details.id_number.clone();
            voter.province = details.province.clone();
        }
        Ok(())
    }

    async fn insert_voter(&self, voter: &NewVoter) -> Result<()> {
        let mut collections = self.collections.lock().await;
        for existing in &collections.voters {
            if existing.id_number == voter.id_number {
                return Err(Error::DuplicateId);
            }
            if existing.email == voter.email {
                return Err(Error::DuplicateEmail);
            }
        }
        collections.voters.push(Voter {
            id: Id::new(),
            voter: voter.clone(),
        });
        Ok(())
    }

    async fn admin_by_id_number(&self, id_number: &IdNumber) -> Result<Option<Admin>> {
        let collections = self.collections.lock().await;
        Ok(collections
            .admins
            .iter()
            .find(|admin| &admin.id_number == id_number)
            .cloned())
    }

    async fn seed_admins(&self, admins: &[NewAdmin]) -> Result<usize> {
        let mut collections = self.collections.lock().await;
        if !collections.admins.is_empty() {
            return Ok(0);
        }
        collections
            .admins
            .extend(admins.iter().cloned().map(|admin| Admin {
                id: Id::new(),
                admin,
            }));
        Ok(admins.len())
    }

    async fn insert_candidate(&self, candidate: &NewCandidate) -> Result<Id> {
        let id = Id::new();
        self.collections.lock().await.candidates.push(Candidate {
            id,
            candidate: candidate.clone(),
        });
        Ok(id)
    }

    async fn delete_candidate(&self, id: Id) -> Result<bool> {
        let mut collections = self.collections.lock().await;
        let before = collections.candidates.len();
        collections.candidates.retain(|candidate| candidate.id != id);
        Ok(collections.candidates.len() < before)
    }

    async fn candidates(&self) -> Result<Vec<Candidate>> {
        Ok(self.collections.lock().await.candidates.clone())
    }

    async fn cast_vote(&self, id_number: &IdNumber, candidate_name: &str) -> Result<()> {
        let mut collections = self.collections.lock().await;
        let Collections {
            voters, candidates, ..
        } = &mut *collections;

        let voter = voters
            .iter_mut()
            .find(|voter| &voter.id_number == id_number)
            .ok_or(Error::VoterNotFound)?;
        if voter.has_voted {
            return Err(Error::AlreadyVoted);
        }
        let candidate = candidates
            .iter_mut()
            .find(|candidate| candidate.name == candidate_name)
            .ok_or_else(|| Error::CandidateNotFound(candidate_name.to_string()))?;

        candidate.votes += 1;
        voter.has_voted = true;
        Ok(())
    }
}
