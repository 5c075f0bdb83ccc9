use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// Core candidate data, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCore {
    /// Display name; also the key voters use to pick the candidate.
    pub name: String,
    /// Base64 image payload, stored exactly as submitted.
    #[serde(default)]
    pub image: Option<String>,
    /// Vote tally. Only ever incremented.
    #[serde(default)]
    pub votes: u64,
}

impl CandidateCore {
    /// Create a candidate with no votes.
    pub fn new(name: String, image: Option<String>) -> Self {
        Self {
            name,
            image,
            votes: 0,
        }
    }
}

/// A candidate without an ID.
pub type NewCandidate = CandidateCore;

/// A candidate from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub candidate: CandidateCore,
}

impl Deref for Candidate {
    type Target = CandidateCore;

    fn deref(&self) -> &Self::Target {
        &self.candidate
    }
}

impl DerefMut for Candidate {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.candidate
    }
}
