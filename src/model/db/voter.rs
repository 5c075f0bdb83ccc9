use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::model::{mongodb::Id, validation::IdNumber};

/// Core voter data, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterCore {
    pub id_number: IdNumber,
    pub name: String,
    pub email: String,
    pub province: String,
    /// Set once the voter's ballot has been counted. Never reset.
    #[serde(default)]
    pub has_voted: bool,
}

impl VoterCore {
    /// Create a voter who has not yet voted.
    pub fn new(details: VoterDetails) -> Self {
        Self {
            id_number: details.id_number,
            name: details.name,
            email: details.email,
            province: details.province,
            has_voted: false,
        }
    }
}

/// A voter without an ID.
pub type NewVoter = VoterCore;

/// A voter from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub voter: VoterCore,
}

impl Deref for Voter {
    type Target = VoterCore;

    fn deref(&self) -> &Self::Target {
        &self.voter
    }
}

impl DerefMut for Voter {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.voter
    }
}

/// Validated registration details, i.e. everything about a voter that the
/// voter themselves controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterDetails {
    pub name: String,
    pub email: String,
    pub id_number: IdNumber,
    pub province: String,
}
