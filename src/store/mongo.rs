use std::time::Duration;

use log::{debug, warn};
use mongodb::{
    bson::doc,
    error::{Error as DbError, TRANSIENT_TRANSACTION_ERROR},
    Client, ClientSession, Database,
};
use rocket::{futures::TryStreamExt, tokio::time::sleep};

use crate::{
    error::{Error, Result},
    model::{
        db::{
            admin::{Admin, NewAdmin},
            candidate::{Candidate, NewCandidate},
            voter::{NewVoter, Voter, VoterDetails},
        },
        mongodb::{errors::duplicate_key_index, Coll, Id},
        validation::IdNumber,
    },
};

use super::Store;

/// How many times a vote transaction is attempted when the server reports a
/// transient failure (e.g. a write conflict with a concurrent vote).
const MAX_TRANSACTION_ATTEMPTS: u32 = 5;

/// Pause before retry `n` is `n` times this.
const RETRY_BACKOFF: Duration = Duration::from_millis(20);

/// A [`Store`] backed by a MongoDB database.
///
/// Votes use a multi-document transaction, so the deployment must be a
/// replica set or sharded cluster.
pub struct MongoStore {
    client: Client,
    admins: Coll<Admin>,
    new_admins: Coll<NewAdmin>,
    voters: Coll<Voter>,
    new_voters: Coll<NewVoter>,
    candidates: Coll<Candidate>,
    new_candidates: Coll<NewCandidate>,
}

impl MongoStore {
    /// Wrap the given database, which must belong to `client`.
    pub fn new(client: Client, db: &Database) -> Self {
        Self {
            client,
            admins: Coll::from_db(db),
            new_admins: Coll::from_db(db),
            voters: Coll::from_db(db),
            new_voters: Coll::from_db(db),
            candidates: Coll::from_db(db),
            new_candidates: Coll::from_db(db),
        }
    }

    /// The vote itself, run inside an already-started transaction.
    async fn vote_in_transaction(
        &self,
        session: &mut ClientSession,
        id_number: &IdNumber,
        candidate_name: &str,
    ) -> Result<()> {
        let voter = self
            .voters
            .find_one_with_session(doc! { "idNumber": id_number.as_str() }, None, session)
            .await?
            .ok_or(Error::VoterNotFound)?;
        if voter.has_voted {
            return Err(Error::AlreadyVoted);
        }

        let candidate = self
            .candidates
            .find_one_with_session(doc! { "name": candidate_name }, None, session)
            .await?
            .ok_or_else(|| Error::CandidateNotFound(candidate_name.to_string()))?;

        // Conditional on the flag still being clear, so a racing vote by the
        // same voter cannot also get through.
        let claim = doc! {
            "_id": *voter.id,
            "hasVoted": false,
        };
        let update = doc! {
            "$set": { "hasVoted": true }
        };
        let result = self
            .voters
            .update_one_with_session(claim, update, None, session)
            .await?;
        if result.modified_count != 1 {
            return Err(Error::AlreadyVoted);
        }

        let update = doc! {
            "$inc": { "votes": 1 }
        };
        let result = self
            .candidates
            .update_one_with_session(candidate.id.as_doc(), update, None, session)
            .await?;
        if result.matched_count != 1 {
            return Err(Error::CandidateNotFound(candidate_name.to_string()));
        }

        Ok(())
    }
}

/// Report unique index violations on the voters collection by the key that
/// collided.
fn duplicate_voter(err: DbError) -> Error {
    match duplicate_key_index(&err) {
        Some(index) if index.starts_with("email") => Error::DuplicateEmail,
        Some(_) => Error::DuplicateId,
        None => Error::Db(err),
    }
}

#[rocket::async_trait]
impl Store for MongoStore {
    async fn voter_by_email(&self, email: &str) -> Result<Option<Voter>> {
        Ok(self.voters.find_one(doc! { "email": email }, None).await?)
    }

    async fn voter_by_id_number(&self, id_number: &IdNumber) -> Result<Option<Voter>> {
        let filter = doc! { "idNumber": id_number.as_str() };
        Ok(self.voters.find_one(filter, None).await?)
    }

    async fn update_voter(&self, details: &VoterDetails) -> Result<()> {
        let filter = doc! { "email": &details.email };
        let update = doc! {
            "$set": {
                "name": &details.name,
                "idNumber": details.id_number.as_str(),
                "province": &details.province,
            }
        };
        self.voters
            .update_one(filter, update, None)
            .await
            .map_err(duplicate_voter)?;
        Ok(())
    }

    async fn insert_voter(&self, voter: &NewVoter) -> Result<()> {
        self.new_voters
            .insert_one(voter, None)
            .await
            .map_err(duplicate_voter)?;
        Ok(())
    }

    async fn admin_by_id_number(&self, id_number: &IdNumber) -> Result<Option<Admin>> {
        let filter = doc! { "idNumber": id_number.as_str() };
        Ok(self.admins.find_one(filter, None).await?)
    }

    async fn seed_admins(&self, admins: &[NewAdmin]) -> Result<usize> {
        if admins.is_empty() {
            return Ok(0);
        }
        let existing = self.admins.count_documents(None, None).await?;
        if existing > 0 {
            debug!("Admins collection already populated ({existing}), not seeding");
            return Ok(0);
        }
        let result = self.new_admins.insert_many(admins, None).await?;
        Ok(result.inserted_ids.len())
    }

    async fn insert_candidate(&self, candidate: &NewCandidate) -> Result<Id> {
        let id: Id = self
            .new_candidates
            .insert_one(candidate, None)
            .await?
            .inserted_id
            .as_object_id()
            .unwrap() // Valid because the driver generates an ObjectId `_id`.
            .into();
        Ok(id)
    }

    async fn delete_candidate(&self, id: Id) -> Result<bool> {
        let result = self.candidates.delete_one(id.as_doc(), None).await?;
        Ok(result.deleted_count > 0)
    }

    async fn candidates(&self) -> Result<Vec<Candidate>> {
        let candidates: Vec<Candidate> =
            self.candidates.find(None, None).await?.try_collect().await?;
        Ok(candidates)
    }

    async fn cast_vote(&self, id_number: &IdNumber, candidate_name: &str) -> Result<()> {
        let mut session = self.client.start_session(None).await?;
        let mut attempt = 1;
        loop {
            session.start_transaction(None).await?;
            let result = match self
                .vote_in_transaction(&mut session, id_number, candidate_name)
                .await
            {
                Ok(()) => session.commit_transaction().await.map_err(Error::from),
                Err(err) => {
                    if let Err(abort_err) = session.abort_transaction().await {
                        warn!("Failed to abort vote transaction: {abort_err}");
                    }
                    Err(err)
                }
            };

            match result {
                Err(Error::Db(ref err))
                    if attempt < MAX_TRANSACTION_ATTEMPTS
                        && err.contains_label(TRANSIENT_TRANSACTION_ERROR) =>
                {
                    warn!("Vote transaction attempt {attempt} hit a transient error, retrying: {err}");
                    sleep(RETRY_BACKOFF * attempt).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
