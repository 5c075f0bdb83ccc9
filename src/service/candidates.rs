use log::info;

use crate::{
    error::{Error, Result},
    model::{
        api::candidate::{CandidateCreated, CandidateDescription, CandidateSpec},
        db::candidate::NewCandidate,
        mongodb::Id,
    },
    store::Store,
};

pub async fn add_candidate(store: &dyn Store, spec: CandidateSpec) -> Result<CandidateCreated> {
    let candidate = NewCandidate::try_from(spec)?;
    let id = store.insert_candidate(&candidate).await?;
    info!("Added candidate {id}");
    Ok(CandidateCreated {
        candidate_id: id.into(),
        name: candidate.name,
        votes: 0,
    })
}

/// Remove the candidate with the given ID. Tallies are not redistributed.
pub async fn remove_candidate(store: &dyn Store, id: Id) -> Result<()> {
    if !store.delete_candidate(id).await? {
        return Err(Error::NoSuchCandidate(id.to_string()));
    }
    info!("Removed candidate {id}");
    Ok(())
}

/// Snapshot of every candidate with its current tally.
pub async fn list_candidates(store: &dyn Store) -> Result<Vec<CandidateDescription>> {
    let candidates = store.candidates().await?;
    Ok(candidates.into_iter().map(Into::into).collect())
}
