use log::info;

use crate::{
    error::{Error, Result},
    model::{
        api::voter::VoteRequest,
        validation::{required, IdNumber},
    },
    store::Store,
};

/// Cast the voter's single vote for the named candidate, returning the name
/// voted for.
///
/// The tally increment and the voter's `hasVoted` flag are applied together
/// by the store; on any failure neither changes.
pub async fn vote(store: &dyn Store, request: VoteRequest) -> Result<String> {
    let (Some(id_number), Some(candidate_name)) = (
        required(request.id_number),
        required(request.candidate_name),
    ) else {
        return Err(Error::validation("ID number and candidate name are required"));
    };

    // A malformed ID number cannot belong to any voter.
    let id_number = IdNumber::parse(id_number).ok_or(Error::VoterNotFound)?;

    store.cast_vote(&id_number, &candidate_name).await?;
    info!("Vote recorded for candidate {candidate_name}");
    Ok(candidate_name)
}
