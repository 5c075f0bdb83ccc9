use log::info;

use crate::{
    error::{Error, Result},
    model::{
        api::voter::RegistrationRequest,
        db::voter::{NewVoter, VoterDetails},
    },
    store::Store,
};

/// What a successful registration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// A new voter was created.
    Created,
    /// A voter with the same email already existed and was updated in place.
    Updated,
}

impl Registration {
    pub fn message(self) -> &'static str {
        match self {
            Self::Created => "Registration successful",
            Self::Updated => "Registration updated successfully!",
        }
    }
}

/// Register a voter, or update the existing voter with the same email.
///
/// Email is the key for re-registration; the ID number must still be unique
/// across all voters, so neither path may take another voter's ID number.
pub async fn register(store: &dyn Store, request: RegistrationRequest) -> Result<Registration> {
    let details = VoterDetails::try_from(request)?;

    if store.voter_by_email(&details.email).await?.is_some() {
        store.update_voter(&details).await?;
        info!("Updated registration for {}", details.email);
        return Ok(Registration::Updated);
    }

    // Checked up front for the common case; a concurrent registration is
    // still caught by the store's uniqueness constraint.
    if store.voter_by_id_number(&details.id_number).await?.is_some() {
        return Err(Error::DuplicateId);
    }

    store.insert_voter(&NewVoter::new(details)).await?;
    info!("Registered new voter");
    Ok(Registration::Created)
}
