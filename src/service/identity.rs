use crate::{
    error::{Error, Result},
    model::{api::auth::Role, validation::IdNumber},
    store::Store,
};

/// Resolve an ID number to a role. Admins take precedence over voters.
///
/// This is a lookup, not authentication: nothing is issued or checked beyond
/// the ID number existing.
pub async fn login(store: &dyn Store, id_number: Option<String>) -> Result<Role> {
    let id_number = id_number
        .and_then(IdNumber::parse)
        .ok_or_else(|| Error::validation("Invalid ID number format"))?;

    if store.admin_by_id_number(&id_number).await?.is_some() {
        return Ok(Role::Admin);
    }
    if store.voter_by_id_number(&id_number).await?.is_some() {
        return Ok(Role::Voter);
    }
    Err(Error::NotRegistered)
}

#[cfg(test)]
mod tests {
    use crate::{
        model::{
            api::voter::RegistrationRequest,
            db::{admin::NewAdmin, voter::VoterDetails},
        },
        service::registry::register,
        store::MemoryStore,
    };

    use super::*;

    #[rocket::async_test]
    async fn registered_voter_logs_in_as_voter() {
        let store = MemoryStore::new();
        register(&store, RegistrationRequest::example()).await.unwrap();

        let role = login(&store, Some(IdNumber::example().to_string())).await;
        assert_eq!(role.unwrap(), Role::Voter);
    }

    #[rocket::async_test]
    async fn admin_wins_over_voter() {
        let store = MemoryStore::new();
        store.seed_admins(&[NewAdmin::example()]).await.unwrap();

        // Register a voter with the admin's ID number.
        let mut details = VoterDetails::example();
        details.id_number = NewAdmin::example().id_number;
        register(&store, RegistrationRequest::from_details(&details))
            .await
            .unwrap();

        let role = login(&store, Some(details.id_number.to_string())).await;
        assert_eq!(role.unwrap(), Role::Admin);
    }

    #[rocket::async_test]
    async fn unknown_id_number_is_not_registered() {
        let store = MemoryStore::new();
        let err = login(&store, Some(IdNumber::example().to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotRegistered));
    }

    #[rocket::async_test]
    async fn malformed_id_number_fails_regardless_of_store() {
        let store = MemoryStore::new();
        store.seed_admins(&[NewAdmin::example()]).await.unwrap();
        register(&store, RegistrationRequest::example()).await.unwrap();

        for id_number in [Some("123".to_string()), Some(String::new()), None] {
            let err = login(&store, id_number).await.unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
        }
    }
}
