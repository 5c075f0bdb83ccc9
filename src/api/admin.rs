use mongodb::bson::oid;
use rocket::{http::Status, serde::json::Json, Route, State};

use crate::{
    error::{Error, Result},
    model::{
        api::{
            candidate::{CandidateCreated, CandidateSpec},
            message::Message,
        },
        mongodb::Id,
    },
    service::candidates,
    store::StoreHandle,
};

pub fn routes() -> Vec<Route> {
    routes![add_candidate, remove_candidate]
}

#[post("/addCandidate", data = "<spec>")]
async fn add_candidate(
    spec: Json<CandidateSpec>,
    store: &State<StoreHandle>,
) -> Result<(Status, Json<CandidateCreated>)> {
    let created = candidates::add_candidate(store.inner().as_ref(), spec.0).await?;
    Ok((Status::Created, Json(created)))
}

/// An ID that is not a valid ObjectId cannot name a candidate, so it is
/// reported the same way as an unknown one.
#[delete("/removeCandidate/<candidate_id>")]
async fn remove_candidate(
    candidate_id: std::result::Result<Id, oid::Error>,
    store: &State<StoreHandle>,
) -> Result<Json<Message>> {
    let candidate_id = candidate_id.map_err(|err| Error::NoSuchCandidate(err.to_string()))?;
    candidates::remove_candidate(store.inner().as_ref(), candidate_id).await?;
    Ok(Json(Message::new("Candidate removed successfully")))
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::ContentType,
        local::asynchronous::{Client, LocalResponse},
        serde::json::serde_json,
    };

    use crate::{
        model::api::candidate::CandidateDescription,
        store::{MemoryStore, Store},
    };

    use super::*;

    #[backend_test(admin)]
    async fn add_list_remove(client: Client, store: MemoryStore) {
        let response = add(&client, &CandidateSpec::with_image("Alice")).await;
        assert_eq!(Status::Created, response.status());
        let created: CandidateCreated = response.into_json().await.unwrap();
        assert_eq!(created.name, "Alice");
        assert_eq!(created.votes, 0);

        let results: Vec<CandidateDescription> = client
            .get("/results")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, created.candidate_id);
        assert_eq!(
            results[0].image.as_deref(),
            CandidateSpec::with_image("Alice").image_base64.as_deref()
        );

        let response = remove(&client, &created.candidate_id.to_string()).await;
        assert_eq!(Status::Ok, response.status());
        let body: Message = response.into_json().await.unwrap();
        assert_eq!(body.message, "Candidate removed successfully");
        assert!(store.candidates().await.unwrap().is_empty());

        let response = remove(&client, &created.candidate_id.to_string()).await;
        assert_eq!(Status::NotFound, response.status());
        let body: Message = response.into_json().await.unwrap();
        assert_eq!(body.message, "Candidate not found");
    }

    #[backend_test(admin)]
    async fn remove_malformed_id(client: Client) {
        let response = remove(&client, "not-an-object-id").await;
        assert_eq!(Status::NotFound, response.status());
        let body: Message = response.into_json().await.unwrap();
        assert_eq!(body.message, "Candidate not found");
    }

    #[backend_test(admin)]
    async fn add_rejects_bad_spec(client: Client, store: MemoryStore) {
        let response = add(&client, &CandidateSpec::default()).await;
        assert_eq!(Status::BadRequest, response.status());
        let body: Message = response.into_json().await.unwrap();
        assert_eq!(body.message, "Candidate name is required");

        let spec = CandidateSpec {
            name: None,
            image_base64: CandidateSpec::with_image("Bob").image_base64,
        };
        let response = add(&client, &spec).await;
        assert_eq!(Status::BadRequest, response.status());
        let body: Message = response.into_json().await.unwrap();
        assert_eq!(body.message, "Candidate name is required");

        assert!(store.candidates().await.unwrap().is_empty());
    }

    #[backend_test(admin)]
    async fn images_are_stored_as_sent(client: Client, store: MemoryStore) {
        let images = [
            "iVBORw0KGgo",
            "iVBORw0K\nGgo=",
            "data:image/png;base64,iVBORw0KGgo",
            "-_-_",
        ];
        for image in images {
            let spec = CandidateSpec {
                name: Some("Alice".to_string()),
                image_base64: Some(image.to_string()),
            };
            let response = add(&client, &spec).await;
            assert_eq!(Status::Created, response.status());
        }

        let stored: Vec<Option<String>> = store
            .candidates()
            .await
            .unwrap()
            .into_iter()
            .map(|candidate| candidate.candidate.image)
            .collect();
        let expected: Vec<Option<String>> =
            images.iter().map(|image| Some(image.to_string())).collect();
        assert_eq!(stored, expected);
    }

    async fn add<'c>(client: &'c Client, spec: &CandidateSpec) -> LocalResponse<'c> {
        client
            .post("/addCandidate")
            .header(ContentType::JSON)
            .body(serde_json::to_string(spec).unwrap())
            .dispatch()
            .await
    }

    async fn remove<'c>(client: &'c Client, id: &str) -> LocalResponse<'c> {
        client
            .delete(format!("/removeCandidate/{id}"))
            .dispatch()
            .await
    }
}
