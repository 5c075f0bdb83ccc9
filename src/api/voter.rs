use rocket::{serde::json::Json, Route, State};

use crate::{
    error::Result,
    model::api::{
        message::Message,
        voter::{RegistrationRequest, VoteRequest},
    },
    service::{registry, voting},
    store::StoreHandle,
};

pub fn routes() -> Vec<Route> {
    routes![register, vote]
}

#[post("/register", data = "<request>")]
async fn register(
    request: Json<RegistrationRequest>,
    store: &State<StoreHandle>,
) -> Result<Json<Message>> {
    let outcome = registry::register(store.inner().as_ref(), request.0).await?;
    Ok(Json(Message::new(outcome.message())))
}

#[post("/vote", data = "<request>")]
async fn vote(request: Json<VoteRequest>, store: &State<StoreHandle>) -> Result<Json<Message>> {
    let candidate = voting::vote(store.inner().as_ref(), request.0).await?;
    Ok(Json(Message::new(format!(
        "Successfully voted for {candidate}"
    ))))
}
