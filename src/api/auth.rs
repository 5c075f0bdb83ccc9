use rocket::{serde::json::Json, Route, State};

use crate::{
    error::Result,
    model::api::auth::{LoginRequest, LoginResponse},
    service::identity,
    store::StoreHandle,
};

pub fn routes() -> Vec<Route> {
    routes![login]
}

/// Report whether the ID number belongs to an admin or a voter.
#[post("/login", data = "<request>")]
async fn login(
    request: Json<LoginRequest>,
    store: &State<StoreHandle>,
) -> Result<Json<LoginResponse>> {
    let role = identity::login(store.inner().as_ref(), request.0.id_number).await?;
    Ok(Json(LoginResponse::new(role)))
}
