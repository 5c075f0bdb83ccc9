use rocket::{serde::json::Json, Route, State};

use crate::{
    error::Result, model::api::candidate::CandidateDescription, service::candidates,
    store::StoreHandle,
};

pub fn routes() -> Vec<Route> {
    routes![results]
}

/// Every candidate with its current tally.
#[get("/results")]
async fn results(store: &State<StoreHandle>) -> Result<Json<Vec<CandidateDescription>>> {
    let candidates = candidates::list_candidates(store.inner().as_ref()).await?;
    Ok(Json(candidates))
}
