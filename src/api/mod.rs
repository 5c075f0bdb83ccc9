use rocket::{http::Status, serde::json::Json, Catcher, Request, Route};

use crate::{cors, model::api::message::Message};

mod admin;
mod auth;
mod public;
mod voter;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(auth::routes());
    routes.extend(voter::routes());
    routes.extend(admin::routes());
    routes.extend(public::routes());
    routes.extend(cors::routes());
    routes
}

pub fn catchers() -> Vec<Catcher> {
    catchers![default_catcher]
}

/// Give unmatched routes and rejected request bodies the same `{message}` body
/// as every other error. A body that parses but has the wrong shape is bad
/// input like any other, so it is answered with 400 rather than 422.
#[catch(default)]
fn default_catcher(status: Status, _req: &Request) -> (Status, Json<Message>) {
    let status = match status {
        s if s == Status::UnprocessableEntity => Status::BadRequest,
        other => other,
    };
    (status, Json(Message::new(status.reason_lossy())))
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
        serde::json::serde_json,
    };

    use crate::model::api::message::Message;

    #[backend_test]
    async fn unknown_route_is_json(client: Client) {
        let response = client.get("/candidates").dispatch().await;
        assert_eq!(Status::NotFound, response.status());
        let body: Message = response.into_json().await.unwrap();
        assert_eq!(body.message, "Not Found");
    }

    #[backend_test]
    async fn malformed_body_is_json(client: Client) {
        let response = client
            .post("/register")
            .header(ContentType::JSON)
            .body("{not json")
            .dispatch()
            .await;
        assert_eq!(Status::BadRequest, response.status());
        let body: serde_json::Value = response.into_json().await.unwrap();
        assert!(body["message"].is_string());
    }

    #[backend_test]
    async fn wrongly_shaped_body_is_bad_request(client: Client) {
        for body in ["[]", r#""9234567890123""#, r#"{"idNumber": {"nested": true}}"#] {
            let response = client
                .post("/login")
                .header(ContentType::JSON)
                .body(body)
                .dispatch()
                .await;
            assert_eq!(Status::BadRequest, response.status());
            let body: Message = response.into_json().await.unwrap();
            assert_eq!(body.message, "Bad Request");
        }
    }
}
