use rocket::{
    fairing::{Fairing, Info, Kind},
    http::{Header, Status},
    Request, Response, Route,
};

use crate::Config;

const ALLOWED_METHODS: &str = "GET, POST, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

pub fn routes() -> Vec<Route> {
    routes![preflight]
}

/// Answer any CORS pre-flight request. The headers themselves are added by
/// [`CorsFairing`].
#[options("/<_..>")]
fn preflight() -> Status {
    Status::NoContent
}

/// A fairing that adds CORS headers to every response, using the configured
/// allowed origin.
pub struct CorsFairing;

#[rocket::async_trait]
impl Fairing for CorsFairing {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let origin = req
            .rocket()
            .state::<Config>()
            .map(|config| config.allowed_origin().to_string())
            .unwrap_or_else(|| "*".to_string());
        res.set_header(Header::new("Access-Control-Allow-Origin", origin));
        res.set_header(Header::new("Access-Control-Allow-Methods", ALLOWED_METHODS));
        res.set_header(Header::new("Access-Control-Allow-Headers", ALLOWED_HEADERS));
    }
}

#[cfg(test)]
mod tests {
    use rocket::local::asynchronous::Client;

    use super::*;

    #[backend_test]
    async fn preflight_is_answered_with_cors_headers(client: Client) {
        let response = client.options("/register").dispatch().await;
        assert_eq!(Status::NoContent, response.status());
        let headers = response.headers();
        assert_eq!(Some("*"), headers.get_one("Access-Control-Allow-Origin"));
        assert_eq!(
            Some(ALLOWED_METHODS),
            headers.get_one("Access-Control-Allow-Methods")
        );
        assert_eq!(
            Some(ALLOWED_HEADERS),
            headers.get_one("Access-Control-Allow-Headers")
        );
    }

    #[backend_test]
    async fn errors_carry_cors_headers(client: Client) {
        let response = client.get("/no/such/route").dispatch().await;
        assert_eq!(Status::NotFound, response.status());
        assert_eq!(
            Some("*"),
            response.headers().get_one("Access-Control-Allow-Origin")
        );
    }
}
