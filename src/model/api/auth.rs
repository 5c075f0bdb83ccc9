use serde::{Deserialize, Serialize};

use crate::model::validation::lenient_string;

/// The kind of user an ID number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Voter,
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id_number: Option<String>,
}

/// Response to a successful login. Nothing is issued: the role only tells the
/// client which screens to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub role: Role,
}

impl LoginResponse {
    pub fn new(role: Role) -> Self {
        Self {
            message: "Login successful".to_string(),
            role,
        }
    }
}
