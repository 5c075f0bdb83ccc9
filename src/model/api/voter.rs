use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    model::{
        db::voter::VoterDetails,
        validation::{lenient_string, required, validate_email, IdNumber},
    },
};

/// Body of `POST /register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub province: Option<String>,
}

impl TryFrom<RegistrationRequest> for VoterDetails {
    type Error = Error;

    /// Check that every field is present, then the email shape, then the ID
    /// number shape.
    fn try_from(request: RegistrationRequest) -> Result<Self, Self::Error> {
        let (Some(name), Some(email), Some(id_number), Some(province)) = (
            required(request.name),
            required(request.email),
            required(request.id_number),
            required(request.province),
        ) else {
            return Err(Error::validation(
                "Name, email, ID number, and province are required",
            ));
        };

        if !validate_email(&email) {
            return Err(Error::validation("Invalid email format"));
        }

        let id_number = IdNumber::parse(id_number)
            .ok_or_else(|| Error::validation("ID number must be exactly 13 digits"))?;

        Ok(Self {
            name,
            email,
            id_number,
            province,
        })
    }
}

/// Body of `POST /vote`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub candidate_name: Option<String>,
}


#[cfg(test)]
mod tests {
    use super::*;

    fn message(request: RegistrationRequest) -> String {
        VoterDetails::try_from(request).unwrap_err().to_string()
    }

    #[test]
    fn valid_registration() {
        let details = VoterDetails::try_from(RegistrationRequest::example()).unwrap();
        assert_eq!(details, VoterDetails::example());
    }

    #[test]
    fn missing_fields() {
        const MISSING: &str = "Name, email, ID number, and province are required";

        let mut request = RegistrationRequest::example();
        request.province = None;
        assert_eq!(message(request), MISSING);

        let mut request = RegistrationRequest::example();
        request.name = Some(String::new());
        assert_eq!(message(request), MISSING);

        assert_eq!(message(RegistrationRequest::default()), MISSING);
    }

    #[test]
    fn checks_email_before_id_number() {
        let mut request = RegistrationRequest::example();
        request.email = Some("not-an-email".to_string());
        request.id_number = Some("123".to_string());
        assert_eq!(message(request), "Invalid email format");

        let mut request = RegistrationRequest::example();
        request.id_number = Some("123".to_string());
        assert_eq!(message(request), "ID number must be exactly 13 digits");
    }
}
