use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    model::{
        api::id::ApiId,
        db::candidate::{Candidate, NewCandidate},
        validation::{lenient_string, required},
    },
};

/// Body of `POST /addCandidate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSpec {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Stored exactly as sent, typically a `data:<mime>;base64,...` URL.
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_base64: Option<String>,
}

impl TryFrom<CandidateSpec> for NewCandidate {
    type Error = Error;

    fn try_from(spec: CandidateSpec) -> Result<Self, Self::Error> {
        let name =
            required(spec.name).ok_or_else(|| Error::validation("Candidate name is required"))?;
        Ok(NewCandidate::new(name, required(spec.image_base64)))
    }
}

/// Response to `POST /addCandidate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateCreated {
    pub candidate_id: ApiId,
    pub name: String,
    pub votes: u64,
}

/// API-friendly representation of a candidate, as listed by `GET /results`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDescription {
    #[serde(rename = "_id")]
    pub id: ApiId,
    pub name: String,
    pub image: Option<String>,
    pub votes: u64,
}

impl From<Candidate> for CandidateDescription {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id.into(),
            name: candidate.candidate.name,
            image: candidate.candidate.image,
            votes: candidate.candidate.votes,
        }
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl CandidateSpec {
        pub fn named(name: &str) -> Self {
            Self {
                name: Some(name.to_string()),
                image_base64: None,
            }
        }

        pub fn with_image(name: &str) -> Self {
            Self {
                name: Some(name.to_string()),
                image_base64: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        let err = NewCandidate::try_from(CandidateSpec::default()).unwrap_err();
        assert_eq!(err.to_string(), "Candidate name is required");

        let err = NewCandidate::try_from(CandidateSpec::named("")).unwrap_err();
        assert_eq!(err.to_string(), "Candidate name is required");
    }

    #[test]
    fn image_is_optional() {
        let candidate = NewCandidate::try_from(CandidateSpec::named("Alice")).unwrap();
        assert_eq!(candidate, NewCandidate::new("Alice".to_string(), None));

        // An empty image counts as no image.
        let spec = CandidateSpec {
            name: Some("Alice".to_string()),
            image_base64: Some(String::new()),
        };
        assert_eq!(NewCandidate::try_from(spec).unwrap().image, None);
    }

    #[test]
    fn image_is_stored_verbatim() {
        let spec = CandidateSpec::with_image("Alice");
        let image = spec.image_base64.clone();
        let candidate = NewCandidate::try_from(spec).unwrap();
        assert_eq!(candidate.image, image);
        assert_eq!(candidate.votes, 0);
    }
}
