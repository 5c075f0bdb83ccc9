use log::error;
use mongodb::error::Error as DbError;
use rocket::{http::Status, response::Responder, serde::json::Json, Request};
use thiserror::Error;

use crate::model::api::message::Message;

pub type Result<T> = std::result::Result<T, Error>;

/// Message sent in place of the real cause of a server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred. Please try again later.";

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),
    /// The ID number already belongs to a different voter.
    #[error("This ID number is already registered")]
    DuplicateId,
    /// Two registrations raced to create a voter with the same email.
    #[error("This email is already registered")]
    DuplicateEmail,
    /// Login with an ID number that is neither an admin nor a voter.
    #[error("ID number not found. Please register first.")]
    NotRegistered,
    /// Vote by an ID number with no voter record.
    #[error("Voter not found. Please register.")]
    VoterNotFound,
    /// Vote for a candidate name that does not exist.
    #[error("Candidate not found")]
    CandidateNotFound(String),
    /// Removal of a candidate ID that does not exist. Unlike
    /// [`Self::CandidateNotFound`], this is a missing resource, hence 404.
    #[error("Candidate not found")]
    NoSuchCandidate(String),
    #[error("You have already voted")]
    AlreadyVoted,
    #[error(transparent)]
    Db(#[from] DbError),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The HTTP status this error is reported with.
    pub fn status(&self) -> Status {
        match self {
            Self::Validation(_)
            | Self::DuplicateId
            | Self::DuplicateEmail
            | Self::NotRegistered
            | Self::VoterNotFound
            | Self::CandidateNotFound(_)
            | Self::AlreadyVoted => Status::BadRequest,
            Self::NoSuchCandidate(_) => Status::NotFound,
            Self::Db(_) => Status::InternalServerError,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        let message = match self {
            // Never leak store details to the caller.
            Self::Db(err) => {
                error!("Database error: {err}");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };
        (status, Json(Message::new(message))).respond_to(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            Error::validation("Invalid email format").status(),
            Status::BadRequest
        );
        assert_eq!(Error::DuplicateId.status(), Status::BadRequest);
        assert_eq!(Error::DuplicateEmail.status(), Status::BadRequest);
        assert_eq!(Error::NotRegistered.status(), Status::BadRequest);
        assert_eq!(Error::VoterNotFound.status(), Status::BadRequest);
        assert_eq!(
            Error::CandidateNotFound("Bob".to_string()).status(),
            Status::BadRequest
        );
        assert_eq!(Error::AlreadyVoted.status(), Status::BadRequest);
        assert_eq!(
            Error::NoSuchCandidate("abc".to_string()).status(),
            Status::NotFound
        );
    }

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            Error::CandidateNotFound("Bob".to_string()).to_string(),
            "Candidate not found"
        );
        assert_eq!(
            Error::validation("Invalid email format").to_string(),
            "Invalid email format"
        );
    }
}
