//! For some reason, the mongodb crate doesn't provide error code constants.
//! This module fills in the gaps.

use mongodb::error::{Error as DbError, ErrorKind, WriteFailure};

pub const DUPLICATE_KEY: i32 = 11000;

/// If the given error is a duplicate key error, i.e. a unique index rejected
/// the write, return the name of that index (e.g. `email_1`).
///
/// The index name is only available from the server's message; it is empty
/// if the message has an unexpected shape.
pub fn duplicate_key_index(err: &DbError) -> Option<&str> {
    let message = match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref e)) if e.code == DUPLICATE_KEY => &e.message,
        ErrorKind::Command(ref e) if e.code == DUPLICATE_KEY => &e.message,
        _ => return None,
    };
    Some(index_name(message))
}

/// Extract the index name from a message such as
/// `E11000 duplicate key error collection: votingDB.voters index: email_1 dup key: { ... }`.
fn index_name(message: &str) -> &str {
    message
        .split_once(" index: ")
        .and_then(|(_, rest)| rest.split_whitespace().next())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_name_from_message() {
        assert_eq!(
            index_name(r#"E11000 duplicate key error collection: votingDB.voters index: email_1 dup key: { email: "a@b.com" }"#),
            "email_1"
        );
        assert_eq!(
            index_name(r#"E11000 duplicate key error collection: votingDB.voters index: idNumber_1 dup key: { idNumber: "9234567890123" }"#),
            "idNumber_1"
        );
        assert_eq!(index_name("E11000 duplicate key error"), "");
    }
}
