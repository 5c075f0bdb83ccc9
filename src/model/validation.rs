//! Shape checks for user-submitted fields.
//!
//! These never touch the database. Callers turn a failed check into an
//! [`Error::Validation`](crate::error::Error::Validation) with a message
//! appropriate to the endpoint.

use std::{
    fmt::{Display, Formatter},
    sync::OnceLock,
};

use regex::Regex;
use serde::{
    de::{Error as DeError, Visitor},
    Deserialize, Deserializer, Serialize,
};

/// Number of digits in a national ID number.
pub const ID_NUMBER_LENGTH: usize = 13;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    // Unanchored: any `something@something.something` run within the input passes.
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"))
}

/// Check that the given string looks like an email address.
pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Check that the given string is exactly 13 ASCII digits.
pub fn validate_id_number(id_number: &str) -> bool {
    id_number.len() == ID_NUMBER_LENGTH && id_number.bytes().all(|b| b.is_ascii_digit())
}

/// Return the field's value iff it was supplied and is non-empty.
pub fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// A 13-digit national ID number, the lookup key for voters and admins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdNumber(String);

impl IdNumber {
    /// Parse an ID number, returning `None` if it is not exactly 13 digits.
    pub fn parse(id_number: impl Into<String>) -> Option<Self> {
        let id_number = id_number.into();
        validate_id_number(&id_number).then_some(Self(id_number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for IdNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IdNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Deserialise an optional request field, accepting any scalar.
///
/// Numbers and booleans become their textual form, so `{"idNumber": 9234567890123}`
/// reads the same as the quoted ID number. `null` is treated as missing. Use
/// together with `#[serde(default)]`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScalarVisitor)
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Option<String>;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E: DeError>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_bool<E: DeError>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_i64<E: DeError>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: DeError>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: DeError>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_none<E: DeError>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: DeError>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}
