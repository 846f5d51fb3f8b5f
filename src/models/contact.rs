//! Contact model representing one person's contact details.

use crate::domain::{EmailAddress, PhoneNumber};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A persisted contact, as returned by the store and the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// Store-assigned identifier, immutable after creation
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    pub phone: String,

    /// Calendar date; only month and day matter for birthday queries
    pub birthday: NaiveDate,

    /// Free text, empty when not provided
    #[serde(default)]
    pub details: String,
}

impl Contact {
    /// Combine a store-assigned id with validated fields.
    pub fn from_fields(id: i64, fields: ContactFields) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email.into_inner(),
            phone: fields.phone.into_inner(),
            birthday: fields.birthday,
            details: fields.details,
        }
    }
}

/// Validated mutable fields of a contact (everything except the id).
///
/// Only the service constructs these; the store trusts them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub birthday: NaiveDate,
    pub details: String,
}

/// Raw create body as sent by clients.
///
/// Every field is optional here so that missing fields surface as
/// validation errors with a field name rather than as parse failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// `YYYY-MM-DD`
    pub birthday: Option<String>,
    pub details: Option<String>,
}

/// Raw update body: the full field set plus the target id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactUpdatePayload {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(flatten)]
    pub fields: ContactPayload,
}
