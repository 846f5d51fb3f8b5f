//! Contact service layer.
//!
//! Business rules for the contact API: input validation, page bounds, the
//! upcoming-birthdays window, and translation of store outcomes.

use crate::config::Config;
use crate::domain::birthday_window::DAYS_IN_YEAR;
use crate::domain::{
    BirthdayWindow, Clock, ContactId, EmailAddress, PhoneNumber, ValidationError,
};
use crate::error::{ServiceError, ServiceResult, StoreError};
use crate::models::{Contact, ContactFields, ContactPayload, ContactUpdatePayload};
use crate::repositories::ContactRepository;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use tracing::{debug, error};

/// Column width of first and last names.
pub const MAX_NAME_LEN: usize = 100;

/// Column width of free-text details.
pub const MAX_DETAILS_LEN: usize = 1000;

/// Longest accepted search text.
pub const MAX_SEARCH_LEN: usize = 500;

/// Limits the service enforces on client input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    pub default_page_limit: usize,
    pub max_page_limit: usize,
    pub upcoming_birthday_days: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ServiceSettings {
    fn from(config: &Config) -> Self {
        Self {
            default_page_limit: config.default_page_limit,
            max_page_limit: config.max_page_limit,
            upcoming_birthday_days: config.upcoming_birthday_days,
        }
    }
}

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// A page of contacts in insertion order. An empty page is not an error.
    async fn list_contacts(
        &self,
        skip: Option<usize>,
        limit: Option<usize>,
    ) -> ServiceResult<Vec<Contact>>;

    /// A single contact by id.
    async fn get_contact(&self, contact_id: i64) -> ServiceResult<Contact>;

    /// Contacts with any text field containing `text`, case-insensitively.
    async fn find_contacts(&self, text: &str) -> ServiceResult<Vec<Contact>>;

    /// Contacts whose birthday falls within the next `days` days of today.
    async fn upcoming_birthdays(&self, days: Option<u32>) -> ServiceResult<Vec<Contact>>;

    /// Validate and persist a new contact.
    async fn create_contact(&self, payload: ContactPayload) -> ServiceResult<Contact>;

    /// Replace every field of the contact named by `payload.id`.
    async fn update_contact(&self, payload: ContactUpdatePayload) -> ServiceResult<Contact>;

    /// Delete a contact, returning what was removed.
    async fn remove_contact(&self, contact_id: i64) -> ServiceResult<Contact>;

    /// Check the backing store responds.
    async fn health(&self) -> ServiceResult<()>;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repository: Arc<dyn ContactRepository>,
    clock: Arc<dyn Clock>,
    settings: ServiceSettings,
}

/// Validation helper functions.
impl ContactServiceImpl {
    /// Validate contact ID.
    fn validate_contact_id(contact_id: i64) -> Result<ContactId, ValidationError> {
        ContactId::new(contact_id)
    }

    /// Validate search text, returning it trimmed.
    fn validate_search_text(text: &str) -> Result<&str, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidSearch(
                "search text cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_SEARCH_LEN {
            return Err(ValidationError::InvalidSearch(format!(
                "search text too long (max {} characters)",
                MAX_SEARCH_LEN
            )));
        }
        Ok(trimmed)
    }

    /// Validate a required, non-blank text field no wider than `max`.
    fn validate_text(
        field: &'static str,
        value: Option<String>,
        max: usize,
    ) -> Result<String, ValidationError> {
        let value = value.ok_or(ValidationError::MissingField(field))?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::BlankField(field));
        }
        if trimmed.chars().count() > max {
            return Err(ValidationError::TooLong { field, max });
        }
        Ok(trimmed.to_string())
    }

    /// Validate birthday format (`YYYY-MM-DD`, four-digit year from 0001).
    fn validate_birthday(value: Option<String>) -> Result<NaiveDate, ValidationError> {
        let raw = value.ok_or(ValidationError::MissingField("birthday"))?;
        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            // SQLite date functions only understand years 0000-9999.
            Ok(date) if (1..=9999).contains(&date.year()) => Ok(date),
            _ => Err(ValidationError::InvalidBirthday(raw)),
        }
    }

    /// Validate optional details, defaulting to empty.
    fn validate_details(value: Option<String>) -> Result<String, ValidationError> {
        let details = value.unwrap_or_default();
        if details.chars().count() > MAX_DETAILS_LEN {
            return Err(ValidationError::TooLong {
                field: "details",
                max: MAX_DETAILS_LEN,
            });
        }
        Ok(details)
    }

    /// Turn a raw payload into validated fields.
    fn validate_payload(payload: ContactPayload) -> Result<ContactFields, ValidationError> {
        let first_name = Self::validate_text("first_name", payload.first_name, MAX_NAME_LEN)?;
        let last_name = Self::validate_text("last_name", payload.last_name, MAX_NAME_LEN)?;
        let email = EmailAddress::new(payload.email.ok_or(ValidationError::MissingField("email"))?)?;
        let phone = PhoneNumber::new(payload.phone.ok_or(ValidationError::MissingField("phone"))?)?;
        let birthday = Self::validate_birthday(payload.birthday)?;
        let details = Self::validate_details(payload.details)?;

        Ok(ContactFields {
            first_name,
            last_name,
            email,
            phone,
            birthday,
            details,
        })
    }

    /// Resolve the requested page size against the configured bounds.
    fn validate_limit(&self, limit: Option<usize>) -> Result<usize, ValidationError> {
        let limit = limit.unwrap_or(self.settings.default_page_limit);
        if limit == 0 || limit > self.settings.max_page_limit {
            return Err(ValidationError::InvalidLimit {
                value: limit,
                max: self.settings.max_page_limit,
            });
        }
        Ok(limit)
    }

    /// Resolve the requested window length.
    fn validate_window(&self, days: Option<u32>) -> Result<u32, ValidationError> {
        let days = days.unwrap_or(self.settings.upcoming_birthday_days);
        if !(1..=DAYS_IN_YEAR).contains(&days) {
            return Err(ValidationError::InvalidWindow(days));
        }
        Ok(days)
    }
}

impl ContactServiceImpl {
    /// Create a new contact service.
    pub fn new(
        repository: Arc<dyn ContactRepository>,
        clock: Arc<dyn Clock>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            repository,
            clock,
            settings,
        }
    }

    /// Map a store failure to what clients see.
    ///
    /// `action` completes "An error occurred while ... the contact."
    fn translate(action: &str, err: StoreError) -> ServiceError {
        match err {
            StoreError::NotFound(id) => {
                ServiceError::NotFound(format!("Contact with contact_id={} not found", id))
            }
            other => {
                error!(action, error = %other, "Contact store failure");
                ServiceError::OperationFailed(format!(
                    "An error occurred while {} the contact.",
                    action
                ))
            }
        }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn list_contacts(
        &self,
        skip: Option<usize>,
        limit: Option<usize>,
    ) -> ServiceResult<Vec<Contact>> {
        let limit = self.validate_limit(limit)?;
        let skip = skip.unwrap_or(0);

        self.repository
            .list(skip, limit)
            .await
            .map_err(|e| Self::translate("listing", e))
    }

    async fn get_contact(&self, contact_id: i64) -> ServiceResult<Contact> {
        let id = Self::validate_contact_id(contact_id)?;

        self.repository
            .get(id)
            .await
            .map_err(|e| Self::translate("retrieving", e))
    }

    async fn find_contacts(&self, text: &str) -> ServiceResult<Vec<Contact>> {
        let needle = Self::validate_search_text(text)?;

        let contacts = self
            .repository
            .find_by_text(needle)
            .await
            .map_err(|e| Self::translate("searching for", e))?;

        if contacts.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "Contact with \"{}\" not found",
                needle
            )));
        }
        Ok(contacts)
    }

    async fn upcoming_birthdays(&self, days: Option<u32>) -> ServiceResult<Vec<Contact>> {
        let days = self.validate_window(days)?;
        let window = BirthdayWindow::new(self.clock.today(), days);
        debug!(
            reference = %window.reference(),
            end = %window.end(),
            days,
            "Querying upcoming birthdays"
        );

        let contacts = self
            .repository
            .upcoming_birthdays(window.reference(), days)
            .await
            .map_err(|e| Self::translate("searching for", e))?;

        if contacts.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "No contacts with birthdays in the next {} days found.",
                days
            )));
        }
        Ok(contacts)
    }

    async fn create_contact(&self, payload: ContactPayload) -> ServiceResult<Contact> {
        let fields = Self::validate_payload(payload)?;

        self.repository
            .create(&fields)
            .await
            .map_err(|e| Self::translate("creating", e))
    }

    async fn update_contact(&self, payload: ContactUpdatePayload) -> ServiceResult<Contact> {
        let raw_id = payload.id.ok_or(ValidationError::MissingField("id"))?;
        let id = Self::validate_contact_id(raw_id)?;
        let fields = Self::validate_payload(payload.fields)?;

        self.repository
            .update(id, &fields)
            .await
            .map_err(|e| Self::translate("updating", e))
    }

    async fn remove_contact(&self, contact_id: i64) -> ServiceResult<Contact> {
        let id = Self::validate_contact_id(contact_id)?;

        self.repository
            .delete(id)
            .await
            .map_err(|e| Self::translate("deleting", e))
    }

    async fn health(&self) -> ServiceResult<()> {
        self.repository.ping().await.map_err(|e| {
            error!(error = %e, "Health check failed");
            ServiceError::OperationFailed("Database is not configured correctly".to_string())
        })
    }
}
