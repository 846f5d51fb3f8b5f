use crate::domain::ContactId;
use crate::error::StoreResult;
use crate::models::{Contact, ContactFields};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Repository for managing contacts.
///
/// Provides abstraction over contact storage and retrieval,
/// enabling different implementations (SQLite, in-memory mock).
/// Every call may block on storage I/O; implementations must not
/// hold a lock across one.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert a new contact and return it with its assigned id.
    async fn create(&self, fields: &ContactFields) -> StoreResult<Contact>;

    /// Retrieve a single contact by id.
    async fn get(&self, id: ContactId) -> StoreResult<Contact>;

    /// Retrieve a page of contacts in insertion order.
    async fn list(&self, skip: usize, limit: usize) -> StoreResult<Vec<Contact>>;

    /// Replace every mutable field of an existing contact.
    async fn update(&self, id: ContactId, fields: &ContactFields) -> StoreResult<Contact>;

    /// Delete a contact, returning the removed snapshot.
    async fn delete(&self, id: ContactId) -> StoreResult<Contact>;

    /// Case-insensitive substring match on names, email, phone, or details.
    async fn find_by_text(&self, text: &str) -> StoreResult<Vec<Contact>>;

    /// Contacts whose birthday (month/day) falls in
    /// `[reference, reference + window_days]`, ordered by month then day.
    async fn upcoming_birthdays(
        &self,
        reference: NaiveDate,
        window_days: u32,
    ) -> StoreResult<Vec<Contact>>;

    /// Verify the backing store answers queries.
    async fn ping(&self) -> StoreResult<()>;
}
