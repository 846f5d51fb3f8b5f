use async_trait::async_trait;
use chrono::NaiveDate;
use contacts_api::domain::{BirthdayWindow, ContactId};
use contacts_api::error::{StoreError, StoreResult};
use contacts_api::models::{Contact, ContactFields};
use contacts_api::repositories::ContactRepository;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Provides an in-memory implementation of ContactRepository that can be
/// easily configured with test data and tracks method calls for verification.
/// Ids are assigned sequentially from 1, like an autoincrement column.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<BTreeMap<i64, Contact>>>,
    next_id: Arc<Mutex<i64>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failing: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Add a contact to the mock repository, keeping its id.
    pub fn add_contact(&self, contact: Contact) {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id = (*next_id).max(contact.id + 1);
        self.contacts.lock().unwrap().insert(contact.id, contact);
    }

    /// Add multiple contacts to the mock repository.
    pub fn add_contacts(&self, contacts_list: Vec<Contact>) {
        for contact in contacts_list {
            self.add_contact(contact);
        }
    }

    /// Make every subsequent call fail as a storage error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of stored contacts.
    pub fn len(&self) -> usize {
        self.contacts.lock().unwrap().len()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) -> StoreResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Task("mock storage failure".to_string()));
        }
        Ok(())
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn create(&self, fields: &ContactFields) -> StoreResult<Contact> {
        self.track_call("create")?;

        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;
            id
        };
        let contact = Contact::from_fields(id, fields.clone());
        self.contacts.lock().unwrap().insert(id, contact.clone());
        Ok(contact)
    }

    async fn get(&self, id: ContactId) -> StoreResult<Contact> {
        self.track_call("get")?;

        let contacts = self.contacts.lock().unwrap();
        contacts
            .get(&id.get())
            .cloned()
            .ok_or(StoreError::NotFound(id.get()))
    }

    async fn list(&self, skip: usize, limit: usize) -> StoreResult<Vec<Contact>> {
        self.track_call("list")?;

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.values().skip(skip).take(limit).cloned().collect())
    }

    async fn update(&self, id: ContactId, fields: &ContactFields) -> StoreResult<Contact> {
        self.track_call("update")?;

        let mut contacts = self.contacts.lock().unwrap();
        let slot = contacts
            .get_mut(&id.get())
            .ok_or(StoreError::NotFound(id.get()))?;
        *slot = Contact::from_fields(id.get(), fields.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: ContactId) -> StoreResult<Contact> {
        self.track_call("delete")?;

        let mut contacts = self.contacts.lock().unwrap();
        contacts
            .remove(&id.get())
            .ok_or(StoreError::NotFound(id.get()))
    }

    async fn find_by_text(&self, text: &str) -> StoreResult<Vec<Contact>> {
        self.track_call("find_by_text")?;

        let needle = text.to_lowercase();
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts
            .values()
            .filter(|c| {
                [&c.first_name, &c.last_name, &c.email, &c.phone, &c.details]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn upcoming_birthdays(
        &self,
        reference: NaiveDate,
        window_days: u32,
    ) -> StoreResult<Vec<Contact>> {
        self.track_call("upcoming_birthdays")?;

        let window = BirthdayWindow::new(reference, window_days);
        let contacts = self.contacts.lock().unwrap();
        let mut matches: Vec<Contact> = contacts
            .values()
            .filter(|c| window.contains(c.birthday))
            .cloned()
            .collect();
        matches.sort_by_key(|c| {
            use chrono::Datelike;
            (c.birthday.month(), c.birthday.day(), c.id)
        });
        Ok(matches)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.track_call("ping")
    }
}
