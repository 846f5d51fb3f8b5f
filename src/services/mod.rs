//! Application service layer.
//!
//! Services contain business logic and orchestrate calls into the contact
//! store. They provide a clean boundary between the HTTP handlers and the
//! data access layer.

mod contact_service;

pub use contact_service::{
    ContactService, ContactServiceImpl, ServiceSettings, MAX_DETAILS_LEN, MAX_NAME_LEN,
    MAX_SEARCH_LEN,
};
