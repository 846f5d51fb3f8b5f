//! Data models for contacts.
//!
//! `Contact` is the persisted record; the payload types are the raw request
//! bodies that the service validates into `ContactFields`.

pub mod contact;

pub use contact::{Contact, ContactFields, ContactPayload, ContactUpdatePayload};
