//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for domain concepts like
//! contact IDs, email addresses, and phone numbers, plus the pure
//! upcoming-birthday predicate. Value objects validate at construction
//! time and prevent invalid data from reaching the store.

pub mod birthday_window;
pub mod clock;
pub mod contact_id;
pub mod email;
pub mod errors;
pub mod phone;

pub use birthday_window::{BirthdayWindow, DEFAULT_WINDOW_DAYS};
pub use clock::{Clock, FixedClock, SystemClock};
pub use contact_id::ContactId;
pub use email::EmailAddress;
pub use errors::ValidationError;
pub use phone::PhoneNumber;
