//! Persisted records: phonebook contacts, blog posts and their owners.

pub mod blog;
pub mod contact;
pub mod user;

pub use blog::BlogPost;
pub use contact::Contact;
pub use user::{MIN_CREDENTIAL_LEN, User, validate_credentials};
