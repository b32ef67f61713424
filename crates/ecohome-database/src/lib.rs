//! # ecohome-database
//!
//! The credential store (the only durable state in the storefront) and
//! the product catalog interface, each with a PostgreSQL and/or in-memory
//! implementation.

pub mod catalog;
pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

pub use catalog::ProductCatalog;
pub use connection::{DatabasePool, open_credential_store};
pub use memory::{MemoryCatalog, MemoryCredentialStore};
pub use repositories::identity::PgCredentialStore;
pub use store::CredentialStore;
