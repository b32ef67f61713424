//! Process-local implementations used for development and tests.

pub mod identity;
pub mod product;

pub use identity::MemoryCredentialStore;
pub use product::MemoryCatalog;
