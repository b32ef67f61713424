//! Product catalog access.

pub mod service;

pub use service::CatalogService;
