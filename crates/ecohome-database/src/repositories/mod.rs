//! PostgreSQL repository implementations.

pub mod identity;
