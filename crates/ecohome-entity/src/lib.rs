//! # ecohome-entity
//!
//! Domain entity models for the Eco-Home storefront. Durable entities
//! (identities) derive `sqlx::FromRow`; the rest are value objects that
//! only live for the duration of a request.

pub mod cart;
pub mod identity;
pub mod invoice;
pub mod product;
