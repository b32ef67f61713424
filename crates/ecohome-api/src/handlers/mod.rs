//! Route handlers.

pub mod auth;
pub mod checkout;
pub mod health;
pub mod products;
