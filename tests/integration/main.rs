//! HTTP-level tests driving the full router over in-memory stores.

mod auth_test;
mod checkout_test;
mod helpers;
mod products_test;
