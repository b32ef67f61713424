//! Checkout: cart consolidation feeding invoice rendering.

pub mod service;

pub use service::{CheckoutLine, CheckoutReceipt, CheckoutService};
