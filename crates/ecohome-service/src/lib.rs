//! # ecohome-service
//!
//! Use cases of the storefront. Each service receives its collaborators at
//! construction time as `Arc` references and takes an explicit
//! [`RequestContext`] for operations performed on behalf of a caller.

pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod context;

pub use auth::{AuthService, AuthSession};
pub use catalog::CatalogService;
pub use checkout::{CheckoutLine, CheckoutReceipt, CheckoutService};
pub use context::RequestContext;
