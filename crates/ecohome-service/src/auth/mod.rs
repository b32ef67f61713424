//! Registration, login, logout, and credential maintenance.

pub mod service;

pub use service::{AuthService, AuthSession};
