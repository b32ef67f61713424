//! Identity domain entities.

pub mod email;
pub mod model;
pub mod role;

pub use email::{Email, EmailError};
pub use model::{Identity, NewIdentity};
pub use role::IdentityRole;
