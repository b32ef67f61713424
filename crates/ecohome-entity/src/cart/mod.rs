//! Cart value objects.

pub mod line;

pub use line::{CartLine, ProductId};
