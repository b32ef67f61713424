//! Invoice snapshot.

pub mod model;

pub use model::Invoice;
