//! # ecohome-cart
//!
//! The cart ledger: an ordered, consolidated set of [`CartLine`]s owned by a
//! single client session. Pure in-memory state with no persistence and no
//! internal locking; the owner is the only writer.
//!
//! [`CartLine`]: ecohome_entity::cart::CartLine

pub mod ledger;

pub use ledger::CartLedger;
