//! Catalog product entities.

pub mod category;
pub mod model;

pub use category::Category;
pub use model::{NewProduct, Product, ProductFilter, ProductUpdate};
