//! Product model as exposed by the catalog collaborator.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::ProductId;

use super::category::Category;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Category.
    pub category: Category,
    /// Image URL.
    pub image_url: String,
    /// Units in stock.
    pub stock: u32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Data for a new catalog product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Category.
    pub category: Category,
    /// Image URL.
    pub image_url: String,
    /// Units in stock.
    pub stock: u32,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price.
    pub price: Option<Decimal>,
    /// New category.
    pub category: Option<Category>,
    /// New image URL.
    pub image_url: Option<String>,
    /// New stock level.
    pub stock: Option<u32>,
}

/// Listing filter. All bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Only products in this category.
    pub category: Option<Category>,
    /// Lowest accepted price.
    pub min_price: Option<Decimal>,
    /// Highest accepted price.
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    /// Returns whether the product passes every set bound.
    pub fn matches(&self, product: &Product) -> bool {
        self.category.is_none_or(|c| c == product.category)
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
    }
}
