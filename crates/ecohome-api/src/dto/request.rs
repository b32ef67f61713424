//! Request DTOs with validation.
//!
//! Every body rejects unknown fields. Checkout lines also accept the field
//! names used by the legacy storefront client (`cartItems`, `_id`,
//! `price`, `qty`).

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use ecohome_entity::cart::ProductId;
use ecohome_entity::product::{Category, NewProduct, ProductFilter, ProductUpdate};
use ecohome_service::CheckoutLine;

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password change request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// New password; the length policy is enforced by the auth service.
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// One line of a checkout request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct InvoiceLineRequest {
    /// Catalog product id.
    #[serde(alias = "_id")]
    #[validate(length(min = 1, message = "productId is required"))]
    pub product_id: String,
    /// Display name.
    #[validate(length(max = 500, message = "name is too long"))]
    pub name: String,
    /// Price of one unit.
    #[serde(alias = "price")]
    pub unit_price: Decimal,
    /// Number of units.
    #[serde(alias = "qty", default = "default_quantity")]
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl From<InvoiceLineRequest> for CheckoutLine {
    fn from(line: InvoiceLineRequest) -> Self {
        Self {
            product_id: ProductId::new(line.product_id),
            name: line.name,
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// Checkout request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    /// Cart lines; duplicates of a product are merged.
    #[serde(alias = "cartItems")]
    #[validate(nested)]
    pub lines: Vec<InvoiceLineRequest>,
    /// Client-computed total; defaults to the server subtotal.
    #[serde(default)]
    pub total: Option<Decimal>,
}

/// Product listing query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ProductQuery {
    /// Category filter.
    pub category: Option<Category>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

impl From<ProductQuery> for ProductFilter {
    fn from(query: ProductQuery) -> Self {
        Self {
            category: query.category,
            min_price: query.min_price,
            max_price: query.max_price,
        }
    }
}

/// New product body (admin).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Category.
    pub category: Category,
    /// Image URL.
    #[serde(default)]
    pub image_url: String,
    /// Units in stock.
    #[serde(default = "default_stock")]
    pub stock: u32,
}

fn default_stock() -> u32 {
    1
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            category: req.category,
            image_url: req.image_url,
            stock: req.stock,
        }
    }
}

/// Partial product update body (admin).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct UpdateProductRequest {
    /// New name.
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
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

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            category: req.category,
            image_url: req.image_url,
            stock: req.stock,
        }
    }
}
