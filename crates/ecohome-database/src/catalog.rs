//! Product catalog contract.
//!
//! The catalog is an external collaborator of the storefront core. It is
//! consumed as plain data: fetch by id, list by filter, and admin-only
//! writes.

use async_trait::async_trait;

use ecohome_core::result::AppResult;
use ecohome_entity::cart::ProductId;
use ecohome_entity::product::{NewProduct, Product, ProductFilter, ProductUpdate};

/// Read and write access to catalog products.
#[async_trait]
pub trait ProductCatalog: Send + Sync + 'static {
    /// Fetch a product; `ErrorKind::NotFound` if absent.
    async fn get(&self, id: &ProductId) -> AppResult<Product>;

    /// List products passing `filter`, oldest first.
    async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<Product>>;

    /// Add a product and return it with its assigned id.
    async fn create(&self, data: NewProduct) -> AppResult<Product>;

    /// Apply a partial update; `ErrorKind::NotFound` if absent.
    async fn update(&self, id: &ProductId, update: ProductUpdate) -> AppResult<Product>;

    /// Remove a product; `ErrorKind::NotFound` if absent.
    async fn delete(&self, id: &ProductId) -> AppResult<()>;
}
