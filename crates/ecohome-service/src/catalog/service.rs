//! Catalog reads for everyone, writes for admins.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use ecohome_auth::require_role;
use ecohome_core::error::AppError;
use ecohome_database::ProductCatalog;
use ecohome_entity::cart::ProductId;
use ecohome_entity::identity::IdentityRole;
use ecohome_entity::product::{NewProduct, Product, ProductFilter, ProductUpdate};

use crate::context::RequestContext;

/// Fronts the catalog collaborator.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn ProductCatalog>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService").finish_non_exhaustive()
    }
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { catalog }
    }

    /// Lists products passing `filter`.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, AppError> {
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price)
            && min > max
        {
            return Err(AppError::validation("minPrice must not exceed maxPrice"));
        }
        self.catalog.list(filter).await
    }

    /// Fetches one product.
    pub async fn get(&self, id: &ProductId) -> Result<Product, AppError> {
        self.catalog.get(id).await
    }

    /// Adds a product. Admin only.
    pub async fn create(&self, ctx: &RequestContext, data: NewProduct) -> Result<Product, AppError> {
        require_role(ctx.role, IdentityRole::Admin)?;
        validate_fields(Some(&data.name), Some(data.price))?;

        let product = self.catalog.create(data).await?;
        info!(identity_id = %ctx.identity_id, product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Updates a product. Admin only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, AppError> {
        require_role(ctx.role, IdentityRole::Admin)?;
        validate_fields(update.name.as_ref(), update.price)?;

        let product = self.catalog.update(id, update).await?;
        info!(identity_id = %ctx.identity_id, product_id = %product.id, "Product updated");
        Ok(product)
    }

    /// Deletes a product. Admin only.
    pub async fn delete(&self, ctx: &RequestContext, id: &ProductId) -> Result<(), AppError> {
        require_role(ctx.role, IdentityRole::Admin)?;

        self.catalog.delete(id).await?;
        info!(identity_id = %ctx.identity_id, product_id = %id, "Product deleted");
        Ok(())
    }
}

fn validate_fields(name: Option<&String>, price: Option<Decimal>) -> Result<(), AppError> {
    if name.is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::validation("Product name must not be empty"));
    }
    if price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(AppError::validation("Product price must not be negative"));
    }
    Ok(())
}
