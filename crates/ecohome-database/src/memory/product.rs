//! In-memory product catalog.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use ecohome_core::error::AppError;
use ecohome_core::result::AppResult;
use ecohome_entity::cart::ProductId;
use ecohome_entity::product::{Category, NewProduct, Product, ProductFilter, ProductUpdate};

use crate::catalog::ProductCatalog;

/// One entry of a catalog seed file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SeedProduct {
    name: String,
    description: String,
    price: Decimal,
    category: Category,
    image_url: String,
    #[serde(default = "default_stock")]
    stock: u32,
}

fn default_stock() -> u32 {
    1
}

/// Catalog held in a concurrent map. Ids are UUIDv7 strings, so they sort by
/// creation time.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: DashMap<ProductId, Product>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-populated from a JSON array of products.
    pub async fn from_seed_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read(path).await?;
        let seeds: Vec<SeedProduct> = serde_json::from_slice(&raw)?;

        let catalog = Self::new();
        for seed in seeds {
            catalog
                .create(NewProduct {
                    name: seed.name,
                    description: seed.description,
                    price: seed.price,
                    category: seed.category,
                    image_url: seed.image_url,
                    stock: seed.stock,
                })
                .await?;
        }

        info!(path = %path.display(), products = catalog.products.len(), "Catalog seeded");
        Ok(catalog)
    }
}

#[async_trait]
impl ProductCatalog for MemoryCatalog {
    async fn get(&self, id: &ProductId) -> AppResult<Product> {
        self.products
            .get(id)
            .map(|p| p.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Product '{id}' not found")))
    }

    async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| filter.matches(p.value()))
            .map(|p| p.value().clone())
            .collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(products)
    }

    async fn create(&self, data: NewProduct) -> AppResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: ProductId::new(Uuid::now_v7().to_string()),
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            image_url: data.image_url,
            stock: data.stock,
            created_at: now,
            updated_at: now,
        };
        self.products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn update(&self, id: &ProductId, update: ProductUpdate) -> AppResult<Product> {
        let mut product = self
            .products
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Product '{id}' not found")))?;

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(category) = update.category {
            product.category = category;
        }
        if let Some(image_url) = update.image_url {
            product.image_url = image_url;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    async fn delete(&self, id: &ProductId) -> AppResult<()> {
        self.products
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Product '{id}' not found")))
    }
}
