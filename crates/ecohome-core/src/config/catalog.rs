//! Product catalog configuration.

use serde::{Deserialize, Serialize};

/// Where the in-memory catalog gets its initial products.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Optional JSON file with an array of products loaded at startup.
    #[serde(default)]
    pub seed_file: Option<String>,
}
