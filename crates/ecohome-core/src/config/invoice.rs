//! Invoice document configuration.

use serde::{Deserialize, Serialize};

/// Layout text and limits for rendered invoices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceConfig {
    /// Store name printed as the document title.
    #[serde(default = "default_store_name")]
    pub store_name: String,
    /// Subtitle printed under the store name.
    #[serde(default = "default_title")]
    pub title: String,
    /// Symbol prefixed to every monetary amount.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Documents needing more pages than this fail with a render error.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            store_name: default_store_name(),
            title: default_title(),
            currency_symbol: default_currency_symbol(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_store_name() -> String {
    "Eco-Home Goods".to_string()
}

fn default_title() -> String {
    "Invoice".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_max_pages() -> usize {
    50
}
