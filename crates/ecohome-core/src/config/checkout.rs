//! Checkout policy configuration.

use serde::{Deserialize, Serialize};

/// Controls how a checkout request is checked before rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Reject a checkout whose supplied total differs from the recomputed subtotal.
    #[serde(default = "default_true")]
    pub enforce_total_match: bool,
    /// Maximum number of submitted lines per checkout request.
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            enforce_total_match: true,
            max_lines: default_max_lines(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_lines() -> usize {
    500
}
