//! Transient invoice data handed to the renderer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;

/// A snapshot of a cart at checkout time. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Consolidated lines in insertion order.
    pub lines: Vec<CartLine>,
    /// The total printed in the footer.
    pub total: Decimal,
    /// When the snapshot was taken. Used only for the download filename.
    pub generated_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates a snapshot stamped with the current time.
    pub fn new(lines: Vec<CartLine>, total: Decimal) -> Self {
        Self {
            lines,
            total,
            generated_at: Utc::now(),
        }
    }

    /// Attachment filename, e.g. `invoice-1760745600000.pdf`.
    pub fn filename(&self) -> String {
        format!("invoice-{}.pdf", self.generated_at.timestamp_millis())
    }
}
