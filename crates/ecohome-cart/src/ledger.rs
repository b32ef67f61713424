//! Cart consolidation state machine.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use ecohome_core::error::AppError;
use ecohome_entity::cart::{CartLine, ProductId};

/// Ordered collection of cart lines with at most one line per product.
///
/// Lines keep the order in which their product was first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of a product.
    ///
    /// If the product already has a line its quantity is increased and the
    /// name and unit price captured on first add are kept. Otherwise a new
    /// line is appended.
    pub fn add(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<(), AppError> {
        if product_id.is_empty() {
            return Err(AppError::validation("Product id must not be empty"));
        }
        if quantity == 0 {
            return Err(AppError::validation(format!(
                "Quantity for product '{product_id}' must be at least 1"
            )));
        }
        if unit_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Unit price for product '{product_id}' must not be negative"
            )));
        }

        let existing = self.lines.iter().position(|l| l.product_id == product_id);
        let (line_price, line_quantity) = match existing {
            Some(index) => {
                let line = &self.lines[index];
                let merged = line.quantity.checked_add(quantity).ok_or_else(|| {
                    AppError::validation(format!("Quantity for product '{product_id}' is too large"))
                })?;
                (line.unit_price, merged)
            }
            None => (unit_price, quantity),
        };

        let line_total = line_price
            .checked_mul(Decimal::from(line_quantity))
            .ok_or_else(|| {
                AppError::validation(format!("Amount for product '{product_id}' is too large"))
            })?;
        let others = self
            .lines
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != existing)
            .map(|(_, line)| line);
        checked_sum(others)
            .and_then(|sum| sum.checked_add(line_total))
            .ok_or_else(|| AppError::validation("Cart total is too large"))?;

        match existing {
            Some(index) => {
                self.lines[index].quantity = line_quantity;
                debug!(product_id = %product_id, quantity = line_quantity, "Merged cart line");
            }
            None => {
                debug!(product_id = %product_id, quantity, "Added cart line");
                self.lines.push(CartLine {
                    product_id,
                    name: name.into(),
                    unit_price,
                    quantity,
                });
            }
        }
        Ok(())
    }

    /// Removes the line for `product_id`. Removing an absent product is a no-op.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|l| &l.product_id != product_id);
    }

    /// Empties the ledger.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Σ `unit_price × quantity` over the current lines. Computed on every call.
    ///
    /// `add` refuses any line that would make this overflow.
    pub fn subtotal(&self) -> Result<Decimal, AppError> {
        checked_sum(self.lines.iter()).ok_or_else(|| AppError::validation("Cart total is too large"))
    }

    /// Current lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Copies the current lines for rendering.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines.clone()
    }

    /// Line for `product_id`, if present.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the ledger has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

fn checked_sum<'a>(mut lines: impl Iterator<Item = &'a CartLine>) -> Option<Decimal> {
    lines.try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.line_total()?))
}
