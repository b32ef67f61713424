//! Checkout use case.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{info, warn};

use ecohome_cart::CartLedger;
use ecohome_core::config::CheckoutConfig;
use ecohome_core::error::AppError;
use ecohome_entity::cart::ProductId;
use ecohome_entity::invoice::Invoice;
use ecohome_invoice::{InvoiceRenderer, PdfStream};

use crate::context::RequestContext;

/// One line as submitted by the client. Duplicates are allowed and merged.
#[derive(Debug, Clone)]
pub struct CheckoutLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Outcome of a successful checkout.
#[derive(Debug)]
pub struct CheckoutReceipt {
    /// Attachment filename.
    pub filename: String,
    /// Sum over the consolidated lines.
    pub subtotal: Decimal,
    /// Total printed on the invoice.
    pub total: Decimal,
    /// Number of consolidated lines.
    pub lines: usize,
    /// The document, ready to be streamed.
    pub document: PdfStream,
}

/// Builds invoices from carts.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    renderer: InvoiceRenderer,
    config: CheckoutConfig,
}

impl CheckoutService {
    /// Creates a new checkout service.
    pub fn new(renderer: InvoiceRenderer, config: CheckoutConfig) -> Self {
        Self { renderer, config }
    }

    /// Consolidates submitted lines into a ledger and checks it out.
    pub fn checkout(
        &self,
        ctx: &RequestContext,
        lines: Vec<CheckoutLine>,
        total: Option<Decimal>,
    ) -> Result<CheckoutReceipt, AppError> {
        if lines.len() > self.config.max_lines {
            return Err(AppError::validation(format!(
                "A checkout may contain at most {} lines",
                self.config.max_lines
            )));
        }

        let mut ledger = CartLedger::new();
        for line in lines {
            ledger.add(line.product_id, line.name, line.unit_price, line.quantity)?;
        }

        self.checkout_ledger(ctx, &mut ledger, total)
    }

    /// Renders an invoice for `ledger` and clears it on success.
    ///
    /// `total` defaults to the ledger subtotal. When supplied it is printed
    /// verbatim, but with `enforce_total_match` it must equal the subtotal at
    /// two decimals. On any error the ledger is left untouched.
    pub fn checkout_ledger(
        &self,
        ctx: &RequestContext,
        ledger: &mut CartLedger,
        total: Option<Decimal>,
    ) -> Result<CheckoutReceipt, AppError> {
        let subtotal = ledger.subtotal()?;
        let total = total.unwrap_or(subtotal);

        if total < Decimal::ZERO {
            return Err(AppError::validation("Total must not be negative"));
        }
        if self.config.enforce_total_match && to_cents(total) != to_cents(subtotal) {
            warn!(
                identity_id = %ctx.identity_id,
                %total,
                %subtotal,
                "Checkout total does not match cart subtotal"
            );
            return Err(AppError::validation(format!(
                "Total {} does not match the cart subtotal {}",
                to_cents(total),
                to_cents(subtotal)
            )));
        }

        let invoice = Invoice::new(ledger.snapshot(), total);
        let document = self.renderer.stream(&invoice)?;

        let receipt = CheckoutReceipt {
            filename: invoice.filename(),
            subtotal,
            total,
            lines: ledger.len(),
            document,
        };
        ledger.clear();

        info!(
            identity_id = %ctx.identity_id,
            lines = receipt.lines,
            pages = receipt.document.page_count(),
            "Invoice generated"
        );
        Ok(receipt)
    }
}

fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ecohome_core::config::InvoiceConfig;
    use ecohome_core::error::ErrorKind;
    use ecohome_core::types::{IdentityId, TokenId};
    use ecohome_entity::identity::IdentityRole;
    use rust_decimal_macros::dec;

    fn ctx() -> RequestContext {
        RequestContext {
            identity_id: IdentityId::new(),
            role: IdentityRole::User,
            token_id: TokenId::new(),
            expires_at: Utc::now() + chrono::Duration::hours(1),
            request_time: Utc::now(),
        }
    }

    fn service(config: CheckoutConfig) -> CheckoutService {
        CheckoutService::new(InvoiceRenderer::new(InvoiceConfig::default()), config)
    }

    fn mug(quantity: u32) -> CheckoutLine {
        CheckoutLine {
            product_id: ProductId::new("p1"),
            name: "Mug".to_string(),
            unit_price: dec!(10.00),
            quantity,
        }
    }

    #[test]
    fn test_duplicate_lines_are_consolidated() {
        let receipt = service(CheckoutConfig::default())
            .checkout(&ctx(), vec![mug(1), mug(2)], Some(dec!(30.00)))
            .unwrap();

        assert_eq!(receipt.lines, 1);
        assert_eq!(receipt.subtotal, dec!(30.00));
        assert_eq!(receipt.total, dec!(30.00));
        assert!(receipt.filename.starts_with("invoice-"));
        assert!(receipt.document.collect_bytes().starts_with(b"%PDF-"));
    }

    #[test]
    fn test_missing_total_defaults_to_subtotal() {
        let receipt = service(CheckoutConfig::default())
            .checkout(&ctx(), vec![mug(3)], None)
            .unwrap();
        assert_eq!(receipt.total, dec!(30.00));
    }

    #[test]
    fn test_total_mismatch_rejected_and_ledger_kept() {
        let service = service(CheckoutConfig::default());
        let mut ledger = CartLedger::new();
        ledger
            .add(ProductId::new("p1"), "Mug", dec!(10.00), 3)
            .unwrap();

        let err = service
            .checkout_ledger(&ctx(), &mut ledger, Some(dec!(1.00)))
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_total_compared_at_two_decimals() {
        let receipt = service(CheckoutConfig::default())
            .checkout(&ctx(), vec![mug(3)], Some(dec!(30.004)))
            .unwrap();
        assert_eq!(receipt.total, dec!(30.004));
    }

    #[test]
    fn test_mismatch_allowed_when_not_enforced() {
        let receipt = service(CheckoutConfig {
            enforce_total_match: false,
            ..CheckoutConfig::default()
        })
        .checkout(&ctx(), vec![mug(3)], Some(dec!(25.00)))
        .unwrap();

        assert_eq!(receipt.subtotal, dec!(30.00));
        assert_eq!(receipt.total, dec!(25.00));
    }

    #[test]
    fn test_successful_checkout_clears_ledger() {
        let mut ledger = CartLedger::new();
        ledger
            .add(ProductId::new("p1"), "Mug", dec!(10.00), 1)
            .unwrap();

        service(CheckoutConfig::default())
            .checkout_ledger(&ctx(), &mut ledger, None)
            .unwrap();

        assert!(ledger.is_empty());
    }

    #[test]
    fn test_empty_cart_checks_out_with_zero_total() {
        let receipt = service(CheckoutConfig::default())
            .checkout(&ctx(), Vec::new(), Some(Decimal::ZERO))
            .unwrap();
        assert_eq!(receipt.lines, 0);
        assert_eq!(receipt.total, Decimal::ZERO);
    }

    #[test]
    fn test_invalid_lines_and_limits() {
        let service = service(CheckoutConfig {
            max_lines: 2,
            ..CheckoutConfig::default()
        });

        let err = service
            .checkout(&ctx(), vec![mug(0)], None)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = service
            .checkout(&ctx(), vec![mug(1), mug(1), mug(1)], None)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = service
            .checkout(&ctx(), vec![mug(1)], Some(dec!(-10.00)))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_amount_overflow_is_a_validation_error() {
        let big = CheckoutLine {
            unit_price: Decimal::MAX,
            quantity: 2,
            ..mug(1)
        };
        let err = service(CheckoutConfig::default())
            .checkout(&ctx(), vec![big], None)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_largest_amount_renders() {
        let big = CheckoutLine {
            unit_price: Decimal::MAX,
            ..mug(1)
        };
        let receipt = service(CheckoutConfig::default())
            .checkout(&ctx(), vec![big], None)
            .unwrap();
        assert_eq!(receipt.total, Decimal::MAX);
        assert!(receipt.document.collect_bytes().ends_with(b"%%EOF\n"));
    }
}
