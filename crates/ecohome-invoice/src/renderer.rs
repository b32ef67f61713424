//! Invoice rendering entry point.

use tracing::{debug, warn};

use ecohome_core::config::InvoiceConfig;
use ecohome_core::error::AppError;
use ecohome_entity::invoice::Invoice;

use crate::layout::{InvoiceText, PageLayout, paginate};
use crate::pdf::PdfStream;

/// Renders invoices as PDF documents.
#[derive(Debug, Clone)]
pub struct InvoiceRenderer {
    config: InvoiceConfig,
}

impl InvoiceRenderer {
    /// Creates a renderer with the given layout configuration.
    pub fn new(config: InvoiceConfig) -> Self {
        Self { config }
    }

    /// Lays out `invoice` without producing bytes.
    ///
    /// Fails with a render error if the document would exceed the configured
    /// page limit.
    pub fn paginate(&self, invoice: &Invoice) -> Result<Vec<PageLayout>, AppError> {
        let text = InvoiceText {
            store_name: &self.config.store_name,
            title: &self.config.title,
            currency_symbol: &self.config.currency_symbol,
        };
        let pages = paginate(&invoice.lines, invoice.total, &text)?;

        if pages.len() > self.config.max_pages {
            warn!(
                lines = invoice.lines.len(),
                pages = pages.len(),
                max_pages = self.config.max_pages,
                "Invoice exceeds page limit"
            );
            return Err(AppError::render(format!(
                "Invoice needs {} pages; the limit is {}",
                pages.len(),
                self.config.max_pages
            )));
        }

        Ok(pages)
    }

    /// Prepares an incremental byte stream for `invoice`.
    ///
    /// Layout errors surface here, before the first byte is produced.
    pub fn stream(&self, invoice: &Invoice) -> Result<PdfStream, AppError> {
        let pages = self.paginate(invoice)?;
        debug!(lines = invoice.lines.len(), pages = pages.len(), "Invoice laid out");
        Ok(PdfStream::new(
            pages,
            self.config.store_name.as_str(),
            self.config.title.as_str(),
        ))
    }

    /// Renders `invoice` into a single buffer.
    pub fn render(&self, invoice: &Invoice) -> Result<Vec<u8>, AppError> {
        Ok(self.stream(invoice)?.collect_bytes())
    }
}
