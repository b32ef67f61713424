//! # ecohome-invoice
//!
//! Turns a cart snapshot and a total into a paginated PDF document.
//!
//! Rendering is deterministic: the same lines and total always produce the
//! same bytes. The document carries no creation date and no file id; the
//! snapshot timestamp only feeds the download filename.
//!
//! The output is produced object by object through [`PdfStream`], so the
//! HTTP layer can start sending before the last page is written.

pub mod encoding;
pub mod layout;
pub mod money;
pub mod pdf;
pub mod renderer;

pub use layout::{Font, PageLayout, TextRun};
pub use money::format_money;
pub use pdf::PdfStream;
pub use renderer::InvoiceRenderer;
