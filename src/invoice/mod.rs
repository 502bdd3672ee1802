//! Invoice module - billing form collection and two-copy invoice rendering.
//!
//! - `form` - turns submitted values into an `InvoiceRecord`
//! - `renderer` - renders the labelled copies from a record and an issue date
//! - `page` - the HTML page around the form and the rendered sheet
//! - `handlers` - actix-web routes

pub mod common;
pub mod form;
pub mod handlers;
pub mod models;
pub mod page;
pub mod renderer;
pub mod validation;

pub use models::{CopyLabel, InvoiceForm, InvoicePreview, InvoiceRecord, InvoiceSummary, RenderedCopy};
pub use renderer::{render_copies, render_copy, render_invoice_sheet, summarize};
pub use validation::{ValidationError, ValidationErrors};
