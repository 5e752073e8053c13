// Invoices module

pub mod models;
pub mod services;

pub use models::{DraftInvoiceItem, InvoiceItem, InvoiceSummary};
pub use services::{InvoiceService, ProcessedInvoice, ReferenceGuard};
