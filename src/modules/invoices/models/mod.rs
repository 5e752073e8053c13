mod invoice_item;
mod summary;

pub use invoice_item::{DraftInvoiceItem, InvoiceItem};
pub use summary::InvoiceSummary;
