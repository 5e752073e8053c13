pub mod invoice_service;
pub mod item_assembler;
pub mod reference_guard;

pub use invoice_service::{build_lookup, InvoiceService, ProcessedInvoice};
pub use item_assembler::{ItemAssembler, ResolvedAttributes};
pub use reference_guard::ReferenceGuard;
