// Ledger module: raw connector lines, classification and discount allocation

pub mod models;
pub mod services;

pub use models::{LedgerDocument, LineContext, LineLabel, RawLedgerLine};
pub use services::{classify_line, classify_lines, DiscountAllocator};
