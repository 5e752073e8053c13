mod document;
mod line_context;
mod raw_line;

pub use document::LedgerDocument;
pub use line_context::{LineContext, LineLabel};
pub use raw_line::{fields, ItemAttributes, RawLedgerLine};
