pub mod discount_allocator;
pub mod line_classifier;

pub use discount_allocator::{Allocation, AllocationStatus, DiscountAllocator};
pub use line_classifier::{classify_line, classify_lines};
