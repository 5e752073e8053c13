use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::modules::ledger::models::{LineContext, LineLabel, RawLedgerLine};

/// Substrings marking a discount line in its type code or description
pub const DISCOUNT_MARKERS: &[&str] = &["discount"];

/// Substrings marking a computed subtotal row
pub const SUBTOTAL_MARKERS: &[&str] = &["subtotal", "sub total", "sub-total"];

fn contains_marker(line: &RawLedgerLine, markers: &[&str]) -> bool {
    let line_type = line.line_type.to_lowercase();
    let description = line.description.to_lowercase();
    markers
        .iter()
        .any(|marker| line_type.contains(marker) || description.contains(marker))
}

/// Line carries an explicit discount marker
pub fn has_discount_marker(line: &RawLedgerLine) -> bool {
    contains_marker(line, DISCOUNT_MARKERS)
}

/// Line carries an explicit subtotal marker
pub fn has_subtotal_marker(line: &RawLedgerLine) -> bool {
    contains_marker(line, SUBTOTAL_MARKERS)
}

/// Subtotal inferred from the shape of the line alone: no item reference,
/// no meaningful quantity and a strictly positive amount. Upstream systems
/// emit computed subtotal rows without any distinguishing type code.
pub fn is_inferred_subtotal(line: &RawLedgerLine) -> bool {
    !line.has_item_reference() && !line.has_meaningful_quantity() && line.amount > Decimal::ZERO
}

/// Classify one ledger line.
///
/// Pure function of the line's own fields. Returns `None` for lines that
/// carry no billable information (no item reference and no declared type)
/// and are neither discounts nor subtotals.
pub fn classify_line(line: &RawLedgerLine) -> Option<LineLabel> {
    if line.amount < Decimal::ZERO || has_discount_marker(line) {
        return Some(LineLabel::Discount);
    }

    if has_subtotal_marker(line) || is_inferred_subtotal(line) {
        return Some(LineLabel::Subtotal);
    }

    if !line.has_item_reference() && !line.has_line_type() {
        return None;
    }

    Some(LineLabel::Item)
}

/// Classify every line of a document.
///
/// Contexts come back ordered by `sequence_index` (ties keep input order),
/// with excluded lines dropped. Heuristic decisions worth a second look are
/// logged as warnings and never fail the pass.
pub fn classify_lines(lines: &[RawLedgerLine]) -> Vec<LineContext> {
    let mut order: Vec<usize> = (0..lines.len()).collect();
    order.sort_by_key(|&i| lines[i].sequence_index);

    let mut contexts = Vec::with_capacity(lines.len());

    for index in order {
        let line = &lines[index];
        let Some(label) = classify_line(line) else {
            debug!(
                "Excluding line {} with no item reference and no type",
                line.sequence_index
            );
            continue;
        };

        match label {
            LineLabel::Subtotal if !has_subtotal_marker(line) => {
                warn!(
                    "Line {} ('{}', amount {}) inferred as subtotal from missing reference and quantity",
                    line.sequence_index, line.description, line.amount
                );
            }
            LineLabel::Discount if line.amount > Decimal::ZERO => {
                warn!(
                    "Line {} marked as discount but has positive amount {}; using its absolute value",
                    line.sequence_index, line.amount
                );
            }
            LineLabel::Item if line.amount.is_zero() => {
                debug!("Item line {} has zero amount", line.sequence_index);
            }
            _ => {}
        }

        contexts.push(LineContext::new(
            index,
            line.sequence_index,
            line.amount,
            line.item_reference.clone(),
            label,
        ));
    }

    contexts
}
