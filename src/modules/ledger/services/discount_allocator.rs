use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::core::money;
use crate::modules::ledger::models::LineContext;

/// What happened to one discount line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStatus {
    /// Distributed in full
    Applied,
    /// Exceeded its range total and was capped at it
    Clamped,
    /// No item line precedes the discount
    NoRange,
    /// The range amounts sum to zero or less
    EmptyRange,
    /// Discount amount is zero
    ZeroDiscount,
    /// Amounts too large to proportion in decimal arithmetic
    Overflow,
}

impl AllocationStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied | Self::Clamped)
    }
}

/// Outcome of allocating one discount line
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Position of the discount line in the context list
    pub discount_position: usize,
    /// Positions of the item lines in its range
    pub item_positions: Vec<usize>,
    /// Absolute discount amount declared on the line
    pub requested: Decimal,
    /// Sum of all shares handed to the range
    pub allocated: Decimal,
    pub status: AllocationStatus,
}

/// Distributes discount lines backward over the item lines they apply to.
///
/// The range for a discount is the group of items summarized by the nearest
/// preceding subtotal, or the single nearest preceding item when no subtotal
/// precedes it. Shares are proportional to item amounts and rounded to the
/// currency scale; the rounding residual goes to the largest item so the range
/// receives exactly the (capped) discount.
pub struct DiscountAllocator;

impl DiscountAllocator {
    /// Allocate every discount line in `contexts`, accumulating shares on the
    /// items' `attributed_discount`.
    pub fn allocate(contexts: &mut [LineContext]) -> Vec<Allocation> {
        let discount_positions: Vec<usize> = contexts
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_discount())
            .map(|(i, _)| i)
            .collect();

        let mut allocations = Vec::with_capacity(discount_positions.len());

        for position in discount_positions {
            let allocation = Self::allocate_one(contexts, position);
            allocations.push(allocation);
        }

        let applied = allocations.iter().filter(|a| a.status.is_applied()).count();
        info!(
            "Allocated {} of {} discount lines",
            applied,
            allocations.len()
        );

        allocations
    }

    fn allocate_one(contexts: &mut [LineContext], position: usize) -> Allocation {
        let requested = contexts[position].amount.abs();
        let sequence_index = contexts[position].sequence_index;
        let item_positions = Self::discount_range(contexts, position);

        let mut allocation = Allocation {
            discount_position: position,
            item_positions,
            requested,
            allocated: Decimal::ZERO,
            status: AllocationStatus::Applied,
        };

        if requested.is_zero() {
            debug!("Discount line {} has zero amount", sequence_index);
            allocation.status = AllocationStatus::ZeroDiscount;
            return allocation;
        }

        if allocation.item_positions.is_empty() {
            warn!(
                "Discount line {} has no preceding item lines; skipped",
                sequence_index
            );
            allocation.status = AllocationStatus::NoRange;
            return allocation;
        }

        let amounts: Vec<Decimal> = allocation
            .item_positions
            .iter()
            .map(|&i| contexts[i].amount)
            .collect();
        let Some(range_total) = Self::range_total(&amounts) else {
            warn!(
                "Discount line {} targets a range too large to total; skipped",
                sequence_index
            );
            allocation.status = AllocationStatus::Overflow;
            return allocation;
        };

        if range_total <= Decimal::ZERO {
            warn!(
                "Discount line {} targets a range totalling {}; skipped",
                sequence_index, range_total
            );
            allocation.status = AllocationStatus::EmptyRange;
            return allocation;
        }

        if requested > range_total {
            warn!(
                "Discount line {} of {} exceeds its range total {}; capped",
                sequence_index, requested, range_total
            );
            allocation.status = AllocationStatus::Clamped;
        }

        let Some(shares) = Self::distribute(&amounts, requested) else {
            warn!(
                "Discount line {} of {} cannot be proportioned over {}; skipped",
                sequence_index, requested, range_total
            );
            allocation.status = AllocationStatus::Overflow;
            return allocation;
        };

        for (&item, share) in allocation.item_positions.iter().zip(&shares) {
            contexts[item].attributed_discount += *share;
        }
        allocation.allocated = shares.iter().copied().sum();

        debug!(
            "Discount line {} allocated {} over {} items",
            sequence_index,
            allocation.allocated,
            allocation.item_positions.len()
        );

        allocation
    }

    /// Positions of the item lines a discount at `position` applies to.
    ///
    /// Backward scan to the nearest subtotal `s`; the range is every item
    /// after the subtotal preceding `s` (or the document start) and before
    /// `s`. Without a preceding subtotal, the nearest preceding item only.
    pub fn discount_range(contexts: &[LineContext], position: usize) -> Vec<usize> {
        let end = position.min(contexts.len());
        let subtotal = (0..end).rev().find(|&i| contexts[i].is_subtotal());

        match subtotal {
            Some(s) => {
                let start = (0..s)
                    .rev()
                    .find(|&i| contexts[i].is_subtotal())
                    .map(|previous| previous + 1)
                    .unwrap_or(0);
                (start..s).filter(|&i| contexts[i].is_item()).collect()
            }
            None => (0..end)
                .rev()
                .find(|&i| contexts[i].is_item())
                .into_iter()
                .collect(),
        }
    }

    /// Sum of absolute amounts in a range, `None` on overflow
    pub fn range_total(amounts: &[Decimal]) -> Option<Decimal> {
        amounts
            .iter()
            .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount.abs()))
    }

    /// Split `discount` across `amounts` proportionally.
    ///
    /// The discount is capped at the range total. Shares are rounded half away
    /// from zero to the currency scale. A positive residual goes to the
    /// largest amount (first on ties). A negative residual is taken back from
    /// the largest amounts downward without taking any share below zero.
    /// The shares sum exactly to `min(discount, range_total)`.
    ///
    /// Returns `None` for a non-positive range or when the products overflow.
    pub fn distribute(amounts: &[Decimal], discount: Decimal) -> Option<Vec<Decimal>> {
        let range_total = Self::range_total(amounts)?;
        if range_total <= Decimal::ZERO {
            return None;
        }

        let applied = discount.abs().min(range_total);

        let mut shares = amounts
            .iter()
            .map(|amount| {
                let weighted = applied.checked_mul(amount.abs())?;
                Some(money::round(weighted.checked_div(range_total)?))
            })
            .collect::<Option<Vec<Decimal>>>()?;

        let distributed = shares
            .iter()
            .try_fold(Decimal::ZERO, |total, share| total.checked_add(*share))?;
        let residual = applied - distributed;

        // Largest absolute amount first; the sort is stable so ties keep input order
        let mut order: Vec<usize> = (0..amounts.len()).collect();
        order.sort_by(|&a, &b| amounts[b].abs().cmp(&amounts[a].abs()));

        if residual > Decimal::ZERO {
            shares[order[0]] += residual;
        } else if residual < Decimal::ZERO {
            let mut excess = -residual;
            for &i in &order {
                if excess.is_zero() {
                    break;
                }
                let taken = excess.min(shares[i]);
                shares[i] -= taken;
                excess -= taken;
            }
        }

        Some(shares)
    }
}
