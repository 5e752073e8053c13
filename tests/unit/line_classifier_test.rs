// Line classification: labels, exclusions and ordering
//
// Classification is a pure function of each line's own fields, so running
// it twice over the same document gives the same contexts.

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::{LineBuilder, TestDataFactory};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use taxline::ledger::{classify_line, classify_lines, LineLabel, RawLedgerLine};

#[test]
fn test_negative_amount_is_discount_even_with_reference() {
    let line = LineBuilder::new(1, dec!(-50))
        .reference("ITEM-9")
        .line_type("Inventory")
        .quantity(dec!(1))
        .build();

    assert_eq!(classify_line(&line), Some(LineLabel::Discount));
}

#[test]
fn test_discount_marker_is_case_insensitive() {
    let line = LineBuilder::new(1, dec!(-10))
        .description("Loyalty DISCOUNT applied")
        .build();
    assert_eq!(classify_line(&line), Some(LineLabel::Discount));
}

#[test]
fn test_subtotal_marker_variants() {
    for marker in ["Subtotal", "SUB TOTAL", "Sub-Total"] {
        let line = LineBuilder::new(1, dec!(100)).description(marker).build();
        assert_eq!(classify_line(&line), Some(LineLabel::Subtotal), "{}", marker);
    }
}

#[test]
fn test_inferred_subtotal_without_marker() {
    let line = LineBuilder::new(1, dec!(4500)).line_type("Group").build();
    assert_eq!(classify_line(&line), Some(LineLabel::Subtotal));
}

#[test]
fn test_zero_amount_line_without_reference_or_type_is_excluded() {
    let line = LineBuilder::new(1, Decimal::ZERO).description("Thank you").build();
    assert_eq!(classify_line(&line), None);
}

#[test]
fn test_service_line_without_quantity_is_item() {
    let line = LineBuilder::new(1, dec!(5000))
        .reference("SVC-CONSULT")
        .line_type("Service")
        .build();
    assert_eq!(classify_line(&line), Some(LineLabel::Item));
}

#[test]
fn test_classify_lines_sorts_by_sequence_index() {
    let lines = vec![
        TestDataFactory::discount(3, dec!(100)),
        TestDataFactory::item(1, "A", dec!(2), dec!(1000)),
        TestDataFactory::subtotal(2, dec!(1000)),
    ];

    let contexts = classify_lines(&lines);
    let labels: Vec<LineLabel> = contexts.iter().map(|c| c.label).collect();
    assert_eq!(
        labels,
        vec![LineLabel::Item, LineLabel::Subtotal, LineLabel::Discount]
    );
    // Positions still point into the original line list
    assert_eq!(contexts[0].index, 1);
    assert_eq!(contexts[2].index, 0);
}

#[test]
fn test_classify_lines_drops_excluded_lines() {
    let lines = vec![
        TestDataFactory::item(1, "A", dec!(1), dec!(100)),
        LineBuilder::new(2, Decimal::ZERO).description("Notes").build(),
        TestDataFactory::item(3, "B", dec!(1), dec!(200)),
    ];

    let contexts = classify_lines(&lines);
    assert_eq!(contexts.len(), 2);
    assert!(contexts.iter().all(|c| c.is_item()));
}

fn arb_line() -> impl Strategy<Value = RawLedgerLine> {
    (
        0u32..50,
        prop::sample::select(vec!["", "ITEM-1", "ITEM-2"]),
        prop::sample::select(vec!["", "Inventory", "Discount", "Service"]),
        prop::sample::select(vec!["", "Widget", "Subtotal", "Discount 5%"]),
        prop::option::of(0u32..10),
        -10_000i64..10_000i64,
    )
        .prop_map(|(seq, reference, line_type, description, quantity, cents)| {
            let mut builder = LineBuilder::new(seq, Decimal::new(cents, 2))
                .reference(reference)
                .line_type(line_type)
                .description(description);
            if let Some(q) = quantity {
                builder = builder.quantity(Decimal::from(q));
            }
            builder.build()
        })
}

proptest! {
    #[test]
    fn test_classification_is_idempotent(lines in prop::collection::vec(arb_line(), 0..20)) {
        let first = classify_lines(&lines);
        let second = classify_lines(&lines);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_every_negative_line_is_a_discount(line in arb_line()) {
        if line.amount < Decimal::ZERO {
            prop_assert_eq!(classify_line(&line), Some(LineLabel::Discount));
        }
    }

    #[test]
    fn test_contexts_are_ordered(lines in prop::collection::vec(arb_line(), 0..20)) {
        let contexts = classify_lines(&lines);
        prop_assert!(contexts.windows(2).all(|w| w[0].sequence_index <= w[1].sequence_index));
    }
}
