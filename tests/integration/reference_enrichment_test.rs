// Reference enrichment against a lookup service
//
// Per-item isolation, timeouts, input-order results under bounded
// concurrency, and process-level caching of lookup answers.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::{StubLookup, TestDataFactory};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use taxline::invoices::ReferenceGuard;
use taxline::references::{CachedReferenceLookup, ReferenceEnricher, ReferenceLookup, ScheduleQuery};

fn query(scenario_code: &str, rate: Decimal) -> ScheduleQuery {
    ScheduleQuery {
        scenario_code: scenario_code.to_string(),
        tax_rate: rate,
        province_code: "7".to_string(),
        document_date: TestDataFactory::document_date(),
    }
}

#[tokio::test]
async fn test_first_usable_schedule_and_serial_are_taken() {
    let lookup = StubLookup::new()
        .with_schedule("SN005", "", "no id")
        .with_schedule("SN005", "389", "EIGHTH SCHEDULE Table 1")
        .with_schedule("SN005", "390", "EIGHTH SCHEDULE Table 2")
        .with_serial("389", " ")
        .with_serial("389", "82");
    let enricher = ReferenceEnricher::new(Arc::new(lookup), Duration::from_secs(5), 2);

    let pair = enricher.enrich(&query("SN005", dec!(5))).await;
    assert_eq!(pair.schedule_reference.as_deref(), Some("EIGHTH SCHEDULE Table 1"));
    assert_eq!(pair.reference_serial.as_deref(), Some("82"));
}

#[tokio::test]
async fn test_serial_failure_keeps_schedule_until_guarded() {
    let lookup = StubLookup::new()
        .with_schedule("SN005", "389", "EIGHTH SCHEDULE Table 1")
        .failing_schedule("389");
    let enricher = ReferenceEnricher::new(Arc::new(lookup), Duration::from_secs(5), 2);

    let pair = enricher.lookup_pair(&query("SN005", dec!(5))).await.unwrap();
    assert!(pair.schedule_reference.is_some());
    assert!(pair.reference_serial.is_none());

    assert!(ReferenceGuard::enforce(true, pair).is_empty());
}

#[tokio::test]
async fn test_schedule_failure_yields_empty_pair() {
    let lookup = StubLookup::new().failing_scenario("SN012");
    let enricher = ReferenceEnricher::new(Arc::new(lookup), Duration::from_secs(5), 2);

    assert!(enricher.lookup_pair(&query("SN012", dec!(17))).await.is_err());
    assert!(enricher.enrich(&query("SN012", dec!(17))).await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_slow_item_times_out_without_blocking_others() {
    let lookup = StubLookup::new()
        .with_schedule("SN005", "389", "EIGHTH SCHEDULE Table 1")
        .with_serial("389", "82")
        .with_schedule("SN024", "500", "SRO 297(I)/2023")
        .with_serial("500", "3")
        .delayed_scenario("SN024", Duration::from_secs(120));
    let enricher = ReferenceEnricher::new(Arc::new(lookup), Duration::from_secs(10), 4);

    let pairs = enricher
        .enrich_all(vec![
            Some(query("SN005", dec!(5))),
            Some(query("SN024", dec!(18))),
            None,
            Some(query("SN005", dec!(5))),
        ])
        .await;

    assert_eq!(pairs.len(), 4);
    assert!(pairs[0].is_complete());
    assert!(pairs[1].is_empty());
    assert!(pairs[2].is_empty());
    assert!(pairs[3].is_complete());
}

#[tokio::test]
async fn test_results_keep_input_order_under_concurrency() {
    let lookup = StubLookup::new()
        .with_schedule("SN005", "389", "EIGHTH SCHEDULE Table 1")
        .with_serial("389", "82")
        .with_schedule("SN006", "12", "SIXTH SCHEDULE")
        .with_serial("12", "151")
        .delayed_scenario("SN005", Duration::from_millis(30));
    let enricher = ReferenceEnricher::new(Arc::new(lookup), Duration::from_secs(5), 8);

    let queries: Vec<Option<ScheduleQuery>> = (0..10)
        .map(|i| {
            if i % 2 == 0 {
                Some(query("SN005", dec!(5)))
            } else {
                Some(query("SN006", dec!(0)))
            }
        })
        .collect();

    let pairs = enricher.enrich_all(queries).await;
    for (i, pair) in pairs.iter().enumerate() {
        let expected = if i % 2 == 0 { "82" } else { "151" };
        assert_eq!(pair.reference_serial.as_deref(), Some(expected), "item {}", i);
    }
}

#[tokio::test]
async fn test_cache_answers_repeated_queries_once() {
    let stub = Arc::new(
        StubLookup::new()
            .with_schedule("SN005", "389", "EIGHTH SCHEDULE Table 1")
            .with_serial("389", "82"),
    );
    let cached = Arc::new(CachedReferenceLookup::new(stub.clone()));
    let enricher = ReferenceEnricher::new(cached.clone(), Duration::from_secs(5), 1);

    let queries = vec![Some(query("SN005", dec!(5))); 5];
    let pairs = enricher.enrich_all(queries).await;

    assert!(pairs.iter().all(|p| p.is_complete()));
    assert_eq!(stub.schedule_calls(), 1);
    assert_eq!(stub.serial_calls(), 1);
    assert_eq!(cached.cached_entries().await, (1, 1));
    assert_eq!(cached.name(), "stub");
}

#[tokio::test]
async fn test_cache_does_not_keep_failures() {
    let stub = Arc::new(StubLookup::new().failing_scenario("SN012"));
    let cached = CachedReferenceLookup::new(stub.clone());

    assert!(cached.schedule_candidates(&query("SN012", dec!(17))).await.is_err());
    assert!(cached.schedule_candidates(&query("SN012", dec!(17))).await.is_err());

    assert_eq!(stub.schedule_calls(), 2);
    assert_eq!(cached.cached_entries().await, (0, 0));
}
