// Scenario resolution against the scenario catalog
//
// Buyer-dependent codes, fallback for unknown labels, and the rule that any
// rate other than the standard rate needs a regulatory reference.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use taxline::scenarios::{BuyerStatus, ScenarioCatalog, ScenarioDefinition, TaxCategory};
use taxline::taxes::{TaxCalculator, TaxInput, TaxRegime, TaxResolver};

#[test]
fn test_every_builtin_scenario_resolves_to_itself() {
    let resolver = TaxResolver::default();
    let labels: Vec<(String, String)> = resolver
        .catalog()
        .definitions()
        .map(|d| (d.sale_type.clone(), d.scenario_code.clone()))
        .collect();

    for (label, code) in labels {
        let resolution = resolver.resolve(&label, BuyerStatus::Registered, dec!(18));
        assert_eq!(resolution.scenario_code, code, "label '{}'", label);
        assert!(!resolution.fell_back);
        assert_eq!(resolution.sale_type, label);
    }
}

#[test]
fn test_exempt_and_zero_rated_scenarios() {
    let resolver = TaxResolver::default();

    let exempt = resolver.resolve("Exempt goods", BuyerStatus::Registered, dec!(0));
    assert_eq!(exempt.scenario_code, "SN006");
    assert!(exempt.requires_reference);
    assert_eq!(TaxRegime::select(&exempt, dec!(0)), TaxRegime::Exempt);

    let zero = resolver.resolve("Goods at zero-rate", BuyerStatus::Registered, dec!(0));
    assert_eq!(zero.scenario_code, "SN007");
    assert_eq!(TaxRegime::select(&zero, dec!(0)), TaxRegime::ZeroRated);
}

#[test]
fn test_partial_label_matches_by_substring() {
    let resolver = TaxResolver::default();
    let resolution = resolver.resolve("mobile phones", BuyerStatus::Registered, dec!(18));
    assert_eq!(resolution.scenario_code, "SN015");
    assert_eq!(resolution.sale_type, "Mobile Phones");
    assert!(resolution.requires_reference);
}

#[test]
fn test_further_tax_regime_only_above_standard_rate() {
    let resolver = TaxResolver::default();

    let steel = resolver.resolve("Steel melting and re-rolling", BuyerStatus::Registered, dec!(22));
    assert_eq!(TaxRegime::select(&steel, dec!(22)), TaxRegime::SplitRate);
    assert_eq!(TaxRegime::select(&steel, dec!(18)), TaxRegime::Standard);

    for label in ["Services", "Ship breaking", "Goods at Reduced Rate"] {
        let resolution = resolver.resolve(label, BuyerStatus::Registered, dec!(22));
        assert_eq!(TaxRegime::select(&resolution, dec!(22)), TaxRegime::SplitRate, "{}", label);
    }
}

#[test]
fn test_services_at_25_percent_split_into_further_tax() {
    let resolver = TaxResolver::default();
    let services = resolver.resolve("Services", BuyerStatus::Registered, dec!(25));
    let regime = TaxRegime::select(&services, dec!(25));
    assert_eq!(regime, TaxRegime::SplitRate);

    let result = TaxCalculator::new().calculate(
        &regime,
        &TaxInput {
            gross_amount: dec!(1000),
            attributed_discount: Decimal::ZERO,
            quantity: dec!(1),
            declared_rate: dec!(25),
            retail_price: None,
        },
    );
    assert_eq!(result.primary_tax, dec!(180.00));
    assert_eq!(result.secondary_tax, dec!(70.00));
    assert_eq!(result.total_value, dec!(1250.00));
    assert!(services.requires_reference);
}

#[test]
fn test_custom_catalog_is_used() {
    let mut definitions: Vec<ScenarioDefinition> = ScenarioCatalog::default().definitions().cloned().collect();
    definitions.push(ScenarioDefinition::new(
        "Solar panels",
        "SN099",
        "Sale of solar panels",
        false,
        TaxCategory::ZeroRated,
    ));
    let catalog = ScenarioCatalog::from_definitions(definitions).unwrap();
    let resolver = TaxResolver::new(Arc::new(catalog));

    let resolution = resolver.resolve("Solar Panels", BuyerStatus::Registered, dec!(18));
    assert_eq!(resolution.scenario_code, "SN099");
    assert!(!resolution.requires_reference);
}

fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|basis_points| Decimal::new(basis_points, 2))
}

proptest! {
    #[test]
    fn test_non_standard_rate_always_requires_reference(rate in arb_rate(), index in 0usize..25) {
        let resolver = TaxResolver::default();
        let labels: Vec<String> = resolver.catalog().definitions().map(|d| d.sale_type.clone()).collect();
        let label = &labels[index % labels.len()];

        let resolution = resolver.resolve(label, BuyerStatus::Registered, rate);
        if rate != dec!(18) {
            prop_assert!(resolution.requires_reference, "{} at {}%", label, rate);
        }
    }

    #[test]
    fn test_resolution_is_deterministic(label in "[A-Za-z ()-]{0,30}", registered in any::<bool>()) {
        let resolver = TaxResolver::default();
        let buyer = if registered { BuyerStatus::Registered } else { BuyerStatus::Unregistered };

        let first = resolver.resolve(&label, buyer, dec!(18));
        let second = resolver.resolve(&label, buyer, dec!(18));
        prop_assert_eq!(first, second);
    }
}
