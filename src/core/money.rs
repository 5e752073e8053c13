use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places carried by every monetary amount in a submission
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds a value to the currency scale, half away from zero
pub fn round(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the smallest currency unit (0.01)
pub fn smallest_unit() -> Decimal {
    Decimal::new(1, CURRENCY_SCALE)
}

/// Upper bound on a document's summed line amounts and on a unit retail price.
/// Keeps every product the engine forms well inside `Decimal` range.
pub fn max_amount() -> Decimal {
    Decimal::from(1_000_000_000_000i64)
}

/// Upper bound on a line quantity
pub fn max_quantity() -> Decimal {
    Decimal::from(1_000_000_000i64)
}

/// Percentage of an amount, rounded to the currency scale.
/// `rate` is a percent value: 18 means 18%.
pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    round(amount * rate / Decimal::ONE_HUNDRED)
}

/// Parses an amount as emitted by accounting connectors.
///
/// Accepts thousands separators, a leading currency marker ("Rs", "PKR")
/// and surrounding whitespace. Returns `None` for empty or unparsable text.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let lowered = trimmed.to_ascii_lowercase();
    let without_marker = ["pkr", "rs.", "rs"]
        .iter()
        .find_map(|marker| lowered.strip_prefix(marker).map(|_| &trimmed[marker.len()..]))
        .unwrap_or(trimmed);

    let cleaned: String = without_marker
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<Decimal>().ok()
}

/// Formats an amount with exactly two decimal places
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round(amount))
}

/// Formats a percent value for rate labels: 17 -> "17%", 17.50 -> "17.5%"
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}
