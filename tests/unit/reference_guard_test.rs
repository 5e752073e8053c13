// Reference pair consistency on finalized items
//
// A finalized item carries both the schedule reference and its serial, or
// neither.

use proptest::prelude::*;
use taxline::invoices::ReferenceGuard;
use taxline::references::models::is_blank;
use taxline::references::ReferencePair;

fn pair(schedule: Option<&str>, serial: Option<&str>) -> ReferencePair {
    ReferencePair::new(schedule.map(String::from), serial.map(String::from))
}

#[test]
fn test_required_complete_pair_passes_through() {
    let result = ReferenceGuard::enforce(true, pair(Some("6th Schedule"), Some("151")));
    assert!(result.is_complete());
    assert_eq!(result.schedule_reference.as_deref(), Some("6th Schedule"));
    assert_eq!(result.reference_serial.as_deref(), Some("151"));
}

#[test]
fn test_required_half_pair_is_cleared() {
    assert!(ReferenceGuard::enforce(true, pair(Some("6th Schedule"), None)).is_empty());
    assert!(ReferenceGuard::enforce(true, pair(None, Some("151"))).is_empty());
    assert!(ReferenceGuard::enforce(true, pair(Some(""), Some("151"))).is_empty());
}

#[test]
fn test_not_required_drops_everything() {
    assert!(ReferenceGuard::enforce(false, pair(Some("6th Schedule"), Some("151"))).is_empty());
}

fn arb_side() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("   ".to_string())),
        "[A-Za-z0-9 ()/.-]{1,24}".prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn test_guarded_pair_is_all_or_nothing(
        required in any::<bool>(),
        schedule in arb_side(),
        serial in arb_side(),
    ) {
        let result = ReferenceGuard::enforce(required, ReferencePair::new(schedule, serial));
        prop_assert_eq!(
            is_blank(&result.schedule_reference),
            is_blank(&result.reference_serial)
        );
        if !required {
            prop_assert!(result.is_empty());
        }
    }

    #[test]
    fn test_guard_is_idempotent(
        required in any::<bool>(),
        schedule in arb_side(),
        serial in arb_side(),
    ) {
        let once = ReferenceGuard::enforce(required, ReferencePair::new(schedule, serial));
        let twice = ReferenceGuard::enforce(required, once.clone());
        prop_assert_eq!(once, twice);
    }
}
