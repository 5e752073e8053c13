use tracing::{debug, warn};

use crate::modules::references::models::{is_blank, ReferencePair};

/// Keeps the schedule reference and its serial consistent.
///
/// A half-filled pair is rejected outright by the tax authority while an
/// absent pair is only incomplete, so a half pair is cleared.
pub struct ReferenceGuard;

impl ReferenceGuard {
    /// Return the pair an item may carry.
    ///
    /// - item needs no reference: always empty
    /// - exactly one side filled: both cleared
    /// - otherwise the trimmed pair as given
    pub fn enforce(requires_reference: bool, pair: ReferencePair) -> ReferencePair {
        if !requires_reference {
            if !pair.is_empty() {
                debug!("Dropping reference pair on an item that needs none");
            }
            return ReferencePair::empty();
        }

        let schedule_blank = is_blank(&pair.schedule_reference);
        let serial_blank = is_blank(&pair.reference_serial);

        match (schedule_blank, serial_blank) {
            (false, false) => ReferencePair::new(
                pair.schedule_reference.map(|s| s.trim().to_string()),
                pair.reference_serial.map(|s| s.trim().to_string()),
            ),
            (true, true) => ReferencePair::empty(),
            _ => {
                warn!(
                    "Clearing half-filled reference pair (schedule: {:?}, serial: {:?})",
                    pair.schedule_reference, pair.reference_serial
                );
                ReferencePair::empty()
            }
        }
    }
}
