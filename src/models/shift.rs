use serde::{Deserialize, Serialize};

use crate::domain::{IdentityId, LocationId, ShiftId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub location_id: LocationId,
    /// Barista in charge.
    pub bic_id: IdentityId,
    pub start_time: String,
    /// `None` while the shift is open.
    pub end_time: Option<String>,
    pub cash_float_verified: bool,
    pub briefing_completed: bool,
}

impl Shift {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct NewShift {
    pub location_id: LocationId,
    pub bic_id: IdentityId,
    pub cash_float_verified: bool,
    pub briefing_completed: bool,
}

/// Result of the atomic "insert shift + consume one-time briefings" unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenShiftOutcome {
    Opened { shift: Shift, consumed: u64 },
    /// The identity already had an open shift; nothing was written.
    AlreadyOpen(Shift),
}
