use serde::{Deserialize, Serialize};

use super::ShiftId;
use crate::models::Shift;

/// Shift state of one identity: `NoShift -> Open -> NoShift`.
///
/// Each `Open` instance is terminal for its shift row; the next cycle starts
/// with a new row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "state", content = "shift", rename_all = "snake_case")]
pub enum ShiftState {
    #[default]
    NoShift,
    Open(Shift),
}

impl ShiftState {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    #[must_use]
    pub const fn shift(&self) -> Option<&Shift> {
        match self {
            Self::Open(shift) => Some(shift),
            Self::NoShift => None,
        }
    }

    #[must_use]
    pub fn shift_id(&self) -> Option<ShiftId> {
        self.shift().map(|s| s.id)
    }
}

impl From<Option<Shift>> for ShiftState {
    fn from(shift: Option<Shift>) -> Self {
        shift.map_or(Self::NoShift, Self::Open)
    }
}

/// The opening checklist every barista ticks before a shift can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemChecks {
    pub pos: bool,
    pub wifi: bool,
    pub payment: bool,
    pub cash_float: bool,
}

impl SystemChecks {
    /// Every check ticked.
    pub const ALL: Self = Self {
        pos: true,
        wifi: true,
        payment: true,
        cash_float: true,
    };

    #[must_use]
    pub const fn all_verified(&self) -> bool {
        self.pos && self.wifi && self.payment && self.cash_float
    }

    /// Labels of the checks still unticked, in checklist order.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.pos, "POS terminals"),
            (self.wifi, "Wi-Fi"),
            (self.payment, "Card/M-Pesa"),
            (self.cash_float, "Cash float"),
        ]
        .into_iter()
        .filter(|(checked, _)| !checked)
        .map(|(_, label)| label)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_unticked_check_blocks() {
        assert!(SystemChecks::ALL.all_verified());

        let mut checks = SystemChecks::ALL;
        checks.wifi = false;
        assert!(!checks.all_verified());
        assert_eq!(checks.missing(), vec!["Wi-Fi"]);

        assert_eq!(SystemChecks::default().missing().len(), 4);
    }

    #[test]
    fn missing_fields_deserialize_as_unticked() {
        let checks: SystemChecks = serde_json::from_str(r#"{"pos": true}"#).unwrap();
        assert!(checks.pos);
        assert!(!checks.cash_float);
    }

    #[test]
    fn no_shift_serializes_without_payload() {
        let json = serde_json::to_value(ShiftState::NoShift).unwrap();
        assert_eq!(json, serde_json::json!({"state": "no_shift"}));
    }
}
