//! Domain types for shift operations with strong typing.
//!
//! Identifiers follow the Newtype pattern so a `ShiftId` can never be passed
//! where a `LocationId` is expected. Roles and the small closed vocabularies
//! stored as text columns (recurrence, task category, ticket status) live here
//! too, together with their string forms.

pub mod shift;

pub use shift::{ShiftState, SystemChecks};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self::new(id)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_i32(self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                i32::deserialize(deserializer).map(Self::new)
            }
        }
    };
}

entity_id!(
    /// Identifier of a staff profile (barista, manager or core).
    IdentityId
);
entity_id!(
    /// Identifier of a café location.
    LocationId
);
entity_id!(
    /// Identifier of a shift row.
    ShiftId
);
entity_id!(
    /// Identifier of a briefing item.
    BriefingId
);
entity_id!(
    /// Identifier of a location task.
    TaskId
);

/// Error returned when a stored or submitted string is not part of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

text_enum!(
    /// Staff role. Decides which screens an identity may reach.
    Role, "role" {
        Barista => "barista",
        Manager => "manager",
        Core => "core",
    }
);

impl Role {
    /// Managers and core staff broadcast briefings, dispatch tasks and read the audit feed.
    #[must_use]
    pub const fn is_lead(&self) -> bool {
        matches!(self, Self::Manager | Self::Core)
    }
}

text_enum!(
    /// How long a briefing item stays active.
    ///
    /// `Recurring` items stay until someone deactivates them, `Once` items are
    /// consumed by the first shift started at their location after being read.
    Recurrence, "recurrence" {
        Recurring => "recurring",
        Once => "once",
    }
);

text_enum!(
    /// Category of a dispatched location task.
    TaskCategory, "task category" {
        General => "general",
        Maintenance => "maintenance",
        Adhoc => "adhoc",
    }
);

impl Default for TaskCategory {
    fn default() -> Self {
        Self::General
    }
}

text_enum!(
    /// Maintenance ticket lifecycle.
    TicketStatus, "ticket status" {
        Open => "open",
        Resolved => "resolved",
    }
);

/// Where a broadcast (briefing item or task) goes: every location or one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TargetRepr", into = "TargetRepr")]
pub enum BroadcastTarget {
    All,
    Location(LocationId),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TargetRepr {
    Id(i32),
    Keyword(String),
}

impl TryFrom<TargetRepr> for BroadcastTarget {
    type Error = UnknownVariant;

    fn try_from(repr: TargetRepr) -> Result<Self, Self::Error> {
        match repr {
            TargetRepr::Id(id) => Ok(Self::Location(LocationId::new(id))),
            TargetRepr::Keyword(word) if word.trim().eq_ignore_ascii_case("all") => Ok(Self::All),
            TargetRepr::Keyword(word) => word
                .trim()
                .parse::<i32>()
                .map(|id| Self::Location(LocationId::new(id)))
                .map_err(|_| UnknownVariant {
                    kind: "broadcast target",
                    value: word,
                }),
        }
    }
}

impl From<BroadcastTarget> for TargetRepr {
    fn from(target: BroadcastTarget) -> Self {
        match target {
            BroadcastTarget::All => Self::Keyword("all".to_string()),
            BroadcastTarget::Location(id) => Self::Id(id.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_convert_and_display() {
        let id = ShiftId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(i32::from(id), 42);
        assert_eq!(ShiftId::from(42), id);
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&LocationId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: LocationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LocationId::new(7));
    }

    #[test]
    fn role_parsing_is_case_insensitive() {
        assert_eq!("Barista".parse::<Role>().unwrap(), Role::Barista);
        assert_eq!(" core ".parse::<Role>().unwrap(), Role::Core);
        let err = "owner".parse::<Role>().unwrap_err();
        assert_eq!(err.kind, "role");
        assert_eq!(err.to_string(), "Unknown role: 'owner'");
    }

    #[test]
    fn only_managers_and_core_lead() {
        assert!(!Role::Barista.is_lead());
        assert!(Role::Manager.is_lead());
        assert!(Role::Core.is_lead());
    }

    #[test]
    fn broadcast_target_accepts_keyword_or_location_id() {
        let all: BroadcastTarget = serde_json::from_str("\"ALL\"").unwrap();
        assert_eq!(all, BroadcastTarget::All);

        let one: BroadcastTarget = serde_json::from_str("3").unwrap();
        assert_eq!(one, BroadcastTarget::Location(LocationId::new(3)));

        let quoted: BroadcastTarget = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(quoted, one);

        assert!(serde_json::from_str::<BroadcastTarget>("\"everywhere\"").is_err());
        assert_eq!(serde_json::to_string(&BroadcastTarget::All).unwrap(), "\"all\"");
    }

    #[test]
    fn vocabularies_round_trip_through_text() {
        for r in [Recurrence::Recurring, Recurrence::Once] {
            assert_eq!(r.as_str().parse::<Recurrence>().unwrap(), r);
        }
        assert_eq!("adhoc".parse::<TaskCategory>().unwrap(), TaskCategory::Adhoc);
        assert_eq!(TicketStatus::Open.to_string(), "open");
        assert_eq!(
            serde_json::to_string(&TaskCategory::Maintenance).unwrap(),
            "\"maintenance\""
        );
    }
}
