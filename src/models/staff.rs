use serde::{Deserialize, Serialize};

use crate::domain::{IdentityId, LocationId, Role};

/// A staff profile as seen by the rest of the system. The PIN hash never
/// leaves the store layer inside this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}
