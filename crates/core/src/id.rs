//! Strongly-typed identifiers used across the domain.

use serde::Serialize;
use uuid::Uuid;

/// Identifier of a warehouse (storage bin).
///
/// Names are user-facing and may be edited; the id is the stable key used
/// in the movement journal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WarehouseId(Uuid);

impl WarehouseId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for WarehouseId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for WarehouseId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
