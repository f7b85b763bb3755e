use serde::Serialize;
use uuid::Uuid;

use boardstock_core::WarehouseId;

/// Envelope for an event, carrying stream metadata.
///
/// This is the unit appended to the movement journal.
///
/// Notes:
/// - `sequence_number` increases by one per event within a warehouse stream.
/// - `position` increases by one per event across the whole journal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,

    aggregate_id: WarehouseId,
    aggregate_type: String,

    /// Monotonically increasing position in the aggregate stream.
    sequence_number: u64,

    /// Monotonically increasing position in the journal.
    position: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: Uuid,
        aggregate_id: WarehouseId,
        aggregate_type: impl Into<String>,
        sequence_number: u64,
        position: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            aggregate_id,
            aggregate_type: aggregate_type.into(),
            sequence_number,
            position,
            payload,
        }
    }

    pub fn aggregate_id(&self) -> WarehouseId {
        self.aggregate_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}
