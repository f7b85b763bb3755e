//! In-memory, append-only movement journal.
//!
//! Nothing here touches disk; the journal lives as long as the process.

use std::collections::HashMap;

use uuid::Uuid;

use boardstock_core::WarehouseId;

use crate::envelope::EventEnvelope;
use crate::event::Event;

/// Append-only log of enveloped events.
///
/// Assigns the per-stream `sequence_number` and journal-wide `position`
/// on append, so callers only hand over payloads.
#[derive(Debug, Clone)]
pub struct Journal<E> {
    entries: Vec<EventEnvelope<E>>,
    stream_heads: HashMap<WarehouseId, u64>,
}

impl<E> Default for Journal<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            stream_heads: HashMap::new(),
        }
    }
}

impl<E: Event> Journal<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append events for one aggregate stream and return the new envelopes.
    pub fn append(
        &mut self,
        aggregate_id: WarehouseId,
        aggregate_type: &str,
        events: impl IntoIterator<Item = E>,
    ) -> &[EventEnvelope<E>] {
        let start = self.entries.len();
        for event in events {
            let head = self.stream_heads.entry(aggregate_id).or_insert(0);
            *head += 1;
            let position = self.entries.len() as u64 + 1;
            self.entries.push(EventEnvelope::new(
                Uuid::now_v7(),
                aggregate_id,
                aggregate_type,
                *head,
                position,
                event,
            ));
        }
        &self.entries[start..]
    }

    /// Current head sequence number of a stream (0 when empty).
    pub fn stream_version(&self, aggregate_id: WarehouseId) -> u64 {
        self.stream_heads.get(&aggregate_id).copied().unwrap_or(0)
    }

    /// All envelopes of one stream, in order.
    pub fn stream(&self, aggregate_id: WarehouseId) -> impl Iterator<Item = &EventEnvelope<E>> {
        self.entries
            .iter()
            .filter(move |env| env.aggregate_id() == aggregate_id)
    }

    /// Every envelope, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &EventEnvelope<E>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
