use chrono::{DateTime, Utc};

/// A recorded stock movement.
///
/// Movements are facts: once journaled they are never edited, and a
/// correction is a new movement.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted movement name, e.g. `"warehouse.boards.stored"`.
    fn event_type(&self) -> &'static str;

    /// Payload schema version.
    fn version(&self) -> u32;

    /// Wall-clock time the movement was made.
    fn occurred_at(&self) -> DateTime<Utc>;
}
