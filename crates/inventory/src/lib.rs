//! Board inventory domain module.
//!
//! Business rules for board stock held in warehouses, implemented purely as
//! deterministic domain logic (no IO, no terminal, no storage).

pub mod spec;
pub mod stats;
pub mod volume;
pub mod warehouse;
pub mod warning;

pub use spec::{Dimensions, MAX_DIMENSION, MIN_DIMENSION, SPEC_SEPARATOR, Specification, short_label};
pub use stats::{sort_by_thickness, thickness_of, totals};
pub use volume::{Counts, MAX_COUNT, Measurement, VOLUME_EPSILON, measure, round_volume};
pub use warehouse::{
    BoardsStored, BoardsTaken, OpenWarehouse, StockEntry, StoreBoards, TakeBoards, Warehouse,
    WarehouseCommand, WarehouseEvent, WarehouseOpened,
};
pub use warning::{DEFAULT_THRESHOLD, MAX_THRESHOLD, WarningSettings};
