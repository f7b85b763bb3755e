use chrono::{DateTime, Utc};
use serde::Serialize;

use boardstock_core::{Aggregate, AggregateRoot, DomainError, DomainResult, WarehouseId};
use boardstock_events::Event;

use crate::spec::Specification;
use crate::stats::sort_by_thickness;
use crate::volume::{VOLUME_EPSILON, round_volume};
use crate::warning::WarningSettings;

/// Stock of one specification inside one warehouse.
#[derive(Debug, Clone, PartialEq)]
pub struct StockEntry {
    pub specification: Specification,
    pub volume: f64,
}

/// Aggregate root: Warehouse (a named storage bin).
///
/// Holds at most one entry per specification, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Warehouse {
    id: WarehouseId,
    name: String,
    entries: Vec<StockEntry>,
    version: u64,
    opened: bool,
}

impl Warehouse {
    /// Create an empty, not-yet-opened aggregate instance.
    pub fn empty(id: WarehouseId) -> Self {
        Self {
            id,
            name: String::new(),
            entries: Vec::new(),
            version: 0,
            opened: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    pub fn entries(&self) -> &[StockEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn volume_of(&self, spec: &Specification) -> Option<f64> {
        self.entry(spec).map(|e| e.volume)
    }

    pub fn specifications(&self) -> impl Iterator<Item = &Specification> {
        self.entries.iter().map(|e| &e.specification)
    }

    /// Entries as (spec, volume) pairs sorted by thickness.
    pub fn sorted_stock(&self) -> Vec<(Specification, f64)> {
        let mut stock: Vec<(Specification, f64)> = self
            .entries
            .iter()
            .map(|e| (e.specification.clone(), e.volume))
            .collect();
        sort_by_thickness(&mut stock);
        stock
    }

    /// Entries under the warning threshold, in insertion order.
    pub fn low_stock(&self, settings: &WarningSettings) -> Vec<&StockEntry> {
        self.entries
            .iter()
            .filter(|e| settings.is_low(e.volume))
            .collect()
    }

    pub fn has_low_stock(&self, settings: &WarningSettings) -> bool {
        self.entries.iter().any(|e| settings.is_low(e.volume))
    }

    fn entry(&self, spec: &Specification) -> Option<&StockEntry> {
        self.entries.iter().find(|e| &e.specification == spec)
    }
}

impl AggregateRoot for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: OpenWarehouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenWarehouse {
    pub warehouse_id: WarehouseId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: StoreBoards (deposit).
#[derive(Debug, Clone, PartialEq)]
pub struct StoreBoards {
    pub warehouse_id: WarehouseId,
    pub specification: Specification,
    pub volume: f64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: TakeBoards (withdrawal).
#[derive(Debug, Clone, PartialEq)]
pub struct TakeBoards {
    pub warehouse_id: WarehouseId,
    pub specification: Specification,
    pub volume: f64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WarehouseCommand {
    Open(OpenWarehouse),
    Store(StoreBoards),
    Take(TakeBoards),
}

/// Event: WarehouseOpened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarehouseOpened {
    pub warehouse_id: WarehouseId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: BoardsStored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardsStored {
    pub warehouse_id: WarehouseId,
    pub specification: Specification,
    pub volume: f64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: BoardsTaken.
///
/// `remaining` is the entry's volume afterwards; zero means the entry is gone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardsTaken {
    pub warehouse_id: WarehouseId,
    pub specification: Specification,
    pub volume: f64,
    pub remaining: f64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarehouseEvent {
    Opened(WarehouseOpened),
    Stored(BoardsStored),
    Taken(BoardsTaken),
}

impl Event for WarehouseEvent {
    fn event_type(&self) -> &'static str {
        match self {
            WarehouseEvent::Opened(_) => "warehouse.opened",
            WarehouseEvent::Stored(_) => "warehouse.boards.stored",
            WarehouseEvent::Taken(_) => "warehouse.boards.taken",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            WarehouseEvent::Opened(e) => e.occurred_at,
            WarehouseEvent::Stored(e) => e.occurred_at,
            WarehouseEvent::Taken(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Warehouse {
    type Command = WarehouseCommand;
    type Event = WarehouseEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            WarehouseEvent::Opened(e) => {
                self.id = e.warehouse_id;
                self.name = e.name.clone();
                self.entries.clear();
                self.opened = true;
            }
            WarehouseEvent::Stored(e) => {
                match self
                    .entries
                    .iter_mut()
                    .find(|entry| entry.specification == e.specification)
                {
                    Some(entry) => entry.volume = round_volume(entry.volume + e.volume),
                    None => self.entries.push(StockEntry {
                        specification: e.specification.clone(),
                        volume: e.volume,
                    }),
                }
            }
            WarehouseEvent::Taken(e) => {
                if e.remaining <= VOLUME_EPSILON {
                    self.entries.retain(|entry| entry.specification != e.specification);
                } else if let Some(entry) = self
                    .entries
                    .iter_mut()
                    .find(|entry| entry.specification == e.specification)
                {
                    entry.volume = e.remaining;
                }
            }
        }

        // +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            WarehouseCommand::Open(cmd) => self.handle_open(cmd),
            WarehouseCommand::Store(cmd) => self.handle_store(cmd),
            WarehouseCommand::Take(cmd) => self.handle_take(cmd),
        }
    }
}

impl Warehouse {
    fn ensure_warehouse_id(&self, warehouse_id: WarehouseId) -> DomainResult<()> {
        if self.id != warehouse_id {
            return Err(DomainError::invariant("warehouse_id mismatch"));
        }
        Ok(())
    }

    fn ensure_opened(&self) -> DomainResult<()> {
        if !self.opened {
            return Err(DomainError::not_found(format!("warehouse {}", self.id)));
        }
        Ok(())
    }

    fn handle_open(&self, cmd: &OpenWarehouse) -> DomainResult<Vec<WarehouseEvent>> {
        if self.opened {
            return Err(DomainError::conflict("warehouse already exists"));
        }
        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("warehouse name cannot be empty"));
        }
        Ok(vec![WarehouseEvent::Opened(WarehouseOpened {
            warehouse_id: cmd.warehouse_id,
            name: name.to_string(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_store(&self, cmd: &StoreBoards) -> DomainResult<Vec<WarehouseEvent>> {
        self.ensure_opened()?;
        self.ensure_warehouse_id(cmd.warehouse_id)?;
        let volume = positive_volume(cmd.volume)?;

        Ok(vec![WarehouseEvent::Stored(BoardsStored {
            warehouse_id: cmd.warehouse_id,
            specification: cmd.specification.clone(),
            volume,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_take(&self, cmd: &TakeBoards) -> DomainResult<Vec<WarehouseEvent>> {
        self.ensure_opened()?;
        self.ensure_warehouse_id(cmd.warehouse_id)?;
        let volume = positive_volume(cmd.volume)?;

        let available = self.volume_of(&cmd.specification).ok_or_else(|| {
            DomainError::not_found(format!("{} in {}", cmd.specification, self.name))
        })?;

        if volume > available + VOLUME_EPSILON {
            return Err(DomainError::insufficient(volume, available));
        }

        let remaining = round_volume(available - volume).max(0.0);

        Ok(vec![WarehouseEvent::Taken(BoardsTaken {
            warehouse_id: cmd.warehouse_id,
            specification: cmd.specification.clone(),
            volume,
            remaining,
            occurred_at: cmd.occurred_at,
        })])
    }
}

/// Round a requested volume onto the three-decimal grid; it must stay > 0.
fn positive_volume(volume: f64) -> DomainResult<f64> {
    let rounded = round_volume(volume);
    if !rounded.is_finite() || rounded <= 0.0 {
        return Err(DomainError::validation(format!(
            "volume must be at least 0.001 方 (got {volume})"
        )));
    }
    Ok(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn test_id() -> WarehouseId {
        WarehouseId::from_uuid(Uuid::from_u128(0xA))
    }

    fn spec(key: &str) -> Specification {
        key.parse().unwrap()
    }

    fn opened(name: &str) -> Warehouse {
        let mut wh = Warehouse::empty(test_id());
        wh.execute(&WarehouseCommand::Open(OpenWarehouse {
            warehouse_id: test_id(),
            name: name.to_string(),
            occurred_at: Utc::now(),
        }))
        .unwrap();
        wh
    }

    fn store(wh: &mut Warehouse, key: &str, volume: f64) -> DomainResult<Vec<WarehouseEvent>> {
        wh.execute(&WarehouseCommand::Store(StoreBoards {
            warehouse_id: test_id(),
            specification: spec(key),
            volume,
            occurred_at: Utc::now(),
        }))
    }

    fn take(wh: &mut Warehouse, key: &str, volume: f64) -> DomainResult<Vec<WarehouseEvent>> {
        wh.execute(&WarehouseCommand::Take(TakeBoards {
            warehouse_id: test_id(),
            specification: spec(key),
            volume,
            occurred_at: Utc::now(),
        }))
    }

    #[test]
    fn open_trims_name_and_rejects_blank() {
        let wh = opened("  Bin A ");
        assert_eq!(wh.name(), "Bin A");
        assert_eq!(wh.version(), 1);

        let blank = Warehouse::empty(test_id()).handle(&WarehouseCommand::Open(OpenWarehouse {
            warehouse_id: test_id(),
            name: "   ".into(),
            occurred_at: Utc::now(),
        }));
        assert!(matches!(blank, Err(DomainError::Validation(_))));
    }

    #[test]
    fn open_twice_conflicts() {
        let wh = opened("Bin A");
        let again = wh.handle(&WarehouseCommand::Open(OpenWarehouse {
            warehouse_id: test_id(),
            name: "Bin A".into(),
            occurred_at: Utc::now(),
        }));
        assert!(matches!(again, Err(DomainError::Conflict(_))));
    }

    #[test]
    fn store_into_unopened_warehouse_is_not_found() {
        let mut wh = Warehouse::empty(test_id());
        assert!(matches!(
            store(&mut wh, "1×1×0.01", 1.0),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn store_merges_same_specification() {
        let mut wh = opened("Bin A");
        store(&mut wh, "1.220×2.440×0.018", 0.161).unwrap();
        store(&mut wh, "1.830×0.915×0.009", 1.235).unwrap();
        store(&mut wh, "1.220×2.440×0.018", 0.5).unwrap();

        assert_eq!(wh.entries().len(), 2);
        assert_eq!(wh.volume_of(&spec("1.220×2.440×0.018")), Some(0.661));
        assert_eq!(wh.entries()[0].specification.as_str(), "1.220×2.440×0.018");
    }

    #[test]
    fn store_rejects_zero_volume() {
        let mut wh = opened("Bin A");
        assert!(matches!(
            store(&mut wh, "1×1×0.01", 0.0),
            Err(DomainError::Validation(_))
        ));
        assert!(wh.is_empty());
    }

    #[test]
    fn volumes_below_the_grid_are_rejected() {
        let mut wh = opened("Bin A");
        store(&mut wh, "1×1×0.01", 1.0).unwrap();
        let before = wh.clone();

        assert!(matches!(
            store(&mut wh, "1×1×0.01", 0.0004),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            take(&mut wh, "1×1×0.01", 0.0004),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(wh, before);
    }

    #[test]
    fn new_entries_are_rounded_like_merged_ones() {
        let mut wh = opened("Bin A");
        let events = store(&mut wh, "1×1×0.01", 0.12345).unwrap();
        assert!(matches!(&events[..], [WarehouseEvent::Stored(e)] if e.volume == 0.123));
        assert_eq!(wh.volume_of(&spec("1×1×0.01")), Some(0.123));

        take(&mut wh, "1×1×0.01", 0.0226).unwrap();
        assert_eq!(wh.volume_of(&spec("1×1×0.01")), Some(0.1));
    }

    #[test]
    fn take_reduces_then_removes_entry() {
        let mut wh = opened("Bin A");
        store(&mut wh, "1×1×0.01", 3.0).unwrap();

        take(&mut wh, "1×1×0.01", 1.25).unwrap();
        assert_eq!(wh.volume_of(&spec("1×1×0.01")), Some(1.75));

        take(&mut wh, "1×1×0.01", 1.75).unwrap();
        assert!(wh.is_empty());
    }

    #[test]
    fn take_more_than_available_leaves_stock_untouched() {
        let mut wh = opened("Bin A");
        store(&mut wh, "1.220×2.440×0.018", 0.161).unwrap();
        let before = wh.clone();

        let err = take(&mut wh, "1.220×2.440×0.018", 0.2).unwrap_err();
        assert_eq!(err, DomainError::insufficient(0.2, 0.161));
        assert_eq!(wh, before);
    }

    #[test]
    fn take_unknown_specification_is_not_found() {
        let mut wh = opened("Bin A");
        assert!(matches!(
            take(&mut wh, "1×1×0.01", 1.0),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn accumulated_float_error_does_not_block_full_withdrawal() {
        let mut wh = opened("Bin A");
        store(&mut wh, "1×1×0.01", 0.1).unwrap();
        store(&mut wh, "1×1×0.01", 0.2).unwrap();
        take(&mut wh, "1×1×0.01", 0.3).unwrap();
        assert!(wh.is_empty());
    }

    #[test]
    fn low_stock_respects_settings() {
        let mut wh = opened("Bin A");
        store(&mut wh, "1×1×0.01", 0.5).unwrap();
        store(&mut wh, "1×1×0.02", 5.0).unwrap();

        let on = WarningSettings::default();
        assert!(wh.has_low_stock(&on));
        assert_eq!(wh.low_stock(&on).len(), 1);

        let off = WarningSettings::new(2.0, false).unwrap();
        assert!(!wh.has_low_stock(&off));
    }

    #[test]
    fn sorted_stock_orders_by_thickness() {
        let mut wh = opened("Bin A");
        store(&mut wh, "1×1×0.025", 1.0).unwrap();
        store(&mut wh, "1×1×0.009", 1.0).unwrap();
        store(&mut wh, "1×1×0.018", 1.0).unwrap();
        let keys: Vec<String> = wh
            .sorted_stock()
            .into_iter()
            .map(|(s, _)| s.to_string())
            .collect();
        assert_eq!(keys, vec!["1.000×1.000×0.009", "1.000×1.000×0.018", "1.000×1.000×0.025"]);
    }

    proptest! {
        #[test]
        fn deposit_adds_exactly_without_duplicates(
            first in 1u32..100_000,
            second in 1u32..100_000,
        ) {
            let (a, b) = (f64::from(first) / 1000.0, f64::from(second) / 1000.0);
            let mut wh = opened("Bin A");
            store(&mut wh, "1×1×0.01", a).unwrap();
            store(&mut wh, "1×1×0.01", b).unwrap();

            prop_assert_eq!(wh.entries().len(), 1);
            let got = wh.volume_of(&spec("1×1×0.01")).unwrap();
            prop_assert!((got - (a + b)).abs() < 1e-9);
        }

        #[test]
        fn withdrawal_is_exact_or_rejected(
            held in 1u32..100_000,
            wanted in 1u32..100_000,
        ) {
            let (held, wanted) = (f64::from(held) / 1000.0, f64::from(wanted) / 1000.0);
            let mut wh = opened("Bin A");
            store(&mut wh, "1×1×0.01", held).unwrap();
            let before = wh.clone();

            match take(&mut wh, "1×1×0.01", wanted) {
                Ok(_) => {
                    prop_assert!(wanted <= held);
                    match wh.volume_of(&spec("1×1×0.01")) {
                        Some(left) => prop_assert!((left - (held - wanted)).abs() < 1e-9),
                        None => prop_assert!(held - wanted <= 1e-9),
                    }
                }
                Err(err) => {
                    prop_assert!(wanted > held);
                    let insufficient = matches!(err, DomainError::InsufficientStock { .. });
                    prop_assert!(insufficient);
                    prop_assert_eq!(wh, before);
                }
            }
        }
    }
}
