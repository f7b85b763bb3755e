//! The yard: every warehouse, the warning settings and the movement journal.
//!
//! All stock operations go through here:
//!
//! ```text
//! name lookup → build command → Warehouse::handle → apply → journal append
//! ```
//!
//! A rejected command never reaches `apply`, so the warehouse and the
//! journal are untouched on every error path.

use chrono::Utc;
use tracing::{debug, info};

use boardstock_core::{Aggregate, AggregateRoot, DomainError, WarehouseId};
use boardstock_events::Journal;
use boardstock_inventory::{
    Counts, Dimensions, Measurement, OpenWarehouse, Specification, StoreBoards, TakeBoards,
    Warehouse, WarehouseCommand, WarehouseEvent, WarningSettings, measure, sort_by_thickness,
    totals,
};

use crate::error::{YardError, YardResult};
use crate::seed::SeedWarehouse;

const AGGREGATE_TYPE: &str = "warehouse";

/// In-memory record store for all warehouses.
#[derive(Debug, Clone, Default)]
pub struct Yard {
    warehouses: Vec<Warehouse>,
    journal: Journal<WarehouseEvent>,
    settings: WarningSettings,
}

impl Yard {
    pub fn new(settings: WarningSettings) -> Self {
        Self {
            warehouses: Vec::new(),
            journal: Journal::new(),
            settings,
        }
    }

    /// Build a yard pre-filled with the given stock.
    pub fn seeded(settings: WarningSettings, seed: &[SeedWarehouse]) -> YardResult<Self> {
        let mut yard = Self::new(settings);
        for (name, stock) in seed {
            yard.add_warehouse(name)?;
            for (key, volume) in stock.iter() {
                let spec: Specification = key.parse()?;
                yard.store_volume(name, spec, *volume)?;
            }
        }
        Ok(yard)
    }

    pub fn settings(&self) -> WarningSettings {
        self.settings
    }

    /// Replace the warning settings; invalid settings are rejected and the
    /// old ones kept.
    pub fn update_settings(&mut self, settings: WarningSettings) -> YardResult<()> {
        settings.validate()?;
        info!(
            threshold = settings.threshold,
            enabled = settings.enabled,
            "warning settings updated"
        );
        self.settings = settings;
        Ok(())
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn warehouse(&self, name: &str) -> YardResult<&Warehouse> {
        self.position(name).map(|idx| &self.warehouses[idx])
    }

    pub fn journal(&self) -> &Journal<WarehouseEvent> {
        &self.journal
    }

    /// Open a new, empty warehouse. Names are trimmed and must be unique.
    pub fn add_warehouse(&mut self, name: &str) -> YardResult<WarehouseId> {
        let trimmed = name.trim();
        if self.position(trimmed).is_ok() {
            info!(warehouse = trimmed, "duplicate warehouse name rejected");
            return Err(DomainError::conflict(format!("warehouse {trimmed:?} already exists")).into());
        }

        let id = WarehouseId::new();
        let mut warehouse = Warehouse::empty(id);
        let command = WarehouseCommand::Open(OpenWarehouse {
            warehouse_id: id,
            name: trimmed.to_string(),
            occurred_at: Utc::now(),
        });
        let events = warehouse.execute(&command).inspect_err(|e| {
            info!(error = %e, "add warehouse rejected");
        })?;
        self.journal.append(id, AGGREGATE_TYPE, events);
        self.warehouses.push(warehouse);

        info!(warehouse = trimmed, %id, "warehouse added");
        Ok(id)
    }

    /// Deposit `counts` boards of `dims` into a warehouse.
    pub fn store(
        &mut self,
        warehouse: &str,
        dims: &Dimensions,
        counts: Counts,
    ) -> YardResult<Measurement> {
        let measurement = measure(dims, counts)?;
        self.store_volume(
            warehouse,
            measurement.specification.clone(),
            measurement.volume,
        )?;
        Ok(measurement)
    }

    /// Deposit a raw volume of one specification.
    pub fn store_volume(
        &mut self,
        warehouse: &str,
        specification: Specification,
        volume: f64,
    ) -> YardResult<()> {
        let idx = self.position(warehouse)?;
        let warehouse_id = *self.warehouses[idx].id();
        let command = WarehouseCommand::Store(StoreBoards {
            warehouse_id,
            specification,
            volume,
            occurred_at: Utc::now(),
        });
        self.dispatch(idx, command)
    }

    /// Withdraw `counts` boards of an existing specification; the volume is
    /// computed from the dimensions in the specification key.
    pub fn take(
        &mut self,
        warehouse: &str,
        specification: &Specification,
        counts: Counts,
    ) -> YardResult<Measurement> {
        let measurement = measure(&specification.dimensions(), counts)?;
        self.take_volume(warehouse, specification.clone(), measurement.volume)?;
        Ok(measurement)
    }

    /// Withdraw a raw volume of one specification.
    pub fn take_volume(
        &mut self,
        warehouse: &str,
        specification: Specification,
        volume: f64,
    ) -> YardResult<()> {
        let idx = self.position(warehouse)?;
        let warehouse_id = *self.warehouses[idx].id();
        let command = WarehouseCommand::Take(TakeBoards {
            warehouse_id,
            specification,
            volume,
            occurred_at: Utc::now(),
        });
        self.dispatch(idx, command)
    }

    /// Per-specification totals across every warehouse, sorted by thickness.
    pub fn totals(&self) -> Vec<(Specification, f64)> {
        let mut totals = totals(&self.warehouses);
        sort_by_thickness(&mut totals);
        debug!(specifications = totals.len(), "totals recomputed");
        totals
    }

    fn position(&self, name: &str) -> YardResult<usize> {
        let name = name.trim();
        self.warehouses
            .iter()
            .position(|w| w.name() == name)
            .ok_or_else(|| YardError::UnknownWarehouse(name.to_string()))
    }

    fn dispatch(&mut self, idx: usize, command: WarehouseCommand) -> YardResult<()> {
        let warehouse = &mut self.warehouses[idx];
        let events = warehouse.execute(&command).inspect_err(|e| {
            info!(warehouse = warehouse.name(), error = %e, "stock command rejected");
        })?;

        for event in &events {
            match event {
                WarehouseEvent::Stored(e) => info!(
                    warehouse = warehouse.name(),
                    specification = %e.specification,
                    volume = e.volume,
                    "boards stored"
                ),
                WarehouseEvent::Taken(e) => info!(
                    warehouse = warehouse.name(),
                    specification = %e.specification,
                    volume = e.volume,
                    remaining = e.remaining,
                    "boards taken"
                ),
                WarehouseEvent::Opened(_) => {}
            }
        }

        let id = *warehouse.id();
        self.journal.append(id, AGGREGATE_TYPE, events);
        Ok(())
    }
}
