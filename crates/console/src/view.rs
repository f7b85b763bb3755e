//! Text views of the yard: warehouse tiles, detail pages, totals, journal.

use std::fmt::Write as _;

use boardstock_core::AggregateRoot;
use boardstock_events::{Event, EventEnvelope};
use boardstock_infra::Yard;
use boardstock_inventory::{Measurement, Specification, Warehouse, WarehouseEvent, WarningSettings};

use crate::chart::BarChart;

pub const LOW_STOCK_BADGE: &str = "⚠ low stock";

/// Compact tile: name (with badge when any entry is low) and sorted stock.
pub fn warehouse_tile(warehouse: &Warehouse, settings: &WarningSettings) -> String {
    let mut out = String::new();
    if warehouse.has_low_stock(settings) {
        let _ = writeln!(out, "┌ {} {LOW_STOCK_BADGE}", warehouse.name());
    } else {
        let _ = writeln!(out, "┌ {}", warehouse.name());
    }
    let stock = warehouse.sorted_stock();
    if stock.is_empty() {
        out.push_str("│ (empty)\n");
    }
    for (spec, volume) in &stock {
        let _ = writeln!(out, "│ {spec}: {volume:.3} 方{}", low_mark(settings, *volume));
    }
    out.push_str("└\n");
    out
}

/// Every warehouse tile in yard order.
pub fn yard_tiles(yard: &Yard) -> String {
    let settings = yard.settings();
    if yard.warehouses().is_empty() {
        return "No warehouses yet. Use `add <name>` to create one.\n".to_string();
    }
    yard.warehouses()
        .iter()
        .map(|w| warehouse_tile(w, &settings))
        .collect::<Vec<_>>()
        .join("")
}

/// Detail page: warning panel, sorted stock list and a per-warehouse chart.
pub fn warehouse_detail(warehouse: &Warehouse, settings: &WarningSettings) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {}: detailed stock ==", warehouse.name());

    if settings.enabled {
        let _ = writeln!(out, "Low-stock warning (below {} 方):", settings.threshold);
        let low = warehouse.low_stock(settings);
        if low.is_empty() {
            out.push_str("  no low-stock items\n");
        }
        for entry in low {
            let _ = writeln!(
                out,
                "  ⚠ {}: {:.3} 方 (below warning level)",
                entry.specification, entry.volume
            );
        }
    }

    let stock = warehouse.sorted_stock();
    out.push_str("Stock:\n");
    if stock.is_empty() {
        out.push_str("  (empty)\n");
    }
    for (spec, volume) in &stock {
        let _ = writeln!(
            out,
            "  spec: {spec}  volume: {volume:.3} 方{}",
            low_mark(settings, *volume)
        );
    }

    out.push('\n');
    out.push_str(&BarChart::from_stock("Stock by specification", &stock, settings).render());
    out
}

/// Cross-warehouse totals (already sorted by thickness) plus their chart.
pub fn totals_report(totals: &[(Specification, f64)], settings: &WarningSettings) -> String {
    let mut out = String::from("Totals (sorted by thickness):\n");
    if totals.is_empty() {
        out.push_str("  (no stock)\n");
    }
    for (spec, total) in totals {
        let note = if settings.is_low(*total) { " (low stock)" } else { "" };
        let _ = writeln!(out, "  {spec}: {total:.3} 方{note}");
    }
    out.push('\n');
    out.push_str(&BarChart::from_stock("Total stock by specification", totals, settings).render());
    out
}

/// The main screen: every tile followed by the totals report.
pub fn overview(yard: &Yard) -> String {
    let mut out = yard_tiles(yard);
    out.push('\n');
    out.push_str(&totals_report(&yard.totals(), &yard.settings()));
    out
}

pub fn measurement(m: &Measurement) -> String {
    format!("spec: {}\ntotal volume: {:.3} 方\n", m.specification, m.volume)
}

pub fn settings(settings: &WarningSettings) -> String {
    format!(
        "warning threshold: {} 方\nlow-stock warnings: {}\n",
        settings.threshold,
        if settings.enabled { "on" } else { "off" }
    )
}

/// Movement journal, oldest first; limited to one warehouse's stream when given.
pub fn history(yard: &Yard, warehouse: Option<&Warehouse>) -> String {
    let mut out = String::new();
    if let Some(w) = warehouse {
        let _ = writeln!(
            out,
            "{}: {} movements",
            w.name(),
            yard.journal().stream_version(*w.id())
        );
    }

    let envelopes = movements(yard, warehouse);
    if envelopes.is_empty() {
        out.push_str("No movements recorded.\n");
        return out;
    }

    for envelope in envelopes {
        let name = yard
            .warehouses()
            .iter()
            .find(|w| *w.id() == envelope.aggregate_id())
            .map(|w| w.name())
            .unwrap_or("?");
        let event = envelope.payload();
        let detail = match event {
            WarehouseEvent::Opened(_) => String::new(),
            WarehouseEvent::Stored(e) => format!(" {} +{:.3} 方", e.specification, e.volume),
            WarehouseEvent::Taken(e) => format!(
                " {} -{:.3} 方 (left {:.3} 方)",
                e.specification, e.volume, e.remaining
            ),
        };
        let _ = writeln!(
            out,
            "#{:<4} {} {} [{}]{}",
            envelope.position(),
            event.occurred_at().format("%H:%M:%S"),
            event.event_type(),
            name,
            detail
        );
    }
    out
}

/// The same movements as one JSON object per line.
pub fn history_json(yard: &Yard, warehouse: Option<&Warehouse>) -> serde_json::Result<String> {
    let mut out = String::new();
    for envelope in movements(yard, warehouse) {
        out.push_str(&serde_json::to_string(envelope)?);
        out.push('\n');
    }
    Ok(out)
}

fn movements<'a>(
    yard: &'a Yard,
    warehouse: Option<&Warehouse>,
) -> Vec<&'a EventEnvelope<WarehouseEvent>> {
    match warehouse {
        Some(w) => yard.journal().stream(*w.id()).collect(),
        None => yard.journal().iter().collect(),
    }
}

pub const HELP: &str = "\
Commands:
  list                                   show every warehouse tile
  show <warehouse>                       detailed stock of one warehouse
  add <name>                             add a new warehouse
  store <warehouse> <l> <w> <t> <stacks> <bundles> <sheets>
                                         deposit boards (dimensions in m)
  take <warehouse> <spec> <stacks> <bundles> <sheets>
                                         withdraw boards of an existing spec
  calc <l> <w> <t> <stacks> <bundles> <sheets>
                                         compute spec and volume only
  totals                                 totals across all warehouses
  settings [threshold <v>] [on|off]      show or change low-stock warnings
  history [--json] [warehouse]           movement journal, all or one warehouse
  help                                   this text
  quit                                   leave
Warehouse names may contain spaces; quote them when ambiguous (\"仓位 A\").
";

fn low_mark(settings: &WarningSettings, volume: f64) -> &'static str {
    if settings.is_low(volume) { " ⚠" } else { "" }
}
