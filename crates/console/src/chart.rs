//! Horizontal text bar charts.

use std::fmt::Write as _;

use boardstock_inventory::{WarningSettings, short_label};

/// Width of the longest bar, in cells.
pub const DEFAULT_BAR_WIDTH: usize = 40;

const FULL: char = '█';
const LOW: char = '▒';
const THRESHOLD: char = '┆';
const UNKNOWN_LABEL: &str = "unknown spec";

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub low: bool,
}

/// A titled bar chart, one row per (spec, volume) pair.
#[derive(Debug, Clone)]
pub struct BarChart {
    title: String,
    bars: Vec<Bar>,
    threshold: Option<f64>,
    width: usize,
}

impl BarChart {
    /// Build a chart from (spec key, volume) pairs in display order.
    ///
    /// Bars under the threshold are drawn with a separate glyph, and the
    /// threshold itself is marked on every row when warnings are enabled.
    pub fn from_stock<K: AsRef<str>>(
        title: impl Into<String>,
        stock: &[(K, f64)],
        settings: &WarningSettings,
    ) -> Self {
        let bars = stock
            .iter()
            .map(|(key, value)| {
                let label = short_label(key.as_ref());
                Bar {
                    label: if label.is_empty() {
                        UNKNOWN_LABEL.to_string()
                    } else {
                        label
                    },
                    value: *value,
                    low: settings.is_low(*value),
                }
            })
            .collect();
        Self {
            title: title.into(),
            bars,
            threshold: settings.enabled.then_some(settings.threshold),
            width: DEFAULT_BAR_WIDTH,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    fn scale(&self) -> f64 {
        let max = self.bars.iter().map(|b| b.value).fold(0.0, f64::max);
        match self.threshold {
            Some(t) => max.max(t),
            None => max,
        }
    }

    fn cells(&self, value: f64, scale: f64) -> usize {
        if scale <= 0.0 || value <= 0.0 {
            return 0;
        }
        let cells = (value / scale * self.width as f64).round() as usize;
        // Any stock at all gets at least one cell.
        cells.clamp(1, self.width)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);

        if self.bars.is_empty() {
            out.push_str("  (no stock)\n");
            return out;
        }

        let scale = self.scale();
        let label_width = self
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0);
        let marker = self
            .threshold
            .map(|t| self.cells(t, scale).saturating_sub(1));

        for bar in &self.bars {
            let filled = self.cells(bar.value, scale);
            let glyph = if bar.low { LOW } else { FULL };
            let mut row: Vec<char> = (0..self.width)
                .map(|i| if i < filled { glyph } else { ' ' })
                .collect();
            if let Some(col) = marker {
                if row[col] == ' ' {
                    row[col] = THRESHOLD;
                }
            }
            let row: String = row.into_iter().collect();
            let pad = label_width - bar.label.chars().count();
            let _ = writeln!(
                out,
                "  {}{} │{} {:.3}{}",
                bar.label,
                " ".repeat(pad),
                row.trim_end(),
                bar.value,
                if bar.low { " ⚠" } else { "" }
            );
        }

        if let Some(t) = self.threshold {
            let _ = writeln!(out, "  {THRESHOLD} warning line ({t} 方)");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(threshold: f64, enabled: bool) -> WarningSettings {
        WarningSettings::new(threshold, enabled).unwrap()
    }

    #[test]
    fn empty_chart_says_so() {
        let chart = BarChart::from_stock::<&str>("Totals", &[], &settings(2.0, true));
        assert_eq!(chart.render(), "Totals\n  (no stock)\n");
    }

    #[test]
    fn largest_bar_fills_the_width() {
        let stock = [("1×1×0.01", 4.0), ("1×1×0.02", 2.0)];
        let chart = BarChart::from_stock("Stock", &stock, &settings(1.0, false)).with_width(10);
        let rendered = chart.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "  1.000×1.000×0.010 │██████████ 4.000");
        assert_eq!(lines[2], "  1.000×1.000×0.020 │█████ 2.000");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn low_bars_and_threshold_marker() {
        let stock = [("1×1×0.01", 1.0), ("1×1×0.02", 4.0)];
        let chart = BarChart::from_stock("Stock", &stock, &settings(2.0, true)).with_width(8);
        let rendered = chart.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "  1.000×1.000×0.010 │▒▒ ┆ 1.000 ⚠");
        assert_eq!(lines[2], "  1.000×1.000×0.020 │████████ 4.000");
        assert_eq!(lines[3], "  ┆ warning line (2 方)");
    }

    #[test]
    fn threshold_extends_scale_when_stock_is_small() {
        let stock = [("1×1×0.01", 1.0)];
        let chart = BarChart::from_stock("Stock", &stock, &settings(4.0, true)).with_width(8);
        assert!(chart.render().contains("│▒▒     ┆ 1.000 ⚠"));
    }

    #[test]
    fn unparseable_and_empty_labels() {
        let stock = [("", 1.0), ("odd", 1.0)];
        let chart = BarChart::from_stock("Stock", &stock, &settings(2.0, false));
        let labels: Vec<&str> = chart.bars().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["unknown spec", "odd"]);
    }
}
