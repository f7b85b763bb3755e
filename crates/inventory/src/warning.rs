//! Low-stock warnings.
//!
//! Display-only: a low entry is flagged, never blocked.

use serde::{Deserialize, Serialize};

use boardstock_core::{DomainError, DomainResult};

/// Threshold used when nothing else is configured, in 方.
pub const DEFAULT_THRESHOLD: f64 = 2.0;

/// Largest accepted threshold, in 方.
pub const MAX_THRESHOLD: f64 = 100.0;

/// Warning configuration passed to whatever computes warning status.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningSettings {
    pub threshold: f64,
    pub enabled: bool,
}

impl Default for WarningSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            enabled: true,
        }
    }
}

impl WarningSettings {
    pub fn new(threshold: f64, enabled: bool) -> DomainResult<Self> {
        let settings = Self { threshold, enabled };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 || self.threshold > MAX_THRESHOLD {
            return Err(DomainError::validation(format!(
                "warning threshold must be within (0, {MAX_THRESHOLD}] 方 (got {})",
                self.threshold
            )));
        }
        Ok(())
    }

    /// `true` when warnings are on and `volume` is strictly below the threshold.
    pub fn is_low(&self, volume: f64) -> bool {
        self.enabled && volume < self.threshold
    }

    /// The low items of a (spec, volume) list, in input order.
    pub fn low_items<'a, K>(&self, items: &'a [(K, f64)]) -> Vec<&'a (K, f64)> {
        items.iter().filter(|(_, v)| self.is_low(*v)).collect()
    }
}
