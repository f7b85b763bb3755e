//! Volume computation: dimensions × unit count, in 方.

use boardstock_core::{DomainError, DomainResult};

use crate::spec::{Dimensions, Specification};

/// Largest accepted value for any single count multiplier.
pub const MAX_COUNT: u32 = 10_000;

/// Tolerance used when comparing or zero-checking volumes.
pub const VOLUME_EPSILON: f64 = 1e-9;

/// Round a volume to three decimals.
pub fn round_volume(volume: f64) -> f64 {
    (volume * 1000.0).round() / 1000.0
}

/// Quantity expressed as stacks (栋), bundles (包) and sheets (张).
///
/// The unit count is the product of the three multipliers.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    pub stacks: u32,
    pub bundles: u32,
    pub sheets: u32,
}

impl Counts {
    pub fn new(stacks: u32, bundles: u32, sheets: u32) -> Self {
        Self {
            stacks,
            bundles,
            sheets,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.stacks == 0 && self.bundles == 0 && self.sheets == 0 {
            return Err(DomainError::validation("at least one count must be non-zero"));
        }
        for (label, value) in [
            ("stacks", self.stacks),
            ("bundles", self.bundles),
            ("sheets", self.sheets),
        ] {
            if value > MAX_COUNT {
                return Err(DomainError::validation(format!(
                    "{label} must be at most {MAX_COUNT} (got {value})"
                )));
            }
        }
        Ok(())
    }

    /// Total number of sheets.
    pub fn units(&self) -> u64 {
        u64::from(self.stacks) * u64::from(self.bundles) * u64::from(self.sheets)
    }
}

/// Result of measuring a quantity of boards.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub specification: Specification,
    /// Rounded to three decimals; never negative.
    pub volume: f64,
}

/// Compute the specification key and rounded volume for `counts` boards
/// of the given dimensions.
///
/// The volume is computed from the dimensions as written in the key
/// (three decimals), so boards stored by dimensions can be taken back by
/// key in the same counts.
///
/// A zero multiplier next to non-zero ones is accepted and yields a zero
/// volume; stock operations reject that amount themselves.
pub fn measure(dims: &Dimensions, counts: Counts) -> DomainResult<Measurement> {
    counts.validate()?;
    let specification = Specification::from_dimensions(dims);
    let volume = round_volume(specification.dimensions().unit_volume() * counts.units() as f64);
    Ok(Measurement {
        specification,
        volume,
    })
}
