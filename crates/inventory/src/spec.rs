//! Board specifications: the `length×width×thickness` key stock is grouped by.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use boardstock_core::{DomainError, DomainResult, ValueObject};

/// Separator between the three dimensions of a canonical key.
pub const SPEC_SEPARATOR: char = '×';

/// Smallest accepted dimension, in metres. Anything finer would vanish
/// from the three-decimal key.
pub const MIN_DIMENSION: f64 = 0.001;

/// Largest accepted dimension, in metres.
pub const MAX_DIMENSION: f64 = 100.0;

/// Validated board dimensions in metres.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Dimensions {
    length: f64,
    width: f64,
    thickness: f64,
}

impl Dimensions {
    /// Every dimension must be finite, strictly positive and within
    /// [`MIN_DIMENSION`]..=[`MAX_DIMENSION`].
    pub fn new(length: f64, width: f64, thickness: f64) -> DomainResult<Self> {
        for (label, value) in [("length", length), ("width", width), ("thickness", thickness)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DomainError::validation(format!(
                    "{label} must be greater than 0 (got {value})"
                )));
            }
            if value < MIN_DIMENSION {
                return Err(DomainError::validation(format!(
                    "{label} must be at least {MIN_DIMENSION} m (got {value})"
                )));
            }
            if value > MAX_DIMENSION {
                return Err(DomainError::validation(format!(
                    "{label} must be at most {MAX_DIMENSION} m (got {value})"
                )));
            }
        }
        Ok(Self {
            length,
            width,
            thickness,
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Volume of a single sheet.
    pub fn unit_volume(&self) -> f64 {
        self.length * self.width * self.thickness
    }
}

/// Canonical specification key, e.g. `1.220×2.440×0.018`.
///
/// Always three positive dimensions formatted to three decimals. Equality
/// and hashing go by the key alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Specification {
    key: String,
    dims: Dimensions,
}

impl ValueObject for Specification {}

impl PartialEq for Specification {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Specification {}

impl core::hash::Hash for Specification {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Specification {
    pub fn from_dimensions(dims: &Dimensions) -> Self {
        let key = format!(
            "{:.3}{sep}{:.3}{sep}{:.3}",
            dims.length,
            dims.width,
            dims.thickness,
            sep = SPEC_SEPARATOR
        );
        // Keep the rounded values so `dimensions()` agrees with the key.
        let dims = match parse_fields(&key) {
            Some([length, width, thickness]) => Dimensions {
                length,
                width,
                thickness,
            },
            None => *dims,
        };
        Self { key, dims }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Dimensions as written in the key (rounded to three decimals).
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn thickness(&self) -> f64 {
        self.dims.thickness
    }
}

impl fmt::Display for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl AsRef<str> for Specification {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl FromStr for Specification {
    type Err = DomainError;

    /// Accepts `×` as well as `x`, `X` and `*` between fields, and
    /// re-formats the result into the canonical key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                'x' | 'X' | '*' => SPEC_SEPARATOR,
                other => other,
            })
            .collect();
        let [l, w, t] = parse_fields(&normalized).ok_or_else(|| {
            DomainError::validation(format!(
                "specification must look like 1.220{SPEC_SEPARATOR}2.440{SPEC_SEPARATOR}0.018 (got {s:?})"
            ))
        })?;
        let dims = Dimensions::new(l, w, t)?;
        Ok(Self::from_dimensions(&dims))
    }
}

impl TryFrom<String> for Specification {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Specification> for String {
    fn from(value: Specification) -> Self {
        value.key
    }
}

/// Split a key into exactly three numeric fields.
pub(crate) fn parse_fields(key: &str) -> Option<[f64; 3]> {
    let mut parts = key.split(SPEC_SEPARATOR);
    let mut out = [0.0; 3];
    for slot in &mut out {
        *slot = parts.next()?.trim().parse::<f64>().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

/// Chart label for a key: three-field keys are re-formatted to three
/// decimals, anything else passes through untouched.
pub fn short_label(key: &str) -> String {
    match parse_fields(key) {
        Some([l, w, t]) => format!("{l:.3}{SPEC_SEPARATOR}{w:.3}{SPEC_SEPARATOR}{t:.3}"),
        None => key.to_string(),
    }
}
