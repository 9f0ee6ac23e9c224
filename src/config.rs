//! Engine configuration and its validated numeric form.
//!
//! ```toml
//! spacing = 10000.0
//! tolerance = 0.01
//! percent_diff_floor = 1e-6
//! compare_target = true
//! ```

use std::path::Path;

use num_traits::{Float, NumCast};
use serde::Deserialize;

use crate::{Error, Result};

/// Default nominal grid spacing, in meters
pub const DEFAULT_SPACING: f64 = 10_000.0;

/// Default fractional tolerance on cell edges and diagonals
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Default smallest observed value included in fit-quality comparisons
pub const DEFAULT_PERCENT_DIFF_FLOOR: f64 = 1e-6;

/// Estimator settings, typically read from a TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Nominal side length of a grid cell
    pub spacing: f64,
    /// Fractional tolerance applied to cell edges and diagonals
    pub tolerance: f64,
    /// Observed values below this floor are skipped when comparing against the target
    pub percent_diff_floor: f64,
    /// Fetch the target's own samples and report fit quality when available
    pub compare_target: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
            tolerance: DEFAULT_TOLERANCE,
            percent_diff_floor: DEFAULT_PERCENT_DIFF_FLOOR,
            compare_target: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    /// # Errors
    /// * If spacing is not a positive finite number
    /// * If tolerance is outside `[0, 1)`
    /// * If the comparison floor is negative or not finite
    pub fn validate(&self) -> Result<()> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(Error::Config(format!(
                "spacing must be positive and finite, got {}",
                self.spacing
            )));
        }
        if !(0.0..1.0).contains(&self.tolerance) {
            return Err(Error::Config(format!(
                "tolerance must be in [0, 1), got {}",
                self.tolerance
            )));
        }
        if !(self.percent_diff_floor.is_finite() && self.percent_diff_floor >= 0.0) {
            return Err(Error::Config(format!(
                "percent_diff_floor must be non-negative and finite, got {}",
                self.percent_diff_floor
            )));
        }
        Ok(())
    }

    /// Numeric cell description in the engine's float type.
    pub fn cell_spec<T: Float>(&self) -> Result<CellSpec<T>> {
        self.validate()?;
        CellSpec::new(cast(self.spacing)?, cast(self.tolerance)?)
    }
}

/// Nominal square cell against which a 4-site support is validated
/// and in which local coordinates are normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSpec<T> {
    spacing: T,
    tolerance: T,
}

impl<T: Float> CellSpec<T> {
    /// # Errors
    /// * If spacing is not a positive finite number
    /// * If tolerance is outside `[0, 1)`
    pub fn new(spacing: T, tolerance: T) -> Result<Self> {
        if !(spacing.is_finite() && spacing > T::zero()) {
            return Err(Error::Config("spacing must be positive and finite".into()));
        }
        if !(tolerance >= T::zero() && tolerance < T::one()) {
            return Err(Error::Config("tolerance must be in [0, 1)".into()));
        }
        Ok(Self { spacing, tolerance })
    }

    pub fn spacing(&self) -> T {
        self.spacing
    }

    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    /// Accepted `(low, high)` range for a cell edge
    pub fn edge_bounds(&self) -> (T, T) {
        (
            self.spacing * (T::one() - self.tolerance),
            self.spacing * (T::one() + self.tolerance),
        )
    }

    /// Accepted `(low, high)` range for a cell diagonal
    pub fn diagonal_bounds(&self) -> (T, T) {
        let sqrt2 = (T::one() + T::one()).sqrt();
        let (lo, hi) = self.edge_bounds();
        (lo * sqrt2, hi * sqrt2)
    }
}

impl<T: Float> Default for CellSpec<T> {
    fn default() -> Self {
        // Both defaults are representable in any float type
        Self {
            spacing: T::from(DEFAULT_SPACING).unwrap_or_else(T::max_value),
            tolerance: T::from(DEFAULT_TOLERANCE).unwrap_or_else(T::zero),
        }
    }
}

fn cast<T: Float>(v: f64) -> Result<T> {
    <T as NumCast>::from(v).ok_or_else(|| Error::Config(format!("unrepresentable value {v}")))
}
