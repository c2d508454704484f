//! Standard Isolator Diameters
//!
//! Commercial lead-rubber bearings are manufactured in a fixed series of
//! diameters. Auto-sized designs round the required diameter **up** to the
//! next entry so the admissible compressive stress is never exceeded.
//!
//! When the required diameter is larger than every entry, the largest entry
//! is used and the caller is told the table was exhausted.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Ascending table of standard isolator diameters (mm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StandardDiameters(Vec<f64>);

/// Outcome of rounding a required diameter to the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundedDiameter {
    /// Selected standard diameter (mm)
    pub diameter_mm: f64,
    /// True when the requirement exceeded the largest entry
    pub table_exhausted: bool,
}

impl StandardDiameters {
    /// Build a table from explicit sizes. Call [`validate`](Self::validate) before use.
    pub fn new(sizes_mm: Vec<f64>) -> Self {
        StandardDiameters(sizes_mm)
    }

    /// The 100 mm to 1200 mm series in 50 mm steps
    pub fn commercial_series() -> Self {
        StandardDiameters((2..=24).map(|i| f64::from(i) * 50.0).collect())
    }

    /// All sizes in ascending order
    pub fn sizes(&self) -> &[f64] {
        &self.0
    }

    /// Largest available size, if any
    pub fn largest(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// Check the table is non-empty, positive and strictly ascending.
    pub fn validate(&self) -> CalcResult<()> {
        if self.0.is_empty() {
            return Err(CalcError::invalid_input(
                "standard_diameters_mm",
                "[]",
                "Standard diameter table must not be empty",
            ));
        }
        if let Some(bad) = self.0.iter().find(|d| !d.is_finite() || **d <= 0.0) {
            return Err(CalcError::invalid_input(
                "standard_diameters_mm",
                bad.to_string(),
                "Standard diameters must be positive",
            ));
        }
        if self.0.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CalcError::invalid_input(
                "standard_diameters_mm",
                format!("{:?}", self.0),
                "Standard diameters must be strictly ascending",
            ));
        }
        Ok(())
    }

    /// Round a required diameter up to the first entry that is at least as large.
    ///
    /// Returns `None` only for an empty table.
    ///
    /// # Example
    ///
    /// ```rust
    /// use isolator_core::standard_sizes::StandardDiameters;
    ///
    /// let table = StandardDiameters::commercial_series();
    /// let rounded = table.round_up(476.6).unwrap();
    /// assert_eq!(rounded.diameter_mm, 500.0);
    /// assert!(!rounded.table_exhausted);
    /// ```
    pub fn round_up(&self, required_mm: f64) -> Option<RoundedDiameter> {
        match self.0.iter().find(|&&size| required_mm <= size) {
            Some(&size) => Some(RoundedDiameter {
                diameter_mm: size,
                table_exhausted: false,
            }),
            None => self.largest().map(|size| RoundedDiameter {
                diameter_mm: size,
                table_exhausted: true,
            }),
        }
    }
}

impl Default for StandardDiameters {
    fn default() -> Self {
        StandardDiameters::commercial_series()
    }
}
