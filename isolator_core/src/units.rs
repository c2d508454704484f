//! # Unit Types
//!
//! Type-safe wrappers for the SI units used in isolator design. They are
//! plain f64 newtypes that serialize as bare numbers.
//!
//! ## Units in Use
//!
//! - Length: millimeters (mm) for geometry, meters (m) for displacement spectra
//! - Mass-equivalent load: tonnes (t), converted to force with g = 9.81 m/s²
//! - Force: newtons (N), kilonewtons (kN)
//! - Stress: megapascals (MPa = N/mm²)
//! - Stiffness: kN/mm, kN/m
//!
//! Bearing stiffness coefficients `G·A/h` (MPa·mm²/mm) are taken as kN/mm,
//! the convention of the established isolator design sheets, and reported
//! in kN/m.
//!
//! ## Example
//!
//! ```rust
//! use isolator_core::units::{Kilonewtons, Tonnes, KnPerMm, KnPerM};
//!
//! let load: Kilonewtons = Tonnes(200.0).into();
//! assert!((load.0 - 1962.0).abs() < 1e-9);
//!
//! let k: KnPerM = KnPerMm(502.5).into();
//! assert_eq!(k.0, 502_500.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Standard gravity used for mass-to-force conversion (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.81;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Load / Force Units
// ============================================================================

/// Mass-equivalent load in metric tonnes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tonnes(pub f64);

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Tonnes> for Kilonewtons {
    fn from(t: Tonnes) -> Self {
        Kilonewtons(t.0 * STANDARD_GRAVITY)
    }
}

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

impl From<Kilonewtons> for Newtons {
    fn from(kn: Kilonewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

// ============================================================================
// Stress and Area
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

/// Area in square millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMm(pub f64);

impl SqMm {
    /// Area of a circle of the given diameter
    pub fn circle(diameter: Millimeters) -> Self {
        SqMm(std::f64::consts::PI * (diameter.0 / 2.0).powi(2))
    }

    /// Diameter of the circle having this area, `sqrt(4A/π)`
    pub fn equivalent_diameter(self) -> Millimeters {
        Millimeters((4.0 * self.0 / std::f64::consts::PI).sqrt())
    }
}

impl Mul<SqMm> for Megapascals {
    type Output = Newtons;
    fn mul(self, rhs: SqMm) -> Newtons {
        Newtons(self.0 * rhs.0)
    }
}

impl Div<SqMm> for Newtons {
    type Output = Megapascals;
    fn div(self, rhs: SqMm) -> Megapascals {
        Megapascals(self.0 / rhs.0)
    }
}

impl Div<Megapascals> for Newtons {
    type Output = SqMm;
    fn div(self, rhs: Megapascals) -> SqMm {
        SqMm(self.0 / rhs.0)
    }
}

// ============================================================================
// Stiffness Units
// ============================================================================

/// Stiffness in kilonewtons per meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnPerM(pub f64);

/// Stiffness in kilonewtons per millimeter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnPerMm(pub f64);

impl From<KnPerM> for KnPerMm {
    fn from(k: KnPerM) -> Self {
        KnPerMm(k.0 / 1000.0)
    }
}

impl From<KnPerMm> for KnPerM {
    fn from(k: KnPerMm) -> Self {
        KnPerM(k.0 * 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(Tonnes);
impl_arithmetic!(Newtons);
impl_arithmetic!(Kilonewtons);
impl_arithmetic!(Megapascals);
impl_arithmetic!(SqMm);
impl_arithmetic!(KnPerM);
impl_arithmetic!(KnPerMm);
