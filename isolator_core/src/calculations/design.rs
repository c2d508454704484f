//! # Isolator Sizing
//!
//! Derives the geometry and mechanical properties of a lead-rubber bearing
//! from the vertical load, the target displacement and the site seismic
//! coefficients, following a simplified ASCE 7-16 Chapter 17 procedure.
//!
//! ## Procedure
//!
//! 1. Load in tonnes → kN (× 9.81)
//! 2. Diameter from the admissible compressive stress, rounded up to a
//!    standard size (or the supplied diameter, checked against the limit)
//! 3. Layer thickness t = D / (4·S)
//! 4. Layer count from the per-layer shear strain limit (or the supplied
//!    rubber height, snapped to a whole number of layers)
//! 5. Total height = rubber + (n + 1) steel shims
//! 6. Lead core = fixed fraction of the gross area, Fy = σy·A_core
//! 7. K_h = G·A/T_r, K_v = E_c·A/T_r with E_c = 6·G·S², taken as kN/mm and reported in kN/m
//! 8. T = 2π·sqrt(W / (g·K_h))
//! 9. D_TD = (g/4π²)·S_D1·T / B_D
//! 10. Effective damping = fixed typical value
//!
//! ## Example
//!
//! ```rust
//! use isolator_core::calculations::design::{calculate, DesignInput, SeismicParameters};
//! use isolator_core::settings::DesignSettings;
//!
//! let input = DesignInput::new(200.0, 150.0, SeismicParameters::new(0.6, 1.0, 0.8, 8.0));
//! let result = calculate(&input, &DesignSettings::default()).unwrap();
//!
//! assert_eq!(result.diameter_mm, 500.0);
//! assert_eq!(result.layer_count, 20);
//! assert!(result.warnings.is_empty());
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::errors::{CalcError, CalcResult};
use crate::settings::{DesignSettings, WarningPolicy};
use crate::units::{
    Kilonewtons, KnPerM, KnPerMm, Megapascals, Meters, Millimeters, Newtons, SqMm, Tonnes,
    STANDARD_GRAVITY,
};

/// Whether a dimension is derived by the calculator or fixed by the user.
///
/// ## JSON
///
/// `"Auto"` or `{ "Supplied": 600.0 }`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Sizing {
    /// Let the calculator size it
    #[default]
    Auto,
    /// Use this value (mm)
    Supplied(f64),
}

impl Sizing {
    /// Map a zero-means-auto form value onto a sizing choice.
    ///
    /// Any value ≤ 0 becomes `Auto`.
    pub fn from_sentinel(value_mm: f64) -> Self {
        if value_mm > 0.0 {
            Sizing::Supplied(value_mm)
        } else {
            Sizing::Auto
        }
    }

    /// Inverse of [`from_sentinel`](Self::from_sentinel): `Auto` becomes 0.0
    pub fn to_sentinel(self) -> f64 {
        match self {
            Sizing::Auto => 0.0,
            Sizing::Supplied(v) => v,
        }
    }

    /// True when the user fixed the value
    pub fn is_supplied(self) -> bool {
        matches!(self, Sizing::Supplied(_))
    }
}

/// Site seismic coefficients (dimensionless, TL in seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeismicParameters {
    /// Mapped 1-second spectral acceleration S1
    pub s1: f64,
    /// Design short-period spectral acceleration S_DS
    pub sds: f64,
    /// Design 1-second spectral acceleration S_D1
    pub sd1: f64,
    /// Long-period transition period T_L
    pub tl: f64,
}

impl SeismicParameters {
    /// Create from the four coefficients
    pub fn new(s1: f64, sds: f64, sd1: f64, tl: f64) -> Self {
        SeismicParameters { s1, sds, sd1, tl }
    }
}

impl Default for SeismicParameters {
    fn default() -> Self {
        SeismicParameters::new(0.6, 1.0, 0.8, 8.0)
    }
}

/// Input parameters for an isolator design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "LRB-1",
///   "vertical_load_t": 200.0,
///   "diameter": "Auto",
///   "rubber_height": { "Supplied": 300.0 },
///   "max_displacement_mm": 150.0,
///   "seismic": { "s1": 0.6, "sds": 1.0, "sd1": 0.8, "tl": 8.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignInput {
    /// User label (e.g., "LRB-1", "Isolator at grid B-3")
    #[serde(default)]
    pub label: String,

    /// Vertical service load in tonnes
    pub vertical_load_t: f64,

    /// Isolator diameter choice
    #[serde(default)]
    pub diameter: Sizing,

    /// Total rubber height choice
    #[serde(default)]
    pub rubber_height: Sizing,

    /// Target maximum displacement in mm
    pub max_displacement_mm: f64,

    /// Site seismic coefficients
    pub seismic: SeismicParameters,
}

impl DesignInput {
    /// Create an input with both diameter and rubber height auto-sized.
    pub fn new(vertical_load_t: f64, max_displacement_mm: f64, seismic: SeismicParameters) -> Self {
        DesignInput {
            label: String::new(),
            vertical_load_t,
            diameter: Sizing::Auto,
            rubber_height: Sizing::Auto,
            max_displacement_mm,
            seismic,
        }
    }

    /// Builder: set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Builder: fix the diameter (mm)
    pub fn with_diameter(mut self, diameter_mm: f64) -> Self {
        self.diameter = Sizing::Supplied(diameter_mm);
        self
    }

    /// Builder: fix the rubber height (mm)
    pub fn with_rubber_height(mut self, rubber_height_mm: f64) -> Self {
        self.rubber_height = Sizing::Supplied(rubber_height_mm);
        self
    }

    /// Vertical load as a force
    pub fn vertical_load_kn(&self) -> f64 {
        Kilonewtons::from(Tonnes(self.vertical_load_t)).value()
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.vertical_load_t.is_finite() || self.vertical_load_t <= 0.0 {
            return Err(CalcError::invalid_input(
                "vertical_load_t",
                self.vertical_load_t.to_string(),
                "Vertical load must be positive",
            ));
        }
        if !self.max_displacement_mm.is_finite() || self.max_displacement_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "max_displacement_mm",
                self.max_displacement_mm.to_string(),
                "Target displacement must be positive",
            ));
        }
        let coefficients = [
            ("seismic.s1", self.seismic.s1),
            ("seismic.sds", self.seismic.sds),
            ("seismic.sd1", self.seismic.sd1),
            ("seismic.tl", self.seismic.tl),
        ];
        for (field, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Seismic coefficients must be non-negative",
                ));
            }
        }
        for (field, choice) in [("diameter", self.diameter), ("rubber_height", self.rubber_height)] {
            if let Sizing::Supplied(v) = choice {
                if !v.is_finite() {
                    return Err(CalcError::invalid_input(field, v.to_string(), "Supplied value must be a number"));
                }
            }
        }
        Ok(())
    }
}

/// Which limit an advisory warning concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitKind {
    /// Supplied diameter overstresses the elastomer
    CompressiveStress,
    /// Supplied rubber height overstrains each layer
    ShearStrain,
    /// Required diameter is larger than every standard size
    StandardSizeExhausted,
}

/// Non-fatal notice that a design value exceeds a code limit.
///
/// The calculator keeps the value that caused it; the caller decides how to
/// surface it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitWarning {
    /// Limit concerned
    pub kind: LimitKind,
    /// Value computed for the design
    pub actual: f64,
    /// Code limit
    pub limit: f64,
    /// Human-readable description
    pub message: String,
}

impl LimitWarning {
    fn compressive_stress(stress_mpa: f64, limit_mpa: f64) -> Self {
        LimitWarning {
            kind: LimitKind::CompressiveStress,
            actual: stress_mpa,
            limit: limit_mpa,
            message: format!(
                "Supplied diameter gives a compressive stress of {:.2} MPa, above the {:.2} MPa limit",
                stress_mpa, limit_mpa
            ),
        }
    }

    fn shear_strain(strain: f64, limit: f64) -> Self {
        LimitWarning {
            kind: LimitKind::ShearStrain,
            actual: strain,
            limit,
            message: format!(
                "Supplied rubber height gives a shear strain of {:.1}%, above the {:.0}% limit",
                strain * 100.0,
                limit * 100.0
            ),
        }
    }

    fn size_exhausted(stress_mpa: f64, limit_mpa: f64, largest_mm: f64) -> Self {
        LimitWarning {
            kind: LimitKind::StandardSizeExhausted,
            actual: stress_mpa,
            limit: limit_mpa,
            message: format!(
                "Load requires more than the largest standard diameter ({:.0} mm); stress is {:.2} MPa",
                largest_mm, stress_mpa
            ),
        }
    }

    fn check_name(&self) -> &'static str {
        match self.kind {
            LimitKind::CompressiveStress | LimitKind::StandardSizeExhausted => "compressive stress (MPa)",
            LimitKind::ShearStrain => "shear strain per layer",
        }
    }
}

/// Derived isolator design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "diameter_mm": 500.0,
///   "total_height_mm": 375.5,
///   "rubber_height_mm": 312.5,
///   "layer_count": 20,
///   "layer_thickness_mm": 15.625,
///   "lead_core_diameter_mm": 223.6,
///   "yield_force_kn": 392.7,
///   "horizontal_stiffness_kn_m": 502654.8,
///   "vertical_stiffness_kn_m": 193019452.6,
///   "damping_ratio_pct": 20.0,
///   "isolated_period_s": 0.125,
///   "total_displacement_mm": 20.76,
///   "vertical_load_kn": 1962.0,
///   "gross_area_mm2": 196349.5,
///   "bd_factor": 1.2,
///   "warnings": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    // === Geometry ===
    /// Isolator diameter (mm)
    pub diameter_mm: f64,

    /// Rubber plus steel shims (mm)
    pub total_height_mm: f64,

    /// Total rubber height T_r = n·t (mm)
    pub rubber_height_mm: f64,

    /// Number of rubber layers
    pub layer_count: u32,

    /// Thickness of one rubber layer (mm)
    pub layer_thickness_mm: f64,

    /// Lead core diameter (mm)
    pub lead_core_diameter_mm: f64,

    // === Mechanical properties ===
    /// Lead core yield force (kN)
    pub yield_force_kn: f64,

    /// Horizontal stiffness K_h (kN/m)
    pub horizontal_stiffness_kn_m: f64,

    /// Vertical stiffness K_v (kN/m)
    pub vertical_stiffness_kn_m: f64,

    /// Effective damping ratio (%)
    pub damping_ratio_pct: f64,

    // === Seismic response ===
    /// Isolated period T_D (s)
    pub isolated_period_s: f64,

    /// Total design displacement D_TD (mm)
    pub total_displacement_mm: f64,

    // === Context ===
    /// Vertical load used (kN)
    pub vertical_load_kn: f64,

    /// Gross bonded area (mm²)
    pub gross_area_mm2: f64,

    /// Damping coefficient B_D applied to D_TD
    pub bd_factor: f64,

    /// Advisory limit exceedances raised while sizing
    pub warnings: Vec<LimitWarning>,
}

impl DesignResult {
    /// True if any advisory warning was raised
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Yield displacement Fy / K_h (mm)
    pub fn yield_displacement_mm(&self) -> f64 {
        // kN / (kN/m) = m
        self.yield_force_kn / self.horizontal_stiffness_kn_m * 1000.0
    }
}

/// Size an isolator.
///
/// Pure and deterministic. Limit exceedances on supplied geometry are
/// attached to [`DesignResult::warnings`] under the advisory policy and
/// returned as [`CalcError::LimitExceeded`] under the strict policy.
///
/// # Errors
///
/// * `CalcError::InvalidInput` - non-positive load or displacement, negative
///   seismic coefficient, or invalid settings
/// * `CalcError::InvalidGeometry` - a supplied dimension yields a zero layer
///   thickness or rubber height
/// * `CalcError::LimitExceeded` - strict policy only
#[instrument(skip_all, fields(label = %input.label))]
pub fn calculate(input: &DesignInput, settings: &DesignSettings) -> CalcResult<DesignResult> {
    input.validate()?;
    settings.validate()?;

    let material = &settings.material;
    let limits = &settings.limits;
    let mut warnings = Vec::new();

    let load: Kilonewtons = Tonnes(input.vertical_load_t).into();
    let load_n: Newtons = load.into();
    let allowable = Megapascals(limits.allowable_stress_mpa);

    // Diameter
    let (diameter, table_exhausted) = match input.diameter {
        Sizing::Auto => {
            let required = (load_n / allowable).equivalent_diameter();
            let rounded = settings
                .standard_diameters_mm
                .round_up(required.value())
                .ok_or_else(|| {
                    CalcError::invalid_input("standard_diameters_mm", "[]", "No standard diameters available")
                })?;
            debug!(required_mm = required.value(), selected_mm = rounded.diameter_mm, "auto-sized diameter");
            (Millimeters(rounded.diameter_mm), rounded.table_exhausted)
        }
        Sizing::Supplied(d) => (Millimeters(d), false),
    };

    let layer_thickness = diameter / (4.0 * material.shape_factor);
    if !(layer_thickness.value().is_finite() && layer_thickness.value() > 0.0) {
        return Err(CalcError::invalid_geometry(
            "layer_thickness_mm",
            layer_thickness.value().to_string(),
            format!("Diameter of {} mm gives no usable rubber layer", diameter.value()),
        ));
    }

    let area = SqMm::circle(diameter);
    let stress = load_n / area;
    if input.diameter.is_supplied() && stress > allowable {
        raise(
            LimitWarning::compressive_stress(stress.value(), allowable.value()),
            settings,
            &mut warnings,
        )?;
    } else if table_exhausted {
        raise(
            LimitWarning::size_exhausted(stress.value(), allowable.value(), diameter.value()),
            settings,
            &mut warnings,
        )?;
    }

    // Rubber height, always a whole number of layers
    let raw_layers = match input.rubber_height {
        Sizing::Auto => (input.max_displacement_mm / (limits.max_shear_strain * layer_thickness.value())).ceil(),
        Sizing::Supplied(h) => (h / layer_thickness.value()).ceil(),
    };
    if !(raw_layers >= 1.0) || raw_layers > f64::from(u32::MAX) {
        return Err(CalcError::invalid_geometry(
            "rubber_height_mm",
            input.rubber_height.to_sentinel().to_string(),
            format!("Rubber height gives {} layers of {:.3} mm", raw_layers, layer_thickness.value()),
        ));
    }
    let layer_count = raw_layers as u32;
    let rubber_height = Millimeters(f64::from(layer_count) * layer_thickness.value());

    if input.rubber_height.is_supplied() {
        let strain = input.max_displacement_mm / rubber_height.value();
        if strain > limits.max_shear_strain {
            raise(
                LimitWarning::shear_strain(strain, limits.max_shear_strain),
                settings,
                &mut warnings,
            )?;
        }
    }

    let total_height =
        rubber_height + Millimeters((f64::from(layer_count) + 1.0) * material.steel_plate_thickness_mm);

    // Lead core
    let core_area = area * material.lead_core_area_ratio;
    let core_diameter = core_area.equivalent_diameter();
    let yield_force: Kilonewtons = (Megapascals(material.lead_yield_stress_mpa) * core_area).into();

    // Stiffness, G·A/T_r read as kN/mm
    let horizontal: KnPerM =
        KnPerMm(material.shear_modulus_mpa * area.value() / rubber_height.value()).into();
    let vertical: KnPerM =
        KnPerMm(material.compression_modulus_mpa() * area.value() / rubber_height.value()).into();

    // Period and displacement
    let period_s = 2.0 * PI * (load.value() / (STANDARD_GRAVITY * horizontal.value())).sqrt();
    let bd = settings.seismic.bd_for(input.seismic.s1);
    let total_displacement: Millimeters =
        Meters(STANDARD_GRAVITY / (4.0 * PI.powi(2)) * input.seismic.sd1 * period_s / bd).into();

    debug!(
        diameter_mm = diameter.value(),
        layer_count,
        rubber_height_mm = rubber_height.value(),
        period_s,
        total_displacement_mm = total_displacement.value(),
        "isolator sized"
    );

    Ok(DesignResult {
        diameter_mm: diameter.value(),
        total_height_mm: total_height.value(),
        rubber_height_mm: rubber_height.value(),
        layer_count,
        layer_thickness_mm: layer_thickness.value(),
        lead_core_diameter_mm: core_diameter.value(),
        yield_force_kn: yield_force.value(),
        horizontal_stiffness_kn_m: horizontal.value(),
        vertical_stiffness_kn_m: vertical.value(),
        damping_ratio_pct: material.typical_damping_pct,
        isolated_period_s: period_s,
        total_displacement_mm: total_displacement.value(),
        vertical_load_kn: load.value(),
        gross_area_mm2: area.value(),
        bd_factor: bd,
        warnings,
    })
}

/// Record a warning, or fail under the strict policy.
fn raise(warning: LimitWarning, settings: &DesignSettings, warnings: &mut Vec<LimitWarning>) -> CalcResult<()> {
    match settings.warning_policy {
        WarningPolicy::Strict => Err(CalcError::limit_exceeded(
            warning.check_name(),
            warning.actual,
            warning.limit,
        )),
        WarningPolicy::Advisory => {
            warn!(kind = ?warning.kind, "{}", warning.message);
            warnings.push(warning);
            Ok(())
        }
    }
}
