//! # Design Settings
//!
//! Every physical constant and code limit used by the design engine lives
//! here, so a different code edition or material supplier can be modeled by
//! passing a different `DesignSettings` rather than editing the algorithms.
//!
//! Settings serialize to JSON. Every field has a default, so a settings file
//! only needs the values it overrides:
//!
//! ```json
//! {
//!   "code_edition": "ASCE 7-22",
//!   "limits": { "allowable_stress_mpa": 10.0 }
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use isolator_core::settings::DesignSettings;
//!
//! let settings: DesignSettings =
//!     serde_json::from_str(r#"{ "limits": { "min_damping_pct": 10.0 } }"#).unwrap();
//! assert_eq!(settings.limits.min_damping_pct, 10.0);
//! assert_eq!(settings.limits.allowable_stress_mpa, 11.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::standard_sizes::StandardDiameters;

/// Injectable configuration for the whole pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Code edition label shown in reports (e.g., "ASCE 7-16")
    pub code_edition: String,

    /// Elastomer, lead and steel constants
    pub material: MaterialConstants,

    /// Code limits used for sizing and verification
    pub limits: DesignLimits,

    /// Damping coefficient selection
    pub seismic: SeismicFactors,

    /// Diameters available for auto-sizing
    pub standard_diameters_mm: StandardDiameters,

    /// Samples on the loading branch of the hysteresis curve
    pub samples_per_branch: usize,

    /// How limit exceedances on supplied geometry are handled
    pub warning_policy: WarningPolicy,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            code_edition: "ASCE 7-16".to_string(),
            material: MaterialConstants::default(),
            limits: DesignLimits::default(),
            seismic: SeismicFactors::default(),
            standard_diameters_mm: StandardDiameters::default(),
            samples_per_branch: 100,
            warning_policy: WarningPolicy::Advisory,
        }
    }
}

impl DesignSettings {
    /// Default settings with the strict warning policy
    pub fn strict() -> Self {
        DesignSettings {
            warning_policy: WarningPolicy::Strict,
            ..DesignSettings::default()
        }
    }

    /// Validate every constant before it reaches a formula.
    pub fn validate(&self) -> CalcResult<()> {
        let positives = [
            ("material.shear_modulus_mpa", self.material.shear_modulus_mpa),
            ("material.shape_factor", self.material.shape_factor),
            ("material.lead_yield_stress_mpa", self.material.lead_yield_stress_mpa),
            ("material.lead_core_area_ratio", self.material.lead_core_area_ratio),
            ("material.post_yield_stiffness_ratio", self.material.post_yield_stiffness_ratio),
            ("limits.allowable_stress_mpa", self.limits.allowable_stress_mpa),
            ("limits.max_shear_strain", self.limits.max_shear_strain),
            ("limits.max_height_to_diameter", self.limits.max_height_to_diameter),
            ("seismic.default_bd", self.seismic.default_bd),
            ("seismic.high_seismicity_bd", self.seismic.high_seismicity_bd),
        ];
        for (field, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"));
            }
        }

        let non_negatives = [
            ("material.steel_plate_thickness_mm", self.material.steel_plate_thickness_mm),
            ("material.typical_damping_pct", self.material.typical_damping_pct),
            ("limits.min_damping_pct", self.limits.min_damping_pct),
            ("seismic.high_seismicity_s1", self.seismic.high_seismicity_s1),
        ];
        for (field, value) in non_negatives {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must not be negative"));
            }
        }

        if self.material.lead_core_area_ratio >= 1.0 {
            return Err(CalcError::invalid_input(
                "material.lead_core_area_ratio",
                self.material.lead_core_area_ratio.to_string(),
                "Lead core must be a fraction of the gross area",
            ));
        }
        if self.material.post_yield_stiffness_ratio > 1.0 {
            return Err(CalcError::invalid_input(
                "material.post_yield_stiffness_ratio",
                self.material.post_yield_stiffness_ratio.to_string(),
                "Post-yield stiffness cannot exceed elastic stiffness",
            ));
        }
        if self.samples_per_branch < 2 {
            return Err(CalcError::invalid_input(
                "samples_per_branch",
                self.samples_per_branch.to_string(),
                "At least two samples are needed per branch",
            ));
        }

        self.standard_diameters_mm.validate()
    }
}

/// Material constants of the elastomer, lead core and reinforcing plates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConstants {
    /// Elastomer shear modulus G (MPa)
    pub shear_modulus_mpa: f64,
    /// Shape factor S = D / (4t)
    pub shape_factor: f64,
    /// Lead yield stress (MPa)
    pub lead_yield_stress_mpa: f64,
    /// Lead core area as a fraction of the gross area
    pub lead_core_area_ratio: f64,
    /// Thickness of each internal steel shim (mm)
    pub steel_plate_thickness_mm: f64,
    /// Effective damping assumed for lead-rubber bearings (%)
    pub typical_damping_pct: f64,
    /// Post-yield stiffness as a fraction of elastic stiffness
    pub post_yield_stiffness_ratio: f64,
}

impl Default for MaterialConstants {
    fn default() -> Self {
        MaterialConstants {
            shear_modulus_mpa: 0.8,
            shape_factor: 8.0,
            lead_yield_stress_mpa: 10.0,
            lead_core_area_ratio: 0.2,
            steel_plate_thickness_mm: 3.0,
            typical_damping_pct: 20.0,
            post_yield_stiffness_ratio: 0.1,
        }
    }
}

impl MaterialConstants {
    /// Compression modulus of a shim-reinforced layer, E_c ≈ 6·G·S² (MPa)
    pub fn compression_modulus_mpa(&self) -> f64 {
        6.0 * self.shear_modulus_mpa * self.shape_factor.powi(2)
    }
}

/// Code limits (ASCE 7-16 Chapter 17 simplified values by default).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignLimits {
    /// Admissible compressive stress under service load (MPa)
    pub allowable_stress_mpa: f64,
    /// Maximum shear strain per rubber layer (ratio)
    pub max_shear_strain: f64,
    /// Maximum total height / diameter ratio
    pub max_height_to_diameter: f64,
    /// Minimum effective damping (%)
    pub min_damping_pct: f64,
}

impl Default for DesignLimits {
    fn default() -> Self {
        DesignLimits {
            allowable_stress_mpa: 11.0,
            max_shear_strain: 0.5,
            max_height_to_diameter: 3.0,
            min_damping_pct: 15.0,
        }
    }
}

/// Damping coefficient B_D selection by seismicity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeismicFactors {
    /// S1 at or above which the site is treated as high seismicity
    pub high_seismicity_s1: f64,
    /// B_D for high-seismicity sites
    pub high_seismicity_bd: f64,
    /// B_D otherwise
    pub default_bd: f64,
}

impl Default for SeismicFactors {
    fn default() -> Self {
        SeismicFactors {
            high_seismicity_s1: 0.6,
            high_seismicity_bd: 1.2,
            default_bd: 1.0,
        }
    }
}

impl SeismicFactors {
    /// B_D for the given S1
    pub fn bd_for(&self, s1: f64) -> f64 {
        if s1 >= self.high_seismicity_s1 {
            self.high_seismicity_bd
        } else {
            self.default_bd
        }
    }
}

/// Handling of supplied geometry that exceeds a code limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WarningPolicy {
    /// Keep the supplied value and attach a warning to the result
    #[default]
    Advisory,
    /// Abort with `CalcError::LimitExceeded`
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DesignSettings::default();
        assert_eq!(settings.limits.allowable_stress_mpa, 11.0);
        assert_eq!(settings.material.shape_factor, 8.0);
        assert_eq!(settings.warning_policy, WarningPolicy::Advisory);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_compression_modulus() {
        // 6 * 0.8 * 8² = 307.2 MPa
        let e_c = MaterialConstants::default().compression_modulus_mpa();
        assert!((e_c - 307.2).abs() < 1e-9);
    }

    #[test]
    fn test_bd_selection() {
        let factors = SeismicFactors::default();
        assert_eq!(factors.bd_for(0.6), 1.2);
        assert_eq!(factors.bd_for(0.75), 1.2);
        assert_eq!(factors.bd_for(0.59), 1.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "code_edition": "ASCE 7-22", "material": { "shear_modulus_mpa": 0.4 } }"#;
        let settings: DesignSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.code_edition, "ASCE 7-22");
        assert_eq!(settings.material.shear_modulus_mpa, 0.4);
        assert_eq!(settings.material.shape_factor, 8.0);
        assert_eq!(settings.samples_per_branch, 100);
    }

    #[test]
    fn test_invalid_constant_rejected() {
        let mut settings = DesignSettings::default();
        settings.material.shape_factor = 0.0;
        let err = settings.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let mut settings = DesignSettings::default();
        settings.material.lead_core_area_ratio = 1.5;
        assert!(settings.validate().is_err());

        let mut settings = DesignSettings::default();
        settings.samples_per_branch = 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_strict_constructor() {
        assert_eq!(DesignSettings::strict().warning_policy, WarningPolicy::Strict);
    }

    #[test]
    fn test_policy_serialization() {
        let json = serde_json::to_string(&WarningPolicy::Strict).unwrap();
        assert_eq!(json, "\"Strict\"");
    }
}
