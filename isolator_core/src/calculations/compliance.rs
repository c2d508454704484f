//! # Compliance Verification
//!
//! Checks a sized isolator against five simplified ASCE 7 Chapter 17 limits.
//! Every quantity is re-derived from the typed [`DesignResult`] and the
//! original [`DesignInput`], so the report stays correct if result fields
//! were recomputed or edited independently.
//!
//! | Check | Actual | Limit |
//! |---|---|---|
//! | Compressive stress | W / A | ≤ 11 MPa |
//! | Shear strain per layer | D / (n·t) | ≤ 0.50 |
//! | Global stability | H / D | ≤ 3.0 |
//! | Overturning | n/a for circular bearings | always passes |
//! | Effective damping | β | ≥ 15 % |
//!
//! A failing check is a normal report value, not an error.
//!
//! ## Example
//!
//! ```rust
//! use isolator_core::calculations::compliance::verify;
//! use isolator_core::calculations::design::{calculate, DesignInput, SeismicParameters};
//! use isolator_core::settings::DesignSettings;
//!
//! let settings = DesignSettings::default();
//! let input = DesignInput::new(200.0, 150.0, SeismicParameters::default());
//! let result = calculate(&input, &settings).unwrap();
//!
//! let report = verify(&result, &input, &settings);
//! assert!(report.passes());
//! assert!(report.effective_damping.passes);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::design::{DesignInput, DesignResult};
use crate::settings::DesignSettings;
use crate::units::{Kilonewtons, Millimeters, Newtons, SqMm, Tonnes};

/// The five verifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckKind {
    CompressiveStress,
    ShearStrain,
    GlobalStability,
    Overturning,
    EffectiveDamping,
}

impl CheckKind {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::CompressiveStress => "Compressive stress",
            CheckKind::ShearStrain => "Shear strain per layer",
            CheckKind::GlobalStability => "Global stability (H/D)",
            CheckKind::Overturning => "Overturning",
            CheckKind::EffectiveDamping => "Effective damping",
        }
    }

    /// Unit of the actual/limit values
    pub fn unit(&self) -> &'static str {
        match self {
            CheckKind::CompressiveStress => "MPa",
            CheckKind::ShearStrain | CheckKind::GlobalStability | CheckKind::Overturning => "",
            CheckKind::EffectiveDamping => "%",
        }
    }

    /// Code section cited for this check
    pub fn section(&self) -> Option<&'static str> {
        match self {
            CheckKind::CompressiveStress => Some("17.2.3.1"),
            CheckKind::ShearStrain => Some("17.2.3.2"),
            CheckKind::GlobalStability => Some("17.2.3.3"),
            CheckKind::Overturning => None,
            CheckKind::EffectiveDamping => Some("17.5.3.3"),
        }
    }

    /// Remedial advice when the check fails
    pub fn recommendation(&self) -> &'static str {
        match self {
            CheckKind::CompressiveStress => "Increase the isolator diameter to reduce the compressive stress",
            CheckKind::ShearStrain => "Increase the number of rubber layers or the layer thickness",
            CheckKind::GlobalStability => "Reduce the total height or increase the isolator diameter",
            CheckKind::Overturning => "Review the bearing aspect ratio for overturning",
            CheckKind::EffectiveDamping => "Increase the lead core diameter to raise the effective damping",
        }
    }
}

/// How the actual value is compared with the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    /// actual ≤ limit
    AtMost,
    /// actual ≥ limit
    AtLeast,
    /// Not evaluated numerically
    NotApplicable,
}

impl Comparator {
    /// Symbol for reports
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::AtMost => "<=",
            Comparator::AtLeast => ">=",
            Comparator::NotApplicable => "n/a",
        }
    }
}

/// One verification with its numbers and verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    /// Which check this is
    pub kind: CheckKind,
    /// Value computed for the design (`None` when not applicable)
    pub actual: Option<f64>,
    /// Code limit (`None` when not applicable)
    pub limit: Option<f64>,
    /// Comparison applied
    pub comparator: Comparator,
    /// Code citation (e.g., "ASCE 7-16 Section 17.2.3.1")
    pub reference: String,
    /// Verdict
    pub passes: bool,
}

impl ComplianceCheck {
    fn at_most(kind: CheckKind, actual: f64, limit: f64, code: &str) -> Self {
        ComplianceCheck {
            kind,
            actual: Some(actual),
            limit: Some(limit),
            comparator: Comparator::AtMost,
            reference: citation(kind, code),
            passes: actual <= limit,
        }
    }

    fn at_least(kind: CheckKind, actual: f64, limit: f64, code: &str) -> Self {
        ComplianceCheck {
            kind,
            actual: Some(actual),
            limit: Some(limit),
            comparator: Comparator::AtLeast,
            reference: citation(kind, code),
            passes: actual >= limit,
        }
    }

    fn not_applicable(kind: CheckKind, code: &str) -> Self {
        ComplianceCheck {
            kind,
            actual: None,
            limit: None,
            comparator: Comparator::NotApplicable,
            reference: citation(kind, code),
            passes: true,
        }
    }

    /// Demand/capacity ratio; above 1.0 means failure
    pub fn utilization(&self) -> Option<f64> {
        match (self.comparator, self.actual, self.limit) {
            (Comparator::AtMost, Some(actual), Some(limit)) => Some(actual / limit),
            (Comparator::AtLeast, Some(actual), Some(limit)) => Some(limit / actual),
            _ => None,
        }
    }

    /// "PASS" or "FAIL"
    pub fn verdict(&self) -> &'static str {
        if self.passes {
            "PASS"
        } else {
            "FAIL"
        }
    }
}

fn citation(kind: CheckKind, code: &str) -> String {
    match kind.section() {
        Some(section) => format!("{} Section {}", code, section),
        None => "Circular section - not governing".to_string(),
    }
}

/// Result of verifying one design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Code edition the limits come from
    pub code_edition: String,

    pub compressive_stress: ComplianceCheck,
    pub shear_strain: ComplianceCheck,
    pub global_stability: ComplianceCheck,
    pub overturning: ComplianceCheck,
    pub effective_damping: ComplianceCheck,

    /// Gross area used for the stress check (mm²)
    pub area_mm2: f64,

    /// Aggregate verdict over all five checks
    pub all_pass: bool,
}

impl ComplianceReport {
    /// True if every check passes
    pub fn passes(&self) -> bool {
        self.all_pass
    }

    /// All five checks in reporting order
    pub fn checks(&self) -> [&ComplianceCheck; 5] {
        [
            &self.compressive_stress,
            &self.shear_strain,
            &self.global_stability,
            &self.overturning,
            &self.effective_damping,
        ]
    }

    /// Checks that fail
    pub fn failures(&self) -> Vec<&ComplianceCheck> {
        self.checks().into_iter().filter(|c| !c.passes).collect()
    }

    /// Check with the highest utilization
    pub fn governing(&self) -> Option<&ComplianceCheck> {
        self.checks()
            .into_iter()
            .filter_map(|c| c.utilization().map(|u| (c, u)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| c)
    }

    /// Remedial advice for each failed check, or a confirmation line.
    pub fn recommendations(&self) -> Vec<String> {
        if self.all_pass {
            return vec![format!("The design satisfies all {} requirements", self.code_edition)];
        }
        self.failures()
            .into_iter()
            .map(|c| c.kind.recommendation().to_string())
            .collect()
    }
}

/// Verify a design against the code limits in `settings`.
///
/// Pure: identical arguments always produce identical reports.
pub fn verify(result: &DesignResult, input: &DesignInput, settings: &DesignSettings) -> ComplianceReport {
    let limits = &settings.limits;
    let code = settings.code_edition.as_str();

    let load: Newtons = Kilonewtons::from(Tonnes(input.vertical_load_t)).into();
    let area = SqMm::circle(Millimeters(result.diameter_mm));
    let stress = load / area;

    let rubber = f64::from(result.layer_count) * result.layer_thickness_mm;
    let strain = input.max_displacement_mm / rubber;

    let slenderness = result.total_height_mm / result.diameter_mm;

    let compressive_stress =
        ComplianceCheck::at_most(CheckKind::CompressiveStress, stress.value(), limits.allowable_stress_mpa, code);
    let shear_strain = ComplianceCheck::at_most(CheckKind::ShearStrain, strain, limits.max_shear_strain, code);
    let global_stability =
        ComplianceCheck::at_most(CheckKind::GlobalStability, slenderness, limits.max_height_to_diameter, code);
    let overturning = ComplianceCheck::not_applicable(CheckKind::Overturning, code);
    let effective_damping = ComplianceCheck::at_least(
        CheckKind::EffectiveDamping,
        result.damping_ratio_pct,
        limits.min_damping_pct,
        code,
    );

    let all_pass = compressive_stress.passes
        && shear_strain.passes
        && global_stability.passes
        && overturning.passes
        && effective_damping.passes;

    debug!(stress_mpa = stress.value(), strain, slenderness, all_pass, "design verified");

    ComplianceReport {
        code_edition: settings.code_edition.clone(),
        compressive_stress,
        shear_strain,
        global_stability,
        overturning,
        effective_damping,
        area_mm2: area.value(),
        all_pass,
    }
}
