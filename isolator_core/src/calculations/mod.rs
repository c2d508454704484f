//! # Isolator Calculations
//!
//! Each stage follows the same pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` / report - Outputs (JSON-serializable)
//! - a pure function from one to the other
//!
//! ## Stages
//!
//! - [`design`] - Size the bearing from load, displacement and seismicity
//! - [`compliance`] - Verify the sized bearing against code limits
//! - [`hysteresis`] - Sample its bilinear force-displacement loop
//!
//! [`analyze`] runs all three in order. Stages never feed back: a failed
//! compliance check does not trigger re-sizing.

pub mod compliance;
pub mod design;
pub mod hysteresis;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::errors::CalcResult;
use crate::settings::DesignSettings;

// Re-export commonly used types
pub use compliance::{verify, CheckKind, ComplianceCheck, ComplianceReport};
pub use design::{calculate, DesignInput, DesignResult, LimitKind, LimitWarning, SeismicParameters, Sizing};
pub use hysteresis::{generate, Branch, CurvePoint, HysteresisCurve};

/// Everything produced for one isolator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolatorAnalysis {
    /// Input the analysis was run on
    pub input: DesignInput,
    /// Sized bearing
    pub design: DesignResult,
    /// Code verification of `design`
    pub compliance: ComplianceReport,
    /// Hysteresis loop with the vertical load as reference line
    pub curve: HysteresisCurve,
}

impl IsolatorAnalysis {
    /// True when the design raised no warnings and passes every check
    pub fn is_clean(&self) -> bool {
        !self.design.has_warnings() && self.compliance.passes()
    }
}

/// Size, verify and model one isolator.
///
/// Aborts on the first fatal error; compliance failures are part of the
/// returned report.
///
/// # Example
///
/// ```rust
/// use isolator_core::calculations::{analyze, DesignInput, SeismicParameters};
/// use isolator_core::settings::DesignSettings;
///
/// let input = DesignInput::new(200.0, 150.0, SeismicParameters::default());
/// let analysis = analyze(&input, &DesignSettings::default()).unwrap();
///
/// assert_eq!(analysis.design.diameter_mm, 500.0);
/// assert!(analysis.compliance.passes());
/// assert_eq!(analysis.curve.max_load_kn, analysis.design.vertical_load_kn);
/// ```
#[instrument(skip_all, fields(label = %input.label))]
pub fn analyze(input: &DesignInput, settings: &DesignSettings) -> CalcResult<IsolatorAnalysis> {
    let design = calculate(input, settings)?;
    let compliance = verify(&design, input, settings);
    let curve = generate(&design, design.vertical_load_kn, settings)?;

    info!(
        diameter_mm = design.diameter_mm,
        layers = design.layer_count,
        warnings = design.warnings.len(),
        compliant = compliance.passes(),
        "analysis complete"
    );

    Ok(IsolatorAnalysis {
        input: input.clone(),
        design,
        compliance,
        curve,
    })
}
