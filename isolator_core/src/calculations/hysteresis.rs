//! # Hysteresis Model
//!
//! Bilinear force-displacement loop of a lead-rubber bearing, sampled for
//! plotting or for export to analysis software.
//!
//! ```text
//!  F
//!  |          ___---  k_p = 0.1·k_e
//!  |    ___---
//!  |   /  Fy
//!  |  /  k_e
//!  | /
//!  +---------------- d
//!     d_y         D
//! ```
//!
//! The loop is sampled as three consecutive branches:
//!
//! - Loading: 0 → +D (`n` samples)
//! - Unloading: +D → −D (`2n − 1` samples)
//! - Reloading: −D → +D (`2n − 1` samples)
//!
//! All abscissae sit on the same integer grid `D·k/(n − 1)`, so every point
//! of a branch has an exact mirror `(−d, −F)` on the opposite branch.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::calculations::design::DesignResult;
use crate::errors::{CalcError, CalcResult};
use crate::settings::DesignSettings;
use crate::units::{KnPerM, KnPerMm};

/// One sample of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub displacement_mm: f64,
    pub force_kn: f64,
}

impl CurvePoint {
    fn new(displacement_mm: f64, force_kn: f64) -> Self {
        CurvePoint {
            displacement_mm,
            force_kn,
        }
    }
}

/// Segment of the sampled loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Branch {
    Loading,
    Unloading,
    Reloading,
}

/// Sampled bilinear hysteresis loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HysteresisCurve {
    /// Loading, unloading and reloading samples, concatenated
    pub points: Vec<CurvePoint>,

    /// Samples on the loading branch
    pub samples_per_branch: usize,

    /// (d_y, Fy)
    pub yield_point: CurvePoint,

    /// k_e (kN/mm)
    pub elastic_stiffness_kn_mm: f64,

    /// k_p (kN/mm)
    pub post_yield_stiffness_kn_mm: f64,

    /// Stroke D (mm)
    pub max_displacement_mm: f64,

    /// Horizontal reference line for annotation (kN)
    pub max_load_kn: f64,
}

impl HysteresisCurve {
    /// Samples of one branch.
    pub fn branch(&self, branch: Branch) -> &[CurvePoint] {
        let n = self.samples_per_branch;
        let full = (2 * n).saturating_sub(1);
        let range = match branch {
            Branch::Loading => 0..n,
            Branch::Unloading => n..n + full,
            Branch::Reloading => n + full..n + 2 * full,
        };
        self.points.get(range).unwrap_or(&[])
    }

    /// Largest absolute force on the loop (kN)
    pub fn peak_force_kn(&self) -> f64 {
        self.points.iter().map(|p| p.force_kn.abs()).fold(0.0, f64::max)
    }

    /// True when the stroke goes past the yield displacement
    pub fn yields(&self) -> bool {
        self.max_displacement_mm > self.yield_point.displacement_mm
    }
}

/// Bilinear force laws for one bearing.
#[derive(Debug, Clone, Copy)]
struct Bilinear {
    k_e: f64,
    k_p: f64,
    fy: f64,
    d_y: f64,
}

impl Bilinear {
    /// Monotonic first loading from rest
    fn loading(&self, d: f64) -> f64 {
        if d <= self.d_y {
            self.k_e * d
        } else {
            self.fy + self.k_p * (d - self.d_y)
        }
    }

    /// Full-stroke branches, odd in d
    fn cyclic(&self, d: f64) -> f64 {
        if d >= self.d_y {
            self.fy + self.k_p * (d - self.d_y)
        } else if d <= -self.d_y {
            -self.fy + self.k_p * (d + self.d_y)
        } else {
            self.k_e * d
        }
    }
}

/// Generate the hysteresis loop of a sized isolator.
///
/// Uses the horizontal stiffness and yield force of `result`, the stroke
/// `result.total_displacement_mm`, and `settings.samples_per_branch` loading
/// samples.
///
/// # Errors
///
/// * `CalcError::InvalidGeometry` - non-positive stiffness or yield force,
///   or a non-finite stroke
/// * `CalcError::InvalidInput` - non-finite max load or invalid settings
///
/// # Example
///
/// ```rust
/// use isolator_core::calculations::design::{calculate, DesignInput, SeismicParameters};
/// use isolator_core::calculations::hysteresis::{generate, Branch};
/// use isolator_core::settings::DesignSettings;
///
/// let settings = DesignSettings::default();
/// let input = DesignInput::new(200.0, 150.0, SeismicParameters::default());
/// let result = calculate(&input, &settings).unwrap();
///
/// let curve = generate(&result, input.vertical_load_kn(), &settings).unwrap();
/// assert_eq!(curve.branch(Branch::Loading).len(), 100);
/// assert_eq!(curve.branch(Branch::Unloading).len(), 199);
/// ```
#[instrument(skip_all)]
pub fn generate(result: &DesignResult, max_load_kn: f64, settings: &DesignSettings) -> CalcResult<HysteresisCurve> {
    settings.validate()?;
    if !max_load_kn.is_finite() {
        return Err(CalcError::invalid_input(
            "max_load_kn",
            max_load_kn.to_string(),
            "Max load must be a number",
        ));
    }

    let k_e: KnPerMm = KnPerM(result.horizontal_stiffness_kn_m).into();
    if !(k_e.value().is_finite() && k_e.value() > 0.0) {
        return Err(CalcError::invalid_geometry(
            "horizontal_stiffness_kn_m",
            result.horizontal_stiffness_kn_m.to_string(),
            "Horizontal stiffness must be positive",
        ));
    }
    let fy = result.yield_force_kn;
    if !(fy.is_finite() && fy > 0.0) {
        return Err(CalcError::invalid_geometry(
            "yield_force_kn",
            fy.to_string(),
            "Yield force must be positive",
        ));
    }
    let stroke = result.total_displacement_mm;
    if !stroke.is_finite() {
        return Err(CalcError::invalid_geometry(
            "total_displacement_mm",
            stroke.to_string(),
            "Design displacement must be a number",
        ));
    }
    let stroke = stroke.abs();

    let law = Bilinear {
        k_e: k_e.value(),
        k_p: settings.material.post_yield_stiffness_ratio * k_e.value(),
        fy,
        d_y: fy / k_e.value(),
    };

    let n = settings.samples_per_branch;
    let steps = (n - 1) as f64;
    let last = 2 * (n - 1);
    let at = |k: f64| stroke * k / steps;

    let mut points = Vec::with_capacity(n + 2 * (last + 1));

    // 0 → +D
    points.extend((0..n).map(|i| {
        let d = at(i as f64);
        CurvePoint::new(d, law.loading(d))
    }));

    // +D → −D
    points.extend((0..=last).map(|j| {
        let d = at((n - 1) as f64 - j as f64);
        CurvePoint::new(d, law.cyclic(d))
    }));

    // −D → +D
    points.extend((0..=last).map(|j| {
        let d = at(j as f64 - (n - 1) as f64);
        CurvePoint::new(d, law.cyclic(d))
    }));

    debug!(
        k_e_kn_mm = law.k_e,
        yield_displacement_mm = law.d_y,
        stroke_mm = stroke,
        points = points.len(),
        "hysteresis loop generated"
    );

    Ok(HysteresisCurve {
        points,
        samples_per_branch: n,
        yield_point: CurvePoint::new(law.d_y, fy),
        elastic_stiffness_kn_mm: law.k_e,
        post_yield_stiffness_kn_mm: law.k_p,
        max_displacement_mm: stroke,
        max_load_kn,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::design::{calculate, DesignInput, SeismicParameters};

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn reference_result() -> DesignResult {
        let input = DesignInput::new(200.0, 150.0, SeismicParameters::default());
        calculate(&input, &DesignSettings::default()).unwrap()
    }

    /// k_e = 1 kN/mm, Fy = 50 kN, D = 200 mm
    fn yielding_result() -> DesignResult {
        let mut result = reference_result();
        result.horizontal_stiffness_kn_m = 1000.0;
        result.yield_force_kn = 50.0;
        result.total_displacement_mm = 200.0;
        result
    }

    fn settings_with_samples(n: usize) -> DesignSettings {
        DesignSettings {
            samples_per_branch: n,
            ..DesignSettings::default()
        }
    }

    #[test]
    fn test_branch_lengths() {
        let result = reference_result();
        let curve = generate(&result, 1962.0, &DesignSettings::default()).unwrap();
        assert_eq!(curve.points.len(), 100 + 199 + 199);
        assert_eq!(curve.branch(Branch::Loading).len(), 100);
        assert_eq!(curve.branch(Branch::Unloading).len(), 199);
        assert_eq!(curve.branch(Branch::Reloading).len(), 199);
    }

    #[test]
    fn test_branch_endpoints() {
        let result = reference_result();
        let curve = generate(&result, 1962.0, &DesignSettings::default()).unwrap();
        let d = result.total_displacement_mm;

        let loading = curve.branch(Branch::Loading);
        assert_eq!(loading[0].displacement_mm, 0.0);
        assert!(approx(loading[loading.len() - 1].displacement_mm, d, 1e-9));

        let unloading = curve.branch(Branch::Unloading);
        assert!(approx(unloading[0].displacement_mm, d, 1e-9));
        assert!(approx(unloading[unloading.len() - 1].displacement_mm, -d, 1e-9));

        let reloading = curve.branch(Branch::Reloading);
        assert!(approx(reloading[0].displacement_mm, -d, 1e-9));
        assert!(approx(reloading[reloading.len() - 1].displacement_mm, d, 1e-9));
    }

    #[test]
    fn test_reference_loop_yields() {
        // k_e = 502.65 kN/mm, d_y = 392.7 / 502.65 = 0.78125 mm < D = 20.76 mm
        let result = reference_result();
        let curve = generate(&result, 1962.0, &DesignSettings::default()).unwrap();
        assert!(approx(curve.elastic_stiffness_kn_mm, 502.6548, 1e-4));
        assert!(approx(curve.post_yield_stiffness_kn_mm, 50.26548, 1e-5));
        assert!(approx(curve.yield_point.displacement_mm, 0.78125, 1e-9));
        assert!(approx(curve.yield_point.force_kn, 392.699, 1e-3));
        assert!(approx(curve.max_displacement_mm, 20.762, 1e-3));
        assert!(curve.yields());

        // F(D) = 392.70 + 50.265 * (20.762 - 0.781) = 1397.06 kN
        let loading = curve.branch(Branch::Loading);
        let tip = loading[loading.len() - 1];
        assert!(approx(tip.force_kn, 1397.062, 1e-3));
        assert!(approx(curve.peak_force_kn(), tip.force_kn, 1e-9));

        // Post-yield samples sit off the elastic line
        let beyond: Vec<_> = loading.iter().filter(|p| p.displacement_mm > 1.0).collect();
        assert!(!beyond.is_empty());
        for p in beyond {
            assert!(p.force_kn < curve.elastic_stiffness_kn_mm * p.displacement_mm);
        }
    }

    #[test]
    fn test_symmetry() {
        let result = yielding_result();
        let curve = generate(&result, 1000.0, &settings_with_samples(11)).unwrap();
        assert!(curve.yields());

        let unloading = curve.branch(Branch::Unloading);
        let reloading = curve.branch(Branch::Reloading);
        assert_eq!(unloading.len(), reloading.len());
        for (u, r) in unloading.iter().zip(reloading) {
            assert!(approx(u.displacement_mm, -r.displacement_mm, 1e-9));
            assert!(approx(u.force_kn, -r.force_kn, 1e-9));
        }

        // Every loading sample (d, F) has a (-d, -F) on the full-stroke branches
        let loading = curve.branch(Branch::Loading);
        for p in loading {
            let mirrored = unloading.iter().chain(reloading).any(|q| {
                q.displacement_mm == -p.displacement_mm && approx(q.force_kn, -p.force_kn, 1e-9)
            });
            assert!(mirrored, "no mirror for {:?}", p);
        }
        assert!(loading.iter().any(|p| p.displacement_mm > curve.yield_point.displacement_mm));
    }

    #[test]
    fn test_post_yield_branch() {
        let result = yielding_result();
        let curve = generate(&result, 1000.0, &settings_with_samples(5)).unwrap();

        assert!(approx(curve.elastic_stiffness_kn_mm, 1.0, 1e-12));
        assert!(approx(curve.post_yield_stiffness_kn_mm, 0.1, 1e-12));
        assert!(approx(curve.yield_point.displacement_mm, 50.0, 1e-9));
        assert!(curve.yields());

        // d = 0, 50, 100, 150, 200
        let expected = [0.0, 50.0, 55.0, 60.0, 65.0];
        for (p, f) in curve.branch(Branch::Loading).iter().zip(expected) {
            assert!(approx(p.force_kn, f, 1e-9), "{:?} != {}", p, f);
        }

        let unloading = curve.branch(Branch::Unloading);
        let last = unloading[unloading.len() - 1];
        assert!(approx(last.force_kn, -65.0, 1e-9));
        assert!(approx(curve.peak_force_kn(), 65.0, 1e-9));
    }

    #[test]
    fn test_zero_stroke() {
        let mut result = reference_result();
        result.total_displacement_mm = 0.0;
        let curve = generate(&result, 10.0, &settings_with_samples(3)).unwrap();
        assert_eq!(curve.points.len(), 3 + 5 + 5);
        assert!(curve.points.iter().all(|p| p.displacement_mm == 0.0 && p.force_kn == 0.0));
    }

    #[test]
    fn test_invalid_stiffness() {
        let mut result = reference_result();
        result.horizontal_stiffness_kn_m = 0.0;
        let err = generate(&result, 100.0, &DesignSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
    }

    #[test]
    fn test_invalid_yield_force() {
        let mut result = reference_result();
        result.yield_force_kn = -1.0;
        let err = generate(&result, 100.0, &DesignSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
    }

    #[test]
    fn test_max_load_line() {
        let result = reference_result();
        let curve = generate(&result, 1962.0, &DesignSettings::default()).unwrap();
        assert_eq!(curve.max_load_kn, 1962.0);
        assert!(generate(&result, f64::NAN, &DesignSettings::default()).is_err());
    }

    #[test]
    fn test_curve_serialization() {
        let result = yielding_result();
        let curve = generate(&result, 500.0, &settings_with_samples(4)).unwrap();
        let json = serde_json::to_string(&curve).unwrap();
        assert!(json.contains("yield_point"));
        assert!(json.contains("max_load_kn"));
        let roundtrip: HysteresisCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.points.len(), curve.points.len());
        assert_eq!(roundtrip.branch(Branch::Reloading).len(), 7);
        assert!(approx(roundtrip.yield_point.force_kn, 50.0, 1e-9));
    }
}
