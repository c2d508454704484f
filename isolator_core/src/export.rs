//! # Design Export
//!
//! The JSON exchange format for finished designs. Field names follow the
//! established Spanish schema so files stay readable by existing tools:
//!
//! ```json
//! {
//!     "carga_ton": 200.0,
//!     "diametro_aislador_mm": 0.0,
//!     "altura_caucho_mm": 0.0,
//!     "desplazamiento_max_mm": 150.0,
//!     "parametros_sismicos": { "S1": 0.6, "SDS": 1.0, "SD1": 0.8, "TL": 8.0 },
//!     "resultados_diseno": { "diametro_calculado_mm": 500.0, "...": "..." },
//!     "verificaciones": { "esfuerzo_compresion": "CUMPLE ✓", "...": "..." }
//! }
//! ```
//!
//! Auto-sized dimensions are written as `0.0`. Result values are rounded to
//! one decimal (period to two) here and nowhere else; the engine keeps full
//! precision.

use serde::{Deserialize, Serialize};

use crate::calculations::compliance::{ComplianceCheck, ComplianceReport};
use crate::calculations::design::{DesignInput, DesignResult, SeismicParameters, Sizing};
use crate::calculations::IsolatorAnalysis;

/// Verdict for a passing check
pub const PASS_LABEL: &str = "CUMPLE ✓";
/// Verdict for a failing check
pub const FAIL_LABEL: &str = "NO CUMPLE ✗";
/// Aggregate verdict when every check passes
pub const ALL_PASS_LABEL: &str = "CUMPLE TODOS LOS REQUISITOS ✓";
/// Aggregate verdict when any check fails
pub const SOME_FAIL_LABEL: &str = "NO CUMPLE ALGUNOS REQUISITOS ✗";

/// Exported design file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignExport {
    #[serde(rename = "carga_ton")]
    pub load_t: f64,

    /// Supplied diameter, 0.0 when auto-sized
    #[serde(rename = "diametro_aislador_mm")]
    pub diameter_mm: f64,

    /// Supplied rubber height, 0.0 when auto-sized
    #[serde(rename = "altura_caucho_mm")]
    pub rubber_height_mm: f64,

    #[serde(rename = "desplazamiento_max_mm")]
    pub max_displacement_mm: f64,

    #[serde(rename = "parametros_sismicos")]
    pub seismic: ExportSeismic,

    #[serde(rename = "resultados_diseno")]
    pub results: ExportResults,

    #[serde(rename = "verificaciones")]
    pub checks: ExportChecks,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportSeismic {
    #[serde(rename = "S1")]
    pub s1: f64,
    #[serde(rename = "SDS")]
    pub sds: f64,
    #[serde(rename = "SD1")]
    pub sd1: f64,
    #[serde(rename = "TL")]
    pub tl: f64,
}

/// Rounded design values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResults {
    #[serde(rename = "diametro_calculado_mm")]
    pub diameter_mm: f64,
    #[serde(rename = "altura_total_mm")]
    pub total_height_mm: f64,
    #[serde(rename = "altura_caucho_calculada_mm")]
    pub rubber_height_mm: f64,
    #[serde(rename = "num_capas_caucho")]
    pub layer_count: u32,
    #[serde(rename = "espesor_capa_mm")]
    pub layer_thickness_mm: f64,
    #[serde(rename = "fuerza_fluencia_kN")]
    pub yield_force_kn: f64,
    #[serde(rename = "rigidez_horizontal_kN_m")]
    pub horizontal_stiffness_kn_m: f64,
    #[serde(rename = "rigidez_vertical_kN_m")]
    pub vertical_stiffness_kn_m: f64,
    #[serde(rename = "diametro_nucleo_mm")]
    pub lead_core_diameter_mm: f64,
    #[serde(rename = "coef_amortiguamiento_porc")]
    pub damping_ratio_pct: f64,
    #[serde(rename = "periodo_aislado_s")]
    pub isolated_period_s: f64,
    #[serde(rename = "desplazamiento_total_mm")]
    pub total_displacement_mm: f64,
}

/// Verdict strings for each check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportChecks {
    #[serde(rename = "esfuerzo_compresion")]
    pub compressive_stress: String,
    #[serde(rename = "deformacion_cortante")]
    pub shear_strain: String,
    #[serde(rename = "estabilidad_global")]
    pub global_stability: String,
    #[serde(rename = "estabilidad_volteo")]
    pub overturning: String,
    #[serde(rename = "amortiguamiento_efectivo")]
    pub effective_damping: String,
    #[serde(rename = "estado_general")]
    pub overall: String,
}

impl DesignExport {
    /// Build the export record from a design and its verification.
    pub fn new(input: &DesignInput, result: &DesignResult, report: &ComplianceReport) -> Self {
        DesignExport {
            load_t: input.vertical_load_t,
            diameter_mm: input.diameter.to_sentinel(),
            rubber_height_mm: input.rubber_height.to_sentinel(),
            max_displacement_mm: input.max_displacement_mm,
            seismic: ExportSeismic {
                s1: input.seismic.s1,
                sds: input.seismic.sds,
                sd1: input.seismic.sd1,
                tl: input.seismic.tl,
            },
            results: ExportResults {
                diameter_mm: round_to(result.diameter_mm, 1),
                total_height_mm: round_to(result.total_height_mm, 1),
                rubber_height_mm: round_to(result.rubber_height_mm, 1),
                layer_count: result.layer_count,
                layer_thickness_mm: round_to(result.layer_thickness_mm, 1),
                yield_force_kn: round_to(result.yield_force_kn, 1),
                horizontal_stiffness_kn_m: round_to(result.horizontal_stiffness_kn_m, 1),
                vertical_stiffness_kn_m: round_to(result.vertical_stiffness_kn_m, 1),
                lead_core_diameter_mm: round_to(result.lead_core_diameter_mm, 1),
                damping_ratio_pct: round_to(result.damping_ratio_pct, 1),
                isolated_period_s: round_to(result.isolated_period_s, 2),
                total_displacement_mm: round_to(result.total_displacement_mm, 1),
            },
            checks: ExportChecks {
                compressive_stress: verdict(&report.compressive_stress).to_string(),
                shear_strain: verdict(&report.shear_strain).to_string(),
                global_stability: verdict(&report.global_stability).to_string(),
                overturning: verdict(&report.overturning).to_string(),
                effective_damping: verdict(&report.effective_damping).to_string(),
                overall: if report.all_pass { ALL_PASS_LABEL } else { SOME_FAIL_LABEL }.to_string(),
            },
        }
    }

    /// Rebuild the input that produced this export.
    ///
    /// `0.0` sizes come back as [`Sizing::Auto`]. The label is not part of the
    /// schema and is left empty.
    pub fn to_input(&self) -> DesignInput {
        DesignInput {
            label: String::new(),
            vertical_load_t: self.load_t,
            diameter: Sizing::from_sentinel(self.diameter_mm),
            rubber_height: Sizing::from_sentinel(self.rubber_height_mm),
            max_displacement_mm: self.max_displacement_mm,
            seismic: SeismicParameters::new(self.seismic.s1, self.seismic.sds, self.seismic.sd1, self.seismic.tl),
        }
    }

    /// True when the exported verdict is an overall pass
    pub fn all_pass(&self) -> bool {
        self.checks.overall == ALL_PASS_LABEL
    }
}

impl From<&IsolatorAnalysis> for DesignExport {
    fn from(analysis: &IsolatorAnalysis) -> Self {
        DesignExport::new(&analysis.input, &analysis.design, &analysis.compliance)
    }
}

fn verdict(check: &ComplianceCheck) -> &'static str {
    if check.passes {
        PASS_LABEL
    } else {
        FAIL_LABEL
    }
}

/// Round half away from zero to `decimals` places.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
