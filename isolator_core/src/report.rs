//! # Text Reports
//!
//! Plain-text summaries for the engineer of record:
//!
//! - [`verification_report`] - the five code checks with their numbers,
//!   geometric properties and remedial recommendations
//! - [`modeling_parameters`] - nonlinear link properties to enter in a
//!   structural analysis program (ETABS, SAP2000 or similar)
//!
//! Both carry a UTC generation date.

use chrono::{DateTime, Utc};

use crate::calculations::compliance::{Comparator, ComplianceCheck, ComplianceReport};
use crate::calculations::design::{DesignInput, DesignResult};

/// Code-check report for a verified design.
pub fn verification_report(report: &ComplianceReport, result: &DesignResult) -> String {
    verification_report_at(report, result, Utc::now())
}

fn verification_report_at(report: &ComplianceReport, result: &DesignResult, date: DateTime<Utc>) -> String {
    let mut text = format!(
        "DESIGN VERIFICATION PER {code}\nGenerated: {date}\n",
        code = report.code_edition,
        date = date.format("%Y-%m-%d %H:%M UTC"),
    );

    for (i, check) in report.checks().into_iter().enumerate() {
        text.push_str(&format!("\n{}. {} ({})\n", i + 1, check.kind.name().to_uppercase(), check.reference));
        text.push_str(&check_lines(check));
        text.push_str(&format!("   - Result: {}\n", check.verdict()));
    }

    text.push_str(&format!(
        r##"
GEOMETRIC PROPERTIES:
   - Isolator diameter: {diameter:.1} mm
   - Total height: {height:.1} mm
   - Section area: {area:.0} mm²

RECOMMENDATIONS:
"##,
        diameter = result.diameter_mm,
        height = result.total_height_mm,
        area = report.area_mm2,
    ));

    for line in report.recommendations() {
        text.push_str(&format!("   - {}\n", line));
    }

    text.push_str("\nNote: This verification is preliminary. Prototype testing is required for final validation.\n");
    text
}

fn check_lines(check: &ComplianceCheck) -> String {
    match (check.comparator, check.actual, check.limit) {
        (Comparator::NotApplicable, _, _) => {
            "   - Circular isolators are generally not governed by overturning\n".to_string()
        }
        (comparator, Some(actual), Some(limit)) => {
            let bound = match comparator {
                Comparator::AtLeast => "Minimum required",
                _ => "Maximum allowed",
            };
            format!(
                "   - Actual: {}\n   - {}: {}\n",
                with_unit(actual, check.kind.unit()),
                bound,
                with_unit(limit, check.kind.unit()),
            )
        }
        _ => String::new(),
    }
}

fn with_unit(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{:.2}", value)
    } else {
        format!("{:.2} {}", value, unit)
    }
}

/// Nonlinear link properties for structural analysis software.
pub fn modeling_parameters(input: &DesignInput, result: &DesignResult) -> String {
    modeling_parameters_at(input, result, Utc::now())
}

fn modeling_parameters_at(input: &DesignInput, result: &DesignResult, date: DateTime<Utc>) -> String {
    let label = if input.label.is_empty() { "Isolator" } else { input.label.as_str() };

    let mut text = format!(
        r##"MODELING PARAMETERS: {label}
Generated: {date}

SEISMIC INPUT:
- S1: {s1}
- SDS: {sds}
- SD1: {sd1}
- TL: {tl} s
- Damping coefficient BD: {bd}

GEOMETRY:
- Diameter: {diameter:.1} mm
- Total height: {total_height:.1} mm
- Rubber height: {rubber_height:.1} mm
- Rubber layers: {layers}
- Layer thickness: {layer_thickness:.1} mm
- Lead core diameter: {core:.1} mm

LOAD AND DISPLACEMENT:
- Vertical design load: {load:.1} kN
- Target displacement: {target:.1} mm
- Isolated period: {period:.2} s
- Total design displacement: {total_displacement:.1} mm

MECHANICAL PROPERTIES:
- Lead core yield force Fy: {fy:.1} kN
- Effective horizontal stiffness K_h: {kh:.1} kN/m
- Vertical stiffness K_v: {kv:.1} kN/m
- Yield displacement: {dy:.1} mm
- Effective damping: {damping:.1}%

LINK DEFINITION:
1. Use a 'Rubber Isolator' / lead-rubber bearing link element
2. Bilinear law with Fy = {fy:.1} kN
3. Post-yield stiffness of 5-10% of the elastic stiffness
4. Include P-Delta effects for large vertical loads (ASCE 7 Section 12.8.7)
5. Check that peak displacements stay within the design displacement
"##,
        label = label,
        date = date.format("%Y-%m-%d %H:%M UTC"),
        s1 = input.seismic.s1,
        sds = input.seismic.sds,
        sd1 = input.seismic.sd1,
        tl = input.seismic.tl,
        bd = result.bd_factor,
        diameter = result.diameter_mm,
        total_height = result.total_height_mm,
        rubber_height = result.rubber_height_mm,
        layers = result.layer_count,
        layer_thickness = result.layer_thickness_mm,
        core = result.lead_core_diameter_mm,
        load = result.vertical_load_kn,
        target = input.max_displacement_mm,
        period = result.isolated_period_s,
        total_displacement = result.total_displacement_mm,
        fy = result.yield_force_kn,
        kh = result.horizontal_stiffness_kn_m,
        kv = result.vertical_stiffness_kn_m,
        dy = result.yield_displacement_mm(),
        damping = result.damping_ratio_pct,
    );

    if result.has_warnings() {
        text.push_str("\nWARNINGS:\n");
        for warning in &result.warnings {
            text.push_str(&format!("- {}\n", warning.message));
        }
    }

    text.push_str("\nNote: Initial approximation only. Validate against the governing code and prototype tests.\n");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{analyze, SeismicParameters};
    use crate::settings::DesignSettings;
    use chrono::TimeZone;

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_verification_report_passing() {
        let input = DesignInput::new(200.0, 150.0, SeismicParameters::default());
        let analysis = analyze(&input, &DesignSettings::default()).unwrap();
        let text = verification_report_at(&analysis.compliance, &analysis.design, fixed_date());

        assert!(text.starts_with("DESIGN VERIFICATION PER ASCE 7-16"));
        assert!(text.contains("Generated: 2024-03-15 09:30 UTC"));
        assert!(text.contains("1. COMPRESSIVE STRESS (ASCE 7-16 Section 17.2.3.1)"));
        assert!(text.contains("   - Actual: 9.99 MPa"));
        assert!(text.contains("   - Maximum allowed: 11.00 MPa"));
        assert!(text.contains("   - Minimum required: 15.00 %"));
        assert!(text.contains("Circular isolators are generally not governed"));
        assert!(text.contains("Isolator diameter: 500.0 mm"));
        assert!(text.contains("The design satisfies all ASCE 7-16 requirements"));
        assert!(!text.contains("FAIL"));
    }

    #[test]
    fn test_verification_report_failing() {
        let input = DesignInput::new(200.0, 150.0, SeismicParameters::default()).with_diameter(300.0);
        let analysis = analyze(&input, &DesignSettings::default()).unwrap();
        let text = verification_report_at(&analysis.compliance, &analysis.design, fixed_date());
        assert!(text.contains("   - Result: FAIL"));
        assert!(text.contains("Increase the isolator diameter"));
    }

    #[test]
    fn test_modeling_parameters() {
        let input = DesignInput::new(200.0, 150.0, SeismicParameters::default()).with_label("LRB-1");
        let analysis = analyze(&input, &DesignSettings::default()).unwrap();
        let text = modeling_parameters_at(&input, &analysis.design, fixed_date());

        assert!(text.starts_with("MODELING PARAMETERS: LRB-1"));
        assert!(text.contains("- Damping coefficient BD: 1.2"));
        assert!(text.contains("- Rubber layers: 20"));
        assert!(text.contains("- Lead core yield force Fy: 392.7 kN"));
        assert!(text.contains("- Effective horizontal stiffness K_h: 502654.8 kN/m"));
        assert!(text.contains("- Yield displacement: 0.8 mm"));
        assert!(text.contains("- Isolated period: 0.13 s"));
        assert!(text.contains("- Total design displacement: 20.8 mm"));
        assert!(!text.contains("WARNINGS"));
    }

    #[test]
    fn test_modeling_parameters_lists_warnings() {
        let input = DesignInput::new(200.0, 150.0, SeismicParameters::default()).with_rubber_height(100.0);
        let analysis = analyze(&input, &DesignSettings::default()).unwrap();
        let text = modeling_parameters(&input, &analysis.design);
        assert!(text.starts_with("MODELING PARAMETERS: Isolator"));
        assert!(text.contains("WARNINGS:"));
        assert!(text.contains("shear strain"));
    }
}
