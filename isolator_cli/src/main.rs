//! # Isolator CLI Application
//!
//! Command-line front end for the isolator design engine: reads the design
//! input from flags, a JSON file or interactive prompts, runs the sizing,
//! verification and hysteresis pipeline, prints the results and optionally
//! writes the export and curve files.
//!
//! ```text
//! isolator --load 200 --displacement 150 --s1 0.6 --export lrb1.json
//! isolator --input lrb1.json --strict -v
//! isolator --interactive
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::{debug, info};

use isolator_core::calculations::{analyze, Branch, DesignInput, IsolatorAnalysis, SeismicParameters, Sizing};
use isolator_core::export::DesignExport;
use isolator_core::file_io::{load_input, load_settings, save_curve, save_export};
use isolator_core::report::{modeling_parameters, verification_report};
use isolator_core::{CalcError, CalcResult, DesignSettings, WarningPolicy};

/// Design a lead-rubber seismic isolator (simplified ASCE 7-16 Chapter 17)
#[derive(Debug, Parser)]
#[command(name = "isolator", version, about)]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Vertical service load (tonnes)
    #[arg(long, default_value_t = 200.0)]
    load: f64,

    /// Isolator diameter (mm), 0 = auto
    #[arg(long, default_value_t = 0.0)]
    diameter: f64,

    /// Total rubber height (mm), 0 = auto
    #[arg(long, default_value_t = 0.0)]
    rubber_height: f64,

    /// Target maximum displacement (mm)
    #[arg(long, default_value_t = 150.0)]
    displacement: f64,

    /// Mapped 1-second spectral acceleration S1
    #[arg(long, default_value_t = 0.6)]
    s1: f64,

    /// Design short-period spectral acceleration SDS
    #[arg(long, default_value_t = 1.0)]
    sds: f64,

    /// Design 1-second spectral acceleration SD1
    #[arg(long, default_value_t = 0.8)]
    sd1: f64,

    /// Long-period transition period TL (s)
    #[arg(long, default_value_t = 8.0)]
    tl: f64,

    /// Label for the isolator
    #[arg(long)]
    label: Option<String>,

    /// Read the input from a JSON file (design input or export file)
    #[arg(long, conflicts_with = "interactive")]
    input: Option<PathBuf>,

    /// Design settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the design export to this JSON file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write the hysteresis curve to this JSON file
    #[arg(long)]
    curve: Option<PathBuf>,

    /// Samples on the loading branch of the hysteresis curve
    #[arg(long)]
    samples: Option<usize>,

    /// Treat limit exceedances on supplied geometry as errors
    #[arg(long)]
    strict: bool,

    /// Prompt for the input values
    #[arg(short, long)]
    interactive: bool,

    /// Print the full analysis as JSON instead of tables
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn run(&self) -> CalcResult<()> {
        let settings = self.settings()?;
        let input = self.design_input()?;
        debug!(?input, "design input");

        let analysis = analyze(&input, &settings)?;

        if self.json {
            let json = serde_json::to_string_pretty(&analysis).map_err(|e| CalcError::serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            print_analysis(&analysis);
            println!();
            println!("{}", verification_report(&analysis.compliance, &analysis.design));
            println!("{}", modeling_parameters(&analysis.input, &analysis.design));
        }

        if let Some(path) = &self.export {
            save_export(&DesignExport::from(&analysis), path)?;
            info!(path = %path.display(), "design exported");
        }
        if let Some(path) = &self.curve {
            save_curve(&analysis.curve, path)?;
            info!(path = %path.display(), "hysteresis curve written");
        }
        Ok(())
    }

    fn settings(&self) -> CalcResult<DesignSettings> {
        let mut settings = match &self.settings {
            Some(path) => load_settings(path)?,
            None => DesignSettings::default(),
        };
        if let Some(samples) = self.samples {
            settings.samples_per_branch = samples;
        }
        if self.strict {
            settings.warning_policy = WarningPolicy::Strict;
        }
        Ok(settings)
    }

    fn design_input(&self) -> CalcResult<DesignInput> {
        let mut input = if let Some(path) = &self.input {
            load_input(path)?
        } else if self.interactive {
            prompt_input()
        } else {
            DesignInput {
                label: String::new(),
                vertical_load_t: self.load,
                diameter: Sizing::from_sentinel(self.diameter),
                rubber_height: Sizing::from_sentinel(self.rubber_height),
                max_displacement_mm: self.displacement,
                seismic: SeismicParameters::new(self.s1, self.sds, self.sd1, self.tl),
            }
        };
        if let Some(label) = &self.label {
            input.label = label.clone();
        }
        Ok(input)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false)
            .with_writer(io::stderr);

        tracing_subscriber::registry().with(filter).with(fmt_layer).init();
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_input() -> DesignInput {
    println!("Isolator Design - ASCE 7-16");
    println!("===========================");
    println!("(press Enter to keep the default, 0 = auto for dimensions)");
    println!();

    let load = prompt_f64("Vertical load (t) [200.0]: ", 200.0);
    let diameter = prompt_f64("Isolator diameter (mm) [0 = auto]: ", 0.0);
    let rubber_height = prompt_f64("Rubber height (mm) [0 = auto]: ", 0.0);
    let displacement = prompt_f64("Target displacement (mm) [150.0]: ", 150.0);
    let s1 = prompt_f64("S1 [0.6]: ", 0.6);
    let sds = prompt_f64("SDS [1.0]: ", 1.0);
    let sd1 = prompt_f64("SD1 [0.8]: ", 0.8);
    let tl = prompt_f64("TL (s) [8.0]: ", 8.0);
    println!();

    DesignInput {
        label: String::new(),
        vertical_load_t: load,
        diameter: Sizing::from_sentinel(diameter),
        rubber_height: Sizing::from_sentinel(rubber_height),
        max_displacement_mm: displacement,
        seismic: SeismicParameters::new(s1, sds, sd1, tl),
    }
}

fn print_analysis(analysis: &IsolatorAnalysis) {
    let design = &analysis.design;
    let input = &analysis.input;

    println!("═══════════════════════════════════════");
    let title = banner_title(&input.label);
    println!("  {}", title);
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Load:          {:.1} t ({:.1} kN)", input.vertical_load_t, design.vertical_load_kn);
    println!("  Diameter:      {}", sizing_label(input.diameter));
    println!("  Rubber height: {}", sizing_label(input.rubber_height));
    println!("  Displacement:  {:.1} mm", input.max_displacement_mm);
    println!(
        "  Seismic:       S1={} SDS={} SD1={} TL={} s",
        input.seismic.s1, input.seismic.sds, input.seismic.sd1, input.seismic.tl
    );
    println!();
    println!("Geometry:");
    println!("  Diameter       = {:.1} mm", design.diameter_mm);
    println!("  Total height   = {:.1} mm", design.total_height_mm);
    println!("  Rubber height  = {:.1} mm ({} layers x {:.2} mm)", design.rubber_height_mm, design.layer_count, design.layer_thickness_mm);
    println!("  Lead core      = {:.1} mm", design.lead_core_diameter_mm);
    println!();
    println!("Properties:");
    println!("  Fy  = {:.1} kN", design.yield_force_kn);
    println!("  K_h = {:.1} kN/m", design.horizontal_stiffness_kn_m);
    println!("  K_v = {:.1} kN/m", design.vertical_stiffness_kn_m);
    println!("  β   = {:.1} %", design.damping_ratio_pct);
    println!("  T   = {:.2} s", design.isolated_period_s);
    println!("  D_TD = {:.1} mm (BD = {})", design.total_displacement_mm, design.bd_factor);

    if design.has_warnings() {
        println!();
        println!("Warnings:");
        for warning in &design.warnings {
            println!("  [WARN] {}", warning.message);
        }
    }

    println!();
    println!("Code Checks:");
    for check in analysis.compliance.checks() {
        match (check.actual, check.limit) {
            (Some(actual), Some(limit)) => println!(
                "  {:<24} {:>9.3} {} {:<7.3} {}",
                check.kind.name(),
                actual,
                check.comparator.symbol(),
                limit,
                status_icon(check.passes)
            ),
            _ => println!("  {:<24} {:>9} {}", check.kind.name(), "n/a", status_icon(check.passes)),
        }
    }

    println!();
    println!("Hysteresis:");
    println!(
        "  {} points (loading {}, unloading {}, reloading {})",
        analysis.curve.points.len(),
        analysis.curve.branch(Branch::Loading).len(),
        analysis.curve.branch(Branch::Unloading).len(),
        analysis.curve.branch(Branch::Reloading).len()
    );
    println!(
        "  d_y = {:.1} mm, k_e = {:.4} kN/mm, k_p = {:.4} kN/mm, peak F = {:.1} kN",
        analysis.curve.yield_point.displacement_mm,
        analysis.curve.elastic_stiffness_kn_mm,
        analysis.curve.post_yield_stiffness_kn_mm,
        analysis.curve.peak_force_kn()
    );

    println!();
    println!("═══════════════════════════════════════");
    match analysis.compliance.governing() {
        Some(check) => println!(
            "  RESULT: {} (governs: {})",
            if analysis.compliance.passes() { "PASS" } else { "FAIL" },
            check.kind.name()
        ),
        None => println!("  RESULT: {}", if analysis.compliance.passes() { "PASS" } else { "FAIL" }),
    }
    println!("═══════════════════════════════════════");
}

fn banner_title(label: &str) -> String {
    if label.is_empty() {
        "ISOLATOR DESIGN RESULTS".to_string()
    } else {
        format!("ISOLATOR DESIGN RESULTS - {}", label)
    }
}

fn sizing_label(sizing: Sizing) -> String {
    match sizing {
        Sizing::Auto => "auto".to_string(),
        Sizing::Supplied(v) => format!("{:.1} mm", v),
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    Cli::setup_logging(cli.verbose);

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
