//! # isolator_core - Seismic Isolator Design Engine
//!
//! `isolator_core` sizes lead-rubber seismic isolators following a simplified
//! ASCE 7-16 Chapter 17 procedure, verifies them against the code limits and
//! generates their bilinear hysteresis loop. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Injectable constants**: Every material constant and code limit lives in
//!   [`settings::DesignSettings`]
//!
//! ## Quick Start
//!
//! ```rust
//! use isolator_core::calculations::{analyze, DesignInput, SeismicParameters};
//! use isolator_core::settings::DesignSettings;
//!
//! let input = DesignInput::new(200.0, 150.0, SeismicParameters::new(0.6, 1.0, 0.8, 8.0));
//! let analysis = analyze(&input, &DesignSettings::default()).unwrap();
//!
//! assert_eq!(analysis.design.diameter_mm, 500.0);
//! assert!(analysis.compliance.passes());
//!
//! let json = serde_json::to_string_pretty(&analysis.design).unwrap();
//! assert!(json.contains("\"layer_count\": 20"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Sizing, compliance verification and hysteresis model
//! - [`settings`] - Material constants, code limits and policies
//! - [`standard_sizes`] - Commercial diameter table
//! - [`export`] - JSON exchange format
//! - [`report`] - Plain-text reports
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves

pub mod calculations;
pub mod errors;
pub mod export;
pub mod file_io;
pub mod report;
pub mod settings;
pub mod standard_sizes;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze, IsolatorAnalysis};
pub use errors::{CalcError, CalcResult};
pub use export::DesignExport;
pub use settings::{DesignSettings, WarningPolicy};
