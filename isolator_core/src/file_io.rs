//! # File I/O Module
//!
//! JSON persistence for inputs, settings, exports and hysteresis curves.
//!
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Typed loads**: Every load parses straight into the engine's types
//!
//! ## Example
//!
//! ```rust,no_run
//! use isolator_core::calculations::{analyze, DesignInput, SeismicParameters};
//! use isolator_core::export::DesignExport;
//! use isolator_core::file_io::{load_export, save_export};
//! use isolator_core::settings::DesignSettings;
//! use std::path::Path;
//!
//! let input = DesignInput::new(200.0, 150.0, SeismicParameters::default());
//! let analysis = analyze(&input, &DesignSettings::default())?;
//!
//! let path = Path::new("isolator.json");
//! save_export(&DesignExport::from(&analysis), path)?;
//! let reloaded = load_export(path)?;
//! assert_eq!(reloaded.to_input(), input);
//! # Ok::<(), isolator_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::calculations::design::DesignInput;
use crate::calculations::hysteresis::HysteresisCurve;
use crate::errors::{CalcError, CalcResult};
use crate::export::DesignExport;
use crate::settings::DesignSettings;

/// Save any serializable value as pretty JSON with atomic write semantics.
///
/// The save process:
/// 1. Serialize to JSON (four-space indent)
/// 2. Write to a temporary file next to `path`
/// 3. Sync to disk (fsync)
/// 4. Rename over `path` (atomic on most filesystems)
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let mut bytes = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(&bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "saved");
    Ok(())
}

/// Load and parse a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))
}

/// Save a design export file.
pub fn save_export(export: &DesignExport, path: &Path) -> CalcResult<()> {
    save_json(export, path)
}

/// Load a design export file.
pub fn load_export(path: &Path) -> CalcResult<DesignExport> {
    load_json(path)
}

/// Load a design input.
///
/// Accepts either a [`DesignInput`] document or a previously saved
/// [`DesignExport`], whose input section is used.
pub fn load_input(path: &Path) -> CalcResult<DesignInput> {
    let value: serde_json::Value = load_json(path)?;
    if value.get("carga_ton").is_some() {
        let export: DesignExport = serde_json::from_value(value)
            .map_err(|e| CalcError::serialization(format!("Invalid export in {}: {}", path.display(), e)))?;
        return Ok(export.to_input());
    }
    serde_json::from_value(value)
        .map_err(|e| CalcError::serialization(format!("Invalid input in {}: {}", path.display(), e)))
}

/// Load design settings and validate them.
pub fn load_settings(path: &Path) -> CalcResult<DesignSettings> {
    let settings: DesignSettings = load_json(path)?;
    settings.validate()?;
    Ok(settings)
}

/// Save a sampled hysteresis curve.
pub fn save_curve(curve: &HysteresisCurve, path: &Path) -> CalcResult<()> {
    save_json(curve, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{analyze, SeismicParameters};
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("isolator_test_{}.json", name))
    }

    #[test]
    fn test_export_roundtrip() {
        let path = temp_path("export");

        let input = DesignInput::new(200.0, 150.0, SeismicParameters::default()).with_diameter(550.0);
        let analysis = analyze(&input, &DesignSettings::default()).unwrap();
        let export = DesignExport::from(&analysis);
        save_export(&export, &path).unwrap();

        let loaded = load_export(&path).unwrap();
        assert_eq!(loaded.results.layer_count, export.results.layer_count);
        assert_eq!(loaded.checks, export.checks);
        assert_eq!(loaded.to_input(), input);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_export_uses_four_space_indent() {
        let path = temp_path("indent");

        let input = DesignInput::new(200.0, 150.0, SeismicParameters::default());
        let analysis = analyze(&input, &DesignSettings::default()).unwrap();
        save_export(&DesignExport::from(&analysis), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n    \"carga_ton\": 200.0"));
        assert!(text.contains("CUMPLE TODOS LOS REQUISITOS ✓"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_path("atomic");
        let tmp_path = path.with_extension("json.tmp");

        save_json(&DesignSettings::default(), &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_input_accepts_both_formats() {
        let input_path = temp_path("plain_input");
        let export_path = temp_path("export_input");

        let input = DesignInput::new(180.0, 200.0, SeismicParameters::new(0.5, 0.9, 0.6, 8.0)).with_label("LRB-2");
        save_json(&input, &input_path).unwrap();
        assert_eq!(load_input(&input_path).unwrap(), input);

        let analysis = analyze(&input, &DesignSettings::default()).unwrap();
        save_export(&DesignExport::from(&analysis), &export_path).unwrap();
        let from_export = load_input(&export_path).unwrap();
        assert_eq!(from_export.vertical_load_t, 180.0);
        assert_eq!(from_export.label, "");

        let _ = fs::remove_file(&input_path);
        let _ = fs::remove_file(&export_path);
    }

    #[test]
    fn test_load_settings_validates() {
        let path = temp_path("bad_settings");
        fs::write(&path, r#"{ "material": { "shape_factor": -1.0 } }"#).unwrap();
        let err = load_settings(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_curve() {
        let path = temp_path("curve");
        let input = DesignInput::new(200.0, 150.0, SeismicParameters::default());
        let analysis = analyze(&input, &DesignSettings::default()).unwrap();
        save_curve(&analysis.curve, &path).unwrap();

        let loaded: HysteresisCurve = load_json(&path).unwrap();
        assert_eq!(loaded.points.len(), analysis.curve.points.len());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let err = load_export(Path::new("/nonexistent/isolator.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_invalid_json() {
        let path = temp_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        let err = load_input(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }
}
