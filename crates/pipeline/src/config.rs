//! Pipeline configuration
//!
//! Configuration is a strict-schema YAML document: unknown fields at any
//! level are rejected at load time, before any data I/O happens.

use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Parameters for normalization and weighting in the suitability model.
///
/// Three (min, max) range pairs and three weights. Weights are not required
/// to sum to 1; the final score is clamped to [0, 1] regardless.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelParams {
    pub v_min: f64,
    pub v_max: f64,
    pub t_min: f64,
    pub t_max: f64,
    pub r_min: f64,
    pub r_max: f64,
    pub w_v: f64,
    pub w_t: f64,
    pub w_r: f64,
}

/// Shape of a region of interest. Only bounding boxes are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoiKind {
    #[default]
    Bbox,
}

/// Region of interest: an axis-aligned bounding box in the raster CRS.
///
/// Well-formed boxes have `xmin <= xmax` and `ymin <= ymax`; this is not
/// enforced here. Malformed boxes degrade to the full-raster fallback in
/// the clipping step.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Roi {
    #[serde(rename = "type", default)]
    pub kind: RoiKind,
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    pub raster_path: PathBuf,
    pub climate_csv: PathBuf,
    pub output_dir: PathBuf,
    pub roi: Roi,
    pub model_params: ModelParams,
    /// Maximum number of cells to sample from the ROI
    #[serde(default = "default_max_cells")]
    pub max_cells: usize,
}

fn default_max_cells() -> usize {
    500
}

/// Load a YAML config from disk and validate it against the strict schema.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let text = fs::read_to_string(path.as_ref())?;
    let config = serde_yaml::from_str(&text)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    const VALID_CONFIG: &str = r#"
raster_path: "data/usda_cdl.tif"
climate_csv: "data/demo_climate.csv"
output_dir: "outputs/demo_run"
roi:
  type: "bbox"
  xmin: 0.0
  ymin: 0.0
  xmax: 10.0
  ymax: 10.0
model_params:
  v_min: 0.0
  v_max: 1.0
  t_min: 0.0
  t_max: 40.0
  r_min: 0.0
  r_max: 300.0
  w_v: 0.4
  w_t: 0.3
  w_r: 0.3
"#;

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::with_suffix(".yml").unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(VALID_CONFIG);
        let cfg = load_config(file.path()).unwrap();

        assert_eq!(cfg.raster_path.file_name().unwrap(), "usda_cdl.tif");
        assert_eq!(cfg.model_params.w_v, 0.4);
        assert_eq!(cfg.roi.kind, RoiKind::Bbox);
        assert_eq!(cfg.max_cells, 500);
    }

    #[test]
    fn test_max_cells_override() {
        let text = format!("{VALID_CONFIG}max_cells: 10\n");
        let file = write_config(&text);
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.max_cells, 10);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let text = format!("{VALID_CONFIG}mystery_knob: 3\n");
        let file = write_config(&text);
        let err = load_config(file.path()).unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("mystery_knob"));
    }

    #[test]
    fn test_unknown_nested_field_rejected() {
        let text = VALID_CONFIG.replace("  w_r: 0.3", "  w_r: 0.3\n  w_extra: 0.1");
        let file = write_config(&text);
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("w_extra"));
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let text = VALID_CONFIG.replace("climate_csv: \"data/demo_climate.csv\"\n", "");
        let file = write_config(&text);
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("climate_csv"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config("/nonexistent/cfg.yml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
