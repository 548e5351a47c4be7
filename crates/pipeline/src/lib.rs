//! # TerraFlow Pipeline
//!
//! End-to-end agricultural suitability scoring:
//!
//! 1. Load a strict YAML configuration
//! 2. Ingest a raster (vegetation index) and a climate CSV
//! 3. Clip the raster to the configured region of interest, falling back to
//!    the full extent when the ROI yields no usable window
//! 4. Aggregate the climate table into two scalar summaries
//! 5. Score each valid cell with a weighted linear model
//! 6. Persist the result table as `results.csv`

pub mod climate;
pub mod clip;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod results;
pub mod score;

pub use config::{load_config, ModelParams, PipelineConfig, Roi};
pub use error::{Error, Result};
pub use pipeline::run_pipeline;
pub use results::CellRecord;
