//! End-to-end pipeline orchestration

use crate::climate::{aggregate_climate, load_climate_csv};
use crate::clip::clip_raster_to_roi;
use crate::config::load_config;
use crate::error::{Error, Result};
use crate::results::{write_results, CellRecord};
use crate::score::{suitability_score, SuitabilityLabel};
use std::fs;
use std::path::Path;
use terraflow_core::io::read_geotiff;
use terraflow_core::Raster;
use tracing::info;

/// Run the full suitability pipeline from a config file.
///
/// Loads and validates the configuration, ingests the raster and climate
/// table, clips to the ROI (with full-extent fallback), scores up to
/// `max_cells` valid cells in row-major order, writes
/// `<output_dir>/results.csv`, and returns the result table.
///
/// The output file is written only after the whole table is assembled; no
/// partial results are persisted on failure.
pub fn run_pipeline<P: AsRef<Path>>(config_path: P) -> Result<Vec<CellRecord>> {
    let cfg = load_config(config_path.as_ref())?;
    info!(path = %config_path.as_ref().display(), "loaded config");

    // The raster handle lives only as long as the read; from here on the
    // grid is an owned in-memory copy.
    let raster: Raster<f64> = read_geotiff(&cfg.raster_path)?;
    let climate = load_climate_csv(&cfg.climate_csv)?;
    info!(
        raster = %cfg.raster_path.display(),
        climate = %cfg.climate_csv.display(),
        "loaded raster and climate data"
    );

    let clipped = clip_raster_to_roi(&raster, &cfg.roi);
    info!(outcome = ?clipped.outcome, "clipped raster to ROI");

    // One shared summary; applied to every sampled cell.
    let summary = aggregate_climate(&climate)?;

    let grid = &clipped.grid;
    let (rows, cols) = grid.shape();

    // Valid cells in row-major order (row ascending, then column).
    let mut valid_cells = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            if !grid.is_nodata_at(row, col)? {
                valid_cells.push((row, col));
            }
        }
    }

    if valid_cells.is_empty() {
        return Err(Error::NoValidCells);
    }

    // Prefix truncation, not sampling: coverage is biased toward the
    // top-left of the grid when the cap is hit.
    valid_cells.truncate(cfg.max_cells);
    info!(cells = valid_cells.len(), "sampling cells");

    let mut records = Vec::with_capacity(valid_cells.len());
    for (cell_id, &(row, col)) in valid_cells.iter().enumerate() {
        let v_index = grid.get(row, col)?;
        let (lon, lat) = grid.pixel_to_geo(col, row);

        let score = suitability_score(
            v_index,
            summary.mean_temp,
            summary.total_rain,
            &cfg.model_params,
        );

        records.push(CellRecord {
            cell_id,
            lat,
            lon,
            v_index,
            mean_temp: summary.mean_temp,
            total_rain: summary.total_rain,
            score,
            label: SuitabilityLabel::from_score(score),
        });
    }

    fs::create_dir_all(&cfg.output_dir)?;
    write_results(&records, cfg.output_dir.join("results.csv"))?;

    Ok(records)
}
