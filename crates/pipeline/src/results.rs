//! Result table persistence

use crate::error::Result;
use crate::score::SuitabilityLabel;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// One scored raster cell.
///
/// Field order matches the CSV header:
/// `cell_id,lat,lon,v_index,mean_temp,total_rain,score,label`
#[derive(Debug, Clone, Serialize)]
pub struct CellRecord {
    /// Zero-based sequential id in sampling order
    pub cell_id: usize,
    pub lat: f64,
    pub lon: f64,
    /// Raw raster cell value
    pub v_index: f64,
    /// Shared climate aggregate (identical for every cell in a run)
    pub mean_temp: f64,
    /// Shared climate aggregate (a mean, despite the name)
    pub total_rain: f64,
    pub score: f64,
    pub label: SuitabilityLabel,
}

/// Write the result table as a CSV file with a header row.
pub fn write_results<P: AsRef<Path>>(records: &[CellRecord], path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!(
        rows = records.len(),
        path = %path.as_ref().display(),
        "saved results"
    );
    Ok(())
}
