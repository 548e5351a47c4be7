//! Climate table ingestion and aggregation
//!
//! The climate CSV is reduced to two scalar summaries that are applied
//! uniformly to every sampled raster cell; there is no per-cell climate
//! interpolation.

use crate::error::{Error, Result};
use csv::StringRecord;
use std::path::Path;
use tracing::debug;

/// A delimited-text climate table held as raw records plus headers.
///
/// Columns are parsed to numbers lazily, so extra non-numeric columns
/// (station names, notes) are tolerated as long as they are not aggregated.
#[derive(Debug, Clone)]
pub struct ClimateTable {
    headers: StringRecord,
    records: Vec<StringRecord>,
}

/// Scalar climate summary shared by every sampled cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateSummary {
    pub mean_temp: f64,
    /// Mean of the `total_rain` column. The column name suggests a sum,
    /// but the aggregate has always been a mean; preserved as-is.
    pub total_rain: f64,
}

impl ClimateTable {
    /// Number of observation rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has zero rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Parse a named column as f64 values.
    ///
    /// Fails with `MissingColumn` when the header is absent and
    /// `NonNumericValue` when a cell does not parse.
    pub fn column(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self
            .headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))?;

        self.records
            .iter()
            .map(|record| {
                let cell = record.get(idx).unwrap_or("");
                cell.trim().parse().map_err(|_| Error::NonNumericValue {
                    column: name.to_string(),
                    value: cell.to_string(),
                })
            })
            .collect()
    }
}

/// Load a climate table from a CSV file with a header row.
pub fn load_climate_csv<P: AsRef<Path>>(path: P) -> Result<ClimateTable> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let headers = reader.headers()?.clone();
    let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

    debug!(
        rows = records.len(),
        columns = headers.len(),
        "loaded climate table"
    );

    Ok(ClimateTable { headers, records })
}

/// Aggregate the climate table into scalar summary statistics.
///
/// Both required columns (`mean_temp` and `total_rain`) are reduced with an
/// arithmetic mean across all rows.
pub fn aggregate_climate(table: &ClimateTable) -> Result<ClimateSummary> {
    let mean_temp = mean(&table.column("mean_temp")?);
    let total_rain = mean(&table.column("total_rain")?);

    Ok(ClimateSummary {
        mean_temp,
        total_rain,
    })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    fn write_csv(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::with_suffix(".csv").unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_aggregate_means() {
        let file = write_csv(
            "lat,lon,mean_temp,total_rain\n\
             40.0,-100.0,18.0,100.0\n\
             40.01,-99.99,19.0,120.0\n\
             40.02,-99.98,20.0,140.0\n",
        );
        let table = load_climate_csv(file.path()).unwrap();
        assert_eq!(table.len(), 3);

        let summary = aggregate_climate(&table).unwrap();
        assert_relative_eq!(summary.mean_temp, 19.0);
        // "total_rain" is aggregated as a mean, not a sum
        assert_relative_eq!(summary.total_rain, 120.0);
    }

    #[test]
    fn test_missing_column_named_in_error() {
        let file = write_csv("mean_temp\n18.0\n19.0\n");
        let table = load_climate_csv(file.path()).unwrap();
        let err = aggregate_climate(&table).unwrap_err();

        assert!(matches!(err, Error::MissingColumn(ref c) if c == "total_rain"));
        assert!(err.to_string().contains("total_rain"));
    }

    #[test]
    fn test_empty_table_aggregates_to_nan() {
        let file = write_csv("mean_temp,total_rain\n");
        let table = load_climate_csv(file.path()).unwrap();
        assert!(table.is_empty());

        // Mean of zero rows is NaN; the scoring layer bounds it downstream.
        let summary = aggregate_climate(&table).unwrap();
        assert!(summary.mean_temp.is_nan());
        assert!(summary.total_rain.is_nan());
    }

    #[test]
    fn test_non_numeric_value() {
        let file = write_csv("mean_temp,total_rain\n18.0,lots\n");
        let table = load_climate_csv(file.path()).unwrap();
        let err = aggregate_climate(&table).unwrap_err();
        assert!(matches!(err, Error::NonNumericValue { .. }));
    }

    #[test]
    fn test_extra_columns_tolerated() {
        let file = write_csv("station,mean_temp,total_rain\nKSZ-3,18.0,100.0\n");
        let table = load_climate_csv(file.path()).unwrap();
        let summary = aggregate_climate(&table).unwrap();
        assert_relative_eq!(summary.mean_temp, 18.0);
    }

    #[test]
    fn test_missing_file() {
        assert!(load_climate_csv("/nonexistent/climate.csv").is_err());
    }
}
