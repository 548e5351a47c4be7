//! I/O for geospatial raster data

mod geotiff;

pub use geotiff::{read_geotiff, write_geotiff};
