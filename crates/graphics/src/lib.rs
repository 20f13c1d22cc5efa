//! Raster graphics embedded in a proposal: the monthly production chart and
//! the yearly return table.
//!
//! Both are drawn as SVG in code and rasterized to PNG with `resvg`. Each
//! render writes exactly one file into the directory it is given and hands
//! back an [`ImageArtifact`]; deleting that file is the caller's job.

pub mod artifact;
pub mod chart;
pub mod error;
pub mod raster;
pub mod svg;
pub mod table;

pub use artifact::{ImageArtifact, artifact_path};
pub use chart::{CHART_SIZE_CM, ChartLabels, production_chart_svg, render_production_chart};
pub use error::GraphicsError;
pub use raster::{RasterOptions, rasterize_svg};
pub use table::{TABLE_SIZE_CM, TableLabels, render_return_table, return_table_svg};
