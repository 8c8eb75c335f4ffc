//! Decoded metric records, one submodule per stream kind
//!
//! Each subsystem of the instrument emits its own stream at its own cadence,
//! so any tile may be present in one stream and missing from another. The
//! collections here hold already-decoded records; on-disk byte layouts and
//! their versioning are handled upstream.

mod corrected;
mod error_rate;
mod extraction;
mod image;
mod quality;
mod tile;

pub use corrected::CorrectedIntensityMetric;
pub use error_rate::ErrorMetric;
pub use extraction::ExtractionMetric;
pub use image::ImageMetric;
pub use quality::{QscoreBin, QualityMetric, QualityMetricSet};
pub use tile::{TileMetric, TileMetricSet, TileReadMetric};

/// All metric streams of one run, bundled for table assembly.
///
/// Per-cycle streams are plain ordered collections; the tile-level stream is
/// queryable by tile id because the overlay pass looks tiles up rather than
/// iterating them.
#[derive(Clone, Debug, Default)]
pub struct RunMetrics {
    pub extraction: Vec<ExtractionMetric>,
    pub error: Vec<ErrorMetric>,
    pub image: Vec<ImageMetric>,
    pub corrected: Vec<CorrectedIntensityMetric>,
    pub quality: QualityMetricSet,
    pub tile: TileMetricSet,
}
