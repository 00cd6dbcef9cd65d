pub mod byte_volume;
pub mod config;
pub mod constants;
pub mod error;
pub mod grid_dims;
pub mod heatmap;

pub use byte_volume::{ByteVolume, VolumeStats};
pub use config::{split_samples, HeatmapConfig, MANDELBULB_CONFIG};
pub use constants::*;
pub use error::VolumeError;
pub use grid_dims::GridDims;
pub use heatmap::{GridPartition, HeatmapArena, MergedHeatmap, VoxelGrid};
