// mandelheat-core/src/constants.rs

/// Number of sample points evaluated together in one batch.
pub const LANES: usize = 8;

/// Iteration budget for the Mandelbulb map.
pub const MAX_ITERATIONS: usize = 10;

/// Squared norm at which an orbit is considered escaped.
pub const BAILOUT_NORM: f32 = 4.0;

pub const IMAGE_WIDTH: u32 = 512;
pub const IMAGE_HEIGHT: u32 = 512;
pub const IMAGE_DEPTH: u32 = 512;

/// Orbit positions inside this cube are mapped onto the voxel grid.
pub const ORBIT_DOMAIN: (f32, f32) = (-2.0, 2.0);

/// Candidate points `c` are drawn uniformly from this cube.
pub const SAMPLE_DOMAIN: (f32, f32) = (-1.0, 1.0);

/// Total sample points across all workers (700 million batches of 8).
pub const TOTAL_SAMPLES: u64 = 5_600_000_000;

/// Seed keys for the vector RNG.
pub const DEFAULT_SEED: (u64, u64) = (324, 4444);

/// Cache file used when `--cache-result` is given without a path.
pub const DEFAULT_CACHE_PATH: &str = "3d.mandelbulb_heatmap_plot.3d.bin";
