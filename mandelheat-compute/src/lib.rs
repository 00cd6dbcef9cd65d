pub mod accumulator;
pub mod cache;
pub mod error;
pub mod evaluator;
pub mod pipeline;
pub mod progress;
pub mod reducer;
pub mod rng;
pub mod tone_map;

pub use accumulator::{generate_heatmap, worker_rng, AccumulationSummary};
pub use cache::{FileCache, VolumeCache};
pub use error::{CacheError, HeatmapError};
pub use evaluator::{evaluate, triplex_pow8, OrbitBuffer, SampleBatch};
pub use pipeline::{compute_volume, generate_heatmap_image, GeneratedVolume, VolumeSource};
pub use progress::{CountingProgress, NoProgress, ProgressSink};
pub use reducer::combine_heatmaps;
pub use rng::VectorRng;
pub use tone_map::{tone_map_value, transform_heatmap};

// Re-export core types for convenience
pub use mandelheat_core::*;
