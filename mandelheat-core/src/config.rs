//! Heatmap configuration and sampling helpers.
//!
//! This module contains the configuration for a heatmap run and pure helper
//! functions used by both the launcher and the compute workers.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SEED, IMAGE_DEPTH, IMAGE_HEIGHT, IMAGE_WIDTH, TOTAL_SAMPLES};
use crate::GridDims;

/// Configuration for one heatmap computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Voxel grid dimensions. The cache file format is coupled to these.
    pub dims: GridDims,
    /// Sample points across all workers.
    pub total_samples: u64,
    /// Worker thread count. `None` uses the available hardware parallelism.
    pub workers: Option<usize>,
    /// Seed keys for the vector RNG shared by all workers.
    pub seed: (u64, u64),
}

/// Production Mandelbulb heatmap configuration.
/// This is the canonical source of truth for the cached volume's parameters.
pub static MANDELBULB_CONFIG: HeatmapConfig = HeatmapConfig {
    dims: GridDims::new(IMAGE_WIDTH, IMAGE_HEIGHT, IMAGE_DEPTH),
    total_samples: TOTAL_SAMPLES,
    workers: None,
    seed: DEFAULT_SEED,
};

impl HeatmapConfig {
    /// Number of workers to launch, never zero.
    pub fn resolve_workers(&self) -> usize {
        match self.workers {
            Some(n) => n.max(1),
            None => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }

    /// Sample points assigned to `worker` out of `workers`.
    pub fn samples_for_worker(&self, worker: usize, workers: usize) -> u64 {
        split_samples(self.total_samples, worker, workers)
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        MANDELBULB_CONFIG
    }
}

/// Divide `total` samples evenly among `workers`.
///
/// The remainder goes to the lowest-indexed workers, so the shares always
/// add up to `total`.
pub fn split_samples(total: u64, worker: usize, workers: usize) -> u64 {
    let workers = workers.max(1) as u64;
    let worker = worker as u64;
    let base = total / workers;
    let extra = total % workers;
    base + u64::from(worker < extra)
}
