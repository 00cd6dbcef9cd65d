//! End-to-end volume generation.
//!
//! Workers fill their partitions in parallel on a dedicated thread pool.
//! Once every worker has finished, the partitions are merged and tone
//! mapped on the calling thread.

use std::time::Instant;

use crate::accumulator::{generate_heatmap, AccumulationSummary};
use crate::cache::VolumeCache;
use crate::error::{CacheError, HeatmapError};
use crate::progress::ProgressSink;
use crate::reducer::combine_heatmaps;
use crate::tone_map::transform_heatmap;
use mandelheat_core::{ByteVolume, HeatmapArena, HeatmapConfig};

/// Where a volume returned by [`generate_heatmap_image`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeSource {
    Cache,
    Computed,
}

/// A finished volume and its origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedVolume {
    pub volume: ByteVolume,
    pub source: VolumeSource,
}

/// Sample, merge and tone map a volume for `config`.
///
/// Each worker gets its own thread for the whole run and writes only to its
/// own partition. The result depends on the configuration (including the
/// resolved worker count) and never on thread scheduling.
pub fn compute_volume<P: ProgressSink + ?Sized>(
    config: &HeatmapConfig,
    progress: &P,
) -> Result<ByteVolume, HeatmapError> {
    let workers = config.resolve_workers();
    let dims = config.dims;
    let start = Instant::now();

    log::info!(
        "Sampling {} points on {} workers into a {}x{}x{} grid",
        config.total_samples,
        workers,
        dims.width,
        dims.height,
        dims.depth
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("heatmap-worker-{}", i))
        .build()?;

    let mut arena = HeatmapArena::new(dims, workers);
    let mut summaries = vec![AccumulationSummary::default(); workers];

    // scope returns once every spawned worker has finished
    pool.scope(|s| {
        for ((worker_id, mut partition), summary) in arena
            .partitions_mut()
            .into_iter()
            .enumerate()
            .zip(summaries.iter_mut())
        {
            let samples = config.samples_for_worker(worker_id, workers);
            s.spawn(move |_| {
                *summary =
                    generate_heatmap(&mut partition, samples, worker_id, config.seed, progress);
            });
        }
    });

    let plotted: u64 = summaries.iter().map(|s| s.plotted).sum();
    let dropped: u64 = summaries.iter().map(|s| s.dropped).sum();
    log::info!(
        "Sampling finished in {:.2?}: {} orbit points plotted, {} outside the grid",
        start.elapsed(),
        plotted,
        dropped
    );

    let merged = combine_heatmaps(arena);
    let volume = transform_heatmap(&merged);

    log::info!("Volume ready after {:.2?}", start.elapsed());

    Ok(volume)
}

/// Produce the volume for `config`, going through `cache` when given.
///
/// Without `force_compute` a usable cached volume is returned as is. A
/// missing or unreadable cache falls back to computing. A freshly computed
/// volume is written back to `cache`; failing to write is logged and does
/// not fail the call.
pub fn generate_heatmap_image<P: ProgressSink + ?Sized>(
    config: &HeatmapConfig,
    cache: Option<&dyn VolumeCache>,
    force_compute: bool,
    progress: &P,
) -> Result<GeneratedVolume, HeatmapError> {
    if let Some(cache) = cache {
        if force_compute {
            log::info!("Ignoring cached volume, recomputing");
        } else {
            match cache.load(config.dims) {
                Ok(volume) => {
                    log::info!("Loaded cached volume ({} bytes)", volume.as_bytes().len());
                    return Ok(GeneratedVolume {
                        volume,
                        source: VolumeSource::Cache,
                    });
                }
                Err(e @ CacheError::NotFound(_)) => log::info!("{}", e),
                Err(e) => log::warn!("Cached volume unusable, recomputing: {}", e),
            }
        }
    }

    let volume = compute_volume(config, progress)?;

    if let Some(cache) = cache {
        if let Err(e) = cache.store(&volume) {
            log::warn!("Failed to store volume: {}", e);
        }
    }

    Ok(GeneratedVolume {
        volume,
        source: VolumeSource::Computed,
    })
}
