//! Monte Carlo orbit accumulation for one worker.
//!
//! Each worker draws its own sample batches, runs the evaluator and plots
//! the orbit of every escaping lane into its private grid partition.

use crate::evaluator::{evaluate, OrbitBuffer, SampleBatch};
use crate::progress::ProgressSink;
use crate::rng::VectorRng;
use mandelheat_core::{GridPartition, LANES, MAX_ITERATIONS, ORBIT_DOMAIN};

/// Batches between progress reports.
const PROGRESS_INTERVAL: u64 = 1 << 16;

/// Counters describing one worker's run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccumulationSummary {
    pub batches: u64,
    /// Orbit positions that incremented a voxel.
    pub plotted: u64,
    /// Orbit positions that fell outside the grid.
    pub dropped: u64,
}

/// Linear map of `input` from `[in_min, in_max]` to `[out_min, out_max]`.
#[inline]
pub fn map_range(input: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    (out_max - out_min) / (in_max - in_min) * (input - in_min) + out_min
}

/// Voxel index along an axis of `extent` cells for an orbit coordinate.
///
/// Rounds half to even. The result may lie outside `[0, extent)`.
#[inline]
pub fn voxel_coord(p: f32, extent: u32) -> i32 {
    let (lo, hi) = ORBIT_DOMAIN;
    map_range(p, lo, hi, 0.0, extent.saturating_sub(1) as f32).round_ties_even() as i32
}

/// A stream seeded with `seed` and jumped once per worker index.
pub fn worker_rng(seed: (u64, u64), worker_id: usize) -> VectorRng {
    let mut rng = VectorRng::new(seed.0, seed.1);
    // make sure different workers start out differently
    for _ in 0..worker_id {
        rng.jump();
    }
    rng
}

/// Plot the first `counts[lane]` orbit positions of every lane.
fn plot_orbits<const N: usize>(
    partition: &mut GridPartition<'_>,
    orbit: &OrbitBuffer<N>,
    counts: &[u32; LANES],
    summary: &mut AccumulationSummary,
) {
    let dims = partition.dims();
    let longest = counts.iter().copied().max().unwrap_or(0) as usize;

    for i in 0..longest {
        let [xs, ys, zs] = orbit.slot(i);
        for lane in 0..LANES {
            if i as u32 >= counts[lane] {
                continue;
            }
            let x = voxel_coord(xs[lane], dims.width);
            let y = voxel_coord(ys[lane], dims.height);
            let z = voxel_coord(zs[lane], dims.depth);
            if partition.plot(x, y, z) {
                summary.plotted += 1;
            } else {
                summary.dropped += 1;
            }
        }
    }
}

/// Accumulate `samples` sample points into `partition`.
///
/// The sample count is rounded up to whole batches of [`LANES`] points. The
/// result depends only on `seed`, `worker_id`, `samples` and the partition
/// dimensions.
pub fn generate_heatmap<P: ProgressSink + ?Sized>(
    partition: &mut GridPartition<'_>,
    samples: u64,
    worker_id: usize,
    seed: (u64, u64),
    progress: &P,
) -> AccumulationSummary {
    let mut rng = worker_rng(seed, worker_id);
    let batches = samples.div_ceil(LANES as u64);
    let mut orbit = OrbitBuffer::<MAX_ITERATIONS>::new();
    let mut summary = AccumulationSummary {
        batches,
        ..Default::default()
    };
    let mut reported = 0u64;

    log::debug!("Worker {}: {} batches", worker_id, batches);

    for batch_index in 0..batches {
        let batch = SampleBatch::draw(&mut rng);
        let counts = evaluate(&batch, &mut orbit);
        plot_orbits(partition, &orbit, &counts, &mut summary);

        if (batch_index + 1) % PROGRESS_INTERVAL == 0 {
            let done = ((batch_index + 1) * LANES as u64).min(samples);
            progress.advance(done - reported);
            reported = done;
        }
    }

    if samples > reported {
        progress.advance(samples - reported);
    }

    log::debug!(
        "Worker {} done: {} plotted, {} dropped, max {}",
        worker_id,
        summary.plotted,
        summary.dropped,
        partition.max_value()
    );

    summary
}
