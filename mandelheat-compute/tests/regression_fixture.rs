//! First batch of worker 0 under the default seed, pinned to known values.
//!
//! Any change to the generator, the sample mapping, the power-8 map or the
//! voxel rounding shows up here.

use mandelheat_compute::accumulator::voxel_coord;
use mandelheat_compute::{
    evaluate, generate_heatmap, worker_rng, GridDims, HeatmapArena, NoProgress, OrbitBuffer,
    SampleBatch, DEFAULT_SEED, MAX_ITERATIONS,
};

const EXPECTED_COUNTS: [u32; 8] = [0, 0, 1, 1, 1, 4, 0, 0];

/// (lane, iteration, voxel on a 512 grid)
const EXPECTED_VOXELS_512: [(usize, usize, [i32; 3]); 7] = [
    (2, 0, [280, 128, 332]),
    (3, 0, [118, 367, 321]),
    (4, 0, [265, 102, 144]),
    (5, 0, [294, 339, 314]),
    (5, 1, [308, 361, 306]),
    (5, 2, [271, 349, 176]),
    (5, 3, [339, 417, 305]),
];

const EXPECTED_VOXELS_32: [[u32; 3]; 7] = [
    [17, 8, 20],
    [7, 22, 19],
    [16, 6, 9],
    [18, 21, 19],
    [19, 22, 19],
    [16, 21, 11],
    [21, 25, 19],
];

fn first_batch() -> SampleBatch {
    let mut rng = worker_rng(DEFAULT_SEED, 0);
    SampleBatch::draw(&mut rng)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "got {}, expected {}",
        actual,
        expected
    );
}

#[test]
fn first_batch_sample_points() {
    let batch = first_batch();

    assert_close(batch.cx[0], 0.265_633_7);
    assert_close(batch.cy[0], 0.336_493_85);
    assert_close(batch.cz[0], 0.339_340_7);
    assert_close(batch.cx[5], 0.223_492_15);
    assert_close(batch.cy[5], 0.607_554_7);
    assert_close(batch.cz[5], 0.398_308_28);
    // Stream 0 starts from small keys, so its first high half is near zero
    assert_eq!(batch.cx[1], -1.0);
    assert_eq!(batch.cy[1], -1.0);
}

#[test]
fn first_batch_escape_counts() {
    let batch = first_batch();
    let mut orbit = OrbitBuffer::<MAX_ITERATIONS>::new();

    assert_eq!(evaluate(&batch, &mut orbit), EXPECTED_COUNTS);
}

#[test]
fn first_batch_orbit_voxels() {
    let batch = first_batch();
    let mut orbit = OrbitBuffer::<MAX_ITERATIONS>::new();
    evaluate(&batch, &mut orbit);

    for (lane, iteration, expected) in EXPECTED_VOXELS_512 {
        let p = orbit.position(iteration, lane);
        let voxel = p.map(|v| voxel_coord(v, 512));
        assert_eq!(voxel, expected, "lane {} iteration {}", lane, iteration);
    }

    let p = orbit.position(0, 5);
    assert_close(p[0], 0.305_240_5);
    assert_close(p[1], 0.655_460_2);
    assert_close(p[2], 0.456_887_25);
}

#[test]
fn first_batch_accumulates_into_grid() {
    let dims = GridDims::cube(32);
    let mut arena = HeatmapArena::new(dims, 1);
    let mut partition = arena.partition_mut(0);

    let summary = generate_heatmap(&mut partition, 8, 0, DEFAULT_SEED, &NoProgress);

    assert_eq!(summary.batches, 1);
    assert_eq!(summary.plotted, 7);
    assert_eq!(summary.dropped, 0);
    assert_eq!(partition.max_value(), 1);
    for [x, y, z] in EXPECTED_VOXELS_32 {
        assert_eq!(partition.cells()[dims.index(x, y, z)], 1, "({}, {}, {})", x, y, z);
    }
}
