use mandelheat_compute::{
    combine_heatmaps, compute_volume, generate_heatmap, generate_heatmap_image, transform_heatmap,
    ByteVolume, FileCache, GridDims, HeatmapArena, HeatmapConfig, NoProgress, VolumeCache,
    VolumeSource,
};

fn config(dims: GridDims, total_samples: u64, workers: usize) -> HeatmapConfig {
    HeatmapConfig {
        dims,
        total_samples,
        workers: Some(workers),
        seed: (324, 4444),
    }
}

/// Run every worker on the calling thread, in the given order.
fn fill_sequentially(config: &HeatmapConfig, order: &[usize]) -> HeatmapArena {
    let workers = config.resolve_workers();
    let mut arena = HeatmapArena::new(config.dims, workers);
    for &worker in order {
        let samples = config.samples_for_worker(worker, workers);
        generate_heatmap(
            &mut arena.partition_mut(worker),
            samples,
            worker,
            config.seed,
            &NoProgress,
        );
    }
    arena
}

#[test]
fn compute_is_reproducible() {
    let config = config(GridDims::cube(32), 20_000, 3);

    let first = compute_volume(&config, &NoProgress).unwrap();
    let second = compute_volume(&config, &NoProgress).unwrap();

    assert_eq!(first, second);
}

#[test]
fn threaded_result_matches_sequential_run() {
    let config = config(GridDims::cube(24), 12_345, 4);

    let forward = fill_sequentially(&config, &[0, 1, 2, 3]);
    let backward = fill_sequentially(&config, &[3, 2, 1, 0]);
    assert_eq!(forward, backward);

    let expected = transform_heatmap(&combine_heatmaps(forward));
    let threaded = compute_volume(&config, &NoProgress).unwrap();
    assert_eq!(threaded, expected);
}

#[test]
fn workers_use_independent_streams() {
    let config = config(GridDims::cube(16), 8_000, 2);
    let (_, cells, _) = fill_sequentially(&config, &[0, 1]).into_raw_parts();

    let voxels = config.dims.voxel_count();
    let (first, second) = cells.split_at(voxels);
    assert_ne!(first, second);
    assert!(first.iter().any(|&c| c > 0));
    assert!(second.iter().any(|&c| c > 0));
}

#[test]
fn reduction_ignores_partition_order() {
    let config = config(GridDims::cube(16), 9_000, 3);
    let (dims, cells, max_values) = fill_sequentially(&config, &[0, 1, 2]).into_raw_parts();
    let voxels = dims.voxel_count();

    // Rebuild the arena with the partitions rotated
    let permutation = [2, 0, 1];
    let mut rotated = HeatmapArena::new(dims, 3);
    for (slot, mut partition) in rotated.partitions_mut().into_iter().enumerate() {
        let source = permutation[slot];
        let src = &cells[source * voxels..(source + 1) * voxels];
        partition.cells_mut().copy_from_slice(src);

        // Re-plot the hottest voxel so the partition tracks its maximum
        let hottest = src.iter().position(|&c| c == max_values[source]).unwrap();
        let x = hottest % dims.width as usize;
        let y = (hottest / dims.width as usize) % dims.height as usize;
        let z = hottest / (dims.width * dims.height) as usize;
        partition.cells_mut()[hottest] -= 1;
        assert!(partition.plot(x as i32, y as i32, z as i32));
        assert_eq!(partition.max_value(), max_values[source]);
    }

    let original = fill_sequentially(&config, &[0, 1, 2]);
    assert_eq!(combine_heatmaps(original), combine_heatmaps(rotated));
}

#[test]
fn tiny_grids_stay_in_bounds() {
    // Odd, tiny extents exercise rounding at every edge
    let dims = GridDims::new(3, 5, 2);
    let config = config(dims, 5_000, 2);

    let mut arena = HeatmapArena::new(dims, 1);
    let summary = generate_heatmap(&mut arena.partition_mut(0), 5_000, 0, config.seed, &NoProgress);
    // Counted orbit points are bounded, so they always land inside the grid
    assert!(summary.plotted > 0);
    assert_eq!(summary.dropped, 0);

    let volume = compute_volume(&config, &NoProgress).unwrap();
    assert_eq!(volume.as_bytes().len(), 30);
}

#[test]
fn file_cache_round_trip_through_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let cache = FileCache::new(dir.path().join("heatmap.bin"));
    let config = config(GridDims::cube(16), 4_000, 2);

    let computed = generate_heatmap_image(&config, Some(&cache), false, &NoProgress).unwrap();
    assert_eq!(computed.source, VolumeSource::Computed);
    assert!(cache.path().exists());

    let cached = generate_heatmap_image(&config, Some(&cache), false, &NoProgress).unwrap();
    assert_eq!(cached.source, VolumeSource::Cache);
    assert_eq!(cached.volume, computed.volume);

    let forced = generate_heatmap_image(&config, Some(&cache), true, &NoProgress).unwrap();
    assert_eq!(forced.source, VolumeSource::Computed);
    assert_eq!(forced.volume, computed.volume);
}

#[test]
fn truncated_cache_file_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heatmap.bin");
    std::fs::write(&path, [0u8; 100]).unwrap();
    let cache = FileCache::new(&path);
    let config = config(GridDims::cube(8), 2_000, 1);

    let result = generate_heatmap_image(&config, Some(&cache), false, &NoProgress).unwrap();

    assert_eq!(result.source, VolumeSource::Computed);
    let reloaded: ByteVolume = cache.load(config.dims).unwrap();
    assert_eq!(reloaded, result.volume);
}
