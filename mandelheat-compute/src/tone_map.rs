//! Convert merged hit counts into 8-bit intensities.
//!
//! The curve is `log6(v - min) / max`, scaled to 255 and rounded. It is
//! tuned for the dynamic range of Monte Carlo hit counts and is not a
//! general histogram equalisation. Voxels equal to the minimum map to 0.
//! `libm` keeps the logarithm identical on every platform, so the cached
//! volume does not depend on the host's math library.

use mandelheat_core::{ByteVolume, MergedHeatmap};

/// Intensity of a single voxel.
#[inline]
pub fn tone_map_value(value: u32, min_value: u32, max_value: u32) -> u8 {
    let shifted = value.saturating_sub(min_value);
    if shifted == 0 || max_value == 0 {
        return 0;
    }

    let log6 = libm::logf(shifted as f32) / libm::logf(6.0);
    // `as` saturates, so anything outside [0, 255] is clamped
    (log6 / max_value as f32 * 255.0 + 0.5) as u8
}

/// Tone-map the whole merged grid.
pub fn transform_heatmap(heatmap: &MergedHeatmap) -> ByteVolume {
    let min_value = heatmap.grid.min_value();
    let max_value = heatmap.max_value;

    log::debug!("Tone mapping: min {}, max {}", min_value, max_value);

    heatmap
        .grid
        .map_to_volume(|v| tone_map_value(v, min_value, max_value))
}
