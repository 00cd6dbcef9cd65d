// mandelheat-core/src/byte_volume.rs

use serde::{Deserialize, Serialize};

use crate::error::VolumeError;
use crate::grid_dims::GridDims;

/// Tone-mapped density volume, one `u8` intensity per voxel.
///
/// Layout matches the texture upload contract: a dense single-channel
/// array, z-major, then y, then x.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteVolume {
    dims: GridDims,
    bytes: Vec<u8>,
}

impl ByteVolume {
    /// Wrap raw bytes, checking the length against `dims`.
    pub fn from_bytes(dims: GridDims, bytes: Vec<u8>) -> Result<Self, VolumeError> {
        if bytes.len() != dims.voxel_count() {
            return Err(VolumeError::LengthMismatch {
                expected: dims.voxel_count(),
                actual: bytes.len(),
            });
        }
        Ok(Self { dims, bytes })
    }

    pub(crate) fn from_parts(dims: GridDims, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), dims.voxel_count());
        Self { dims, bytes }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn get(&self, x: u32, y: u32, z: u32) -> u8 {
        self.bytes[self.dims.index(x, y, z)]
    }

    /// Summary of the intensity distribution.
    pub fn stats(&self) -> VolumeStats {
        let mut nonzero_voxels = 0usize;
        let mut peak_intensity = 0u8;
        let mut sum = 0u64;

        for &b in &self.bytes {
            if b != 0 {
                nonzero_voxels += 1;
            }
            peak_intensity = peak_intensity.max(b);
            sum += b as u64;
        }

        let mean_intensity = if self.bytes.is_empty() {
            0.0
        } else {
            sum as f64 / self.bytes.len() as f64
        };

        VolumeStats {
            voxels: self.bytes.len(),
            nonzero_voxels,
            peak_intensity,
            mean_intensity,
        }
    }
}

/// Intensity summary of a [`ByteVolume`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolumeStats {
    pub voxels: usize,
    pub nonzero_voxels: usize,
    pub peak_intensity: u8,
    pub mean_intensity: f64,
}

impl VolumeStats {
    /// Fraction of voxels with non-zero intensity.
    pub fn occupancy(&self) -> f64 {
        if self.voxels == 0 {
            0.0
        } else {
            self.nonzero_voxels as f64 / self.voxels as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        let dims = GridDims::new(2, 2, 2);
        let err = ByteVolume::from_bytes(dims, vec![0; 9]).unwrap_err();
        assert_eq!(
            err,
            VolumeError::LengthMismatch {
                expected: 8,
                actual: 9
            }
        );
    }

    #[test]
    fn test_get_reads_row_major() {
        let dims = GridDims::new(2, 2, 2);
        let volume = ByteVolume::from_bytes(dims, (0..8).collect()).unwrap();

        assert_eq!(volume.get(0, 0, 0), 0);
        assert_eq!(volume.get(1, 0, 0), 1);
        assert_eq!(volume.get(0, 1, 0), 2);
        assert_eq!(volume.get(0, 0, 1), 4);
        assert_eq!(volume.get(1, 1, 1), 7);
    }

    #[test]
    fn test_stats() {
        let dims = GridDims::new(4, 1, 1);
        let volume = ByteVolume::from_bytes(dims, vec![0, 10, 0, 30]).unwrap();
        let stats = volume.stats();

        assert_eq!(stats.voxels, 4);
        assert_eq!(stats.nonzero_voxels, 2);
        assert_eq!(stats.peak_intensity, 30);
        assert!((stats.mean_intensity - 10.0).abs() < 1e-12);
        assert!((stats.occupancy() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_stats_of_empty_volume() {
        let volume = ByteVolume::from_bytes(GridDims::cube(0), Vec::new()).unwrap();
        let stats = volume.stats();
        assert_eq!(stats.voxels, 0);
        assert_eq!(stats.mean_intensity, 0.0);
        assert_eq!(stats.occupancy(), 0.0);
    }
}
