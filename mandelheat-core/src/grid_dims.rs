use serde::{Deserialize, Serialize};

use crate::constants::{IMAGE_DEPTH, IMAGE_HEIGHT, IMAGE_WIDTH};

/// Dimensions of a voxel volume.
///
/// Voxels are stored z-major, then y, then x.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl GridDims {
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Cube with the same extent on every axis.
    pub const fn cube(extent: u32) -> Self {
        Self::new(extent, extent, extent)
    }

    /// Total number of voxels.
    pub fn voxel_count(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// Check if a signed voxel coordinate lies inside the volume.
    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as u32) < self.width
            && (y as u32) < self.height
            && (z as u32) < self.depth
    }

    /// Linear index of an in-bounds voxel.
    #[inline]
    pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
        debug_assert!(x < self.width && y < self.height && z < self.depth);
        (z as usize * self.height as usize + y as usize) * self.width as usize + x as usize
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::new(IMAGE_WIDTH, IMAGE_HEIGHT, IMAGE_DEPTH)
    }
}
