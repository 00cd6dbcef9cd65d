//! Voxel hit-count storage.
//!
//! During accumulation every worker owns one [`GridPartition`] of a shared
//! [`HeatmapArena`]. The arena is a single contiguous block with the worker
//! grids laid out end-to-end, followed by one running maximum per worker.
//! Partitions are disjoint slices, so workers never touch each other's
//! memory and need no locking.

use crate::byte_volume::ByteVolume;
use crate::error::VolumeError;
use crate::grid_dims::GridDims;

/// A single dense grid of `u32` hit counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    dims: GridDims,
    cells: Vec<u32>,
}

impl VoxelGrid {
    /// All-zero grid.
    pub fn zeroed(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![0; dims.voxel_count()],
        }
    }

    /// Wrap existing counters, checking that the length matches `dims`.
    pub fn from_cells(dims: GridDims, cells: Vec<u32>) -> Result<Self, VolumeError> {
        if cells.len() != dims.voxel_count() {
            return Err(VolumeError::LengthMismatch {
                expected: dims.voxel_count(),
                actual: cells.len(),
            });
        }
        Ok(Self { dims, cells })
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn get(&self, x: u32, y: u32, z: u32) -> u32 {
        self.cells[self.dims.index(x, y, z)]
    }

    /// Smallest counter in the grid (zero for an empty grid).
    pub fn min_value(&self) -> u32 {
        self.cells.iter().copied().min().unwrap_or(0)
    }

    /// Convert every counter to one byte, keeping the layout.
    pub fn map_to_volume(&self, f: impl FnMut(u32) -> u8) -> ByteVolume {
        ByteVolume::from_parts(self.dims, self.cells.iter().copied().map(f).collect())
    }

    pub fn into_cells(self) -> Vec<u32> {
        self.cells
    }
}

/// Result of merging every worker partition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedHeatmap {
    pub grid: VoxelGrid,
    /// Largest per-worker maximum.
    pub max_value: u32,
}

/// Exclusive view of one worker's grid and running maximum.
#[derive(Debug)]
pub struct GridPartition<'a> {
    dims: GridDims,
    cells: &'a mut [u32],
    max_value: &'a mut u32,
}

impl<'a> GridPartition<'a> {
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn cells(&self) -> &[u32] {
        &*self.cells
    }

    pub fn max_value(&self) -> u32 {
        *self.max_value
    }

    pub fn cells_mut(&mut self) -> &mut [u32] {
        &mut *self.cells
    }

    /// Increment the voxel at `(x, y, z)` and track the running maximum.
    ///
    /// Coordinates outside the grid are dropped. Returns whether a counter
    /// was incremented.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, z: i32) -> bool {
        if !self.dims.contains(x, y, z) {
            return false;
        }

        let index = self.dims.index(x as u32, y as u32, z as u32);
        let cell = &mut self.cells[index];
        *cell = cell.wrapping_add(1);
        if *cell > *self.max_value {
            *self.max_value = *cell;
        }
        true
    }
}

/// Contiguous storage for all worker grids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeatmapArena {
    dims: GridDims,
    workers: usize,
    cells: Vec<u32>,
    max_values: Vec<u32>,
}

impl HeatmapArena {
    /// Allocate zeroed storage for `workers` grids (at least one).
    pub fn new(dims: GridDims, workers: usize) -> Self {
        let workers = workers.max(1);
        Self {
            dims,
            workers,
            cells: vec![0; dims.voxel_count() * workers],
            max_values: vec![0; workers],
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Borrow the partition owned by `worker`.
    ///
    /// # Panics
    /// Panics if `worker >= self.workers()`.
    pub fn partition_mut(&mut self, worker: usize) -> GridPartition<'_> {
        let voxels = self.dims.voxel_count();
        let start = worker * voxels;
        GridPartition {
            dims: self.dims,
            cells: &mut self.cells[start..start + voxels],
            max_value: &mut self.max_values[worker],
        }
    }

    /// Split the arena into one partition per worker, in worker order.
    pub fn partitions_mut(&mut self) -> Vec<GridPartition<'_>> {
        let dims = self.dims;
        let voxels = dims.voxel_count().max(1);
        self.cells
            .chunks_exact_mut(voxels)
            .zip(self.max_values.iter_mut())
            .map(|(cells, max_value)| GridPartition {
                dims,
                cells,
                max_value,
            })
            .collect()
    }

    /// Per-worker maxima, in worker order.
    pub fn max_values(&self) -> &[u32] {
        &self.max_values
    }

    /// Consume the arena, keeping only worker 0's grid.
    pub fn into_first_grid(self) -> VoxelGrid {
        let mut cells = self.cells;
        cells.truncate(self.dims.voxel_count());
        cells.shrink_to_fit();
        VoxelGrid {
            dims: self.dims,
            cells,
        }
    }

    /// Consume the arena, returning dimensions, all partition cells
    /// end-to-end and the per-worker maxima.
    pub fn into_raw_parts(self) -> (GridDims, Vec<u32>, Vec<u32>) {
        (self.dims, self.cells, self.max_values)
    }
}
