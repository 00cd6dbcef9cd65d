use crate::rng::VectorRng;
use mandelheat_core::{BAILOUT_NORM, LANES, MAX_ITERATIONS, SAMPLE_DOMAIN};

/// One `f32` per lane.
pub type Lanes = [f32; LANES];

/// Per-lane escape counts. Zero means the lane contributes nothing.
pub type EscapeCounts = [u32; LANES];

/// A batch of candidate points `c`, one per lane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleBatch {
    pub cx: Lanes,
    pub cy: Lanes,
    pub cz: Lanes,
}

impl SampleBatch {
    /// Draw `cx`, `cy` and `cz` (in that order) uniformly from the sample domain.
    pub fn draw(rng: &mut VectorRng) -> Self {
        let (lo, hi) = SAMPLE_DOMAIN;
        let cx = rng.next_in_range(lo, hi);
        let cy = rng.next_in_range(lo, hi);
        let cz = rng.next_in_range(lo, hi);
        Self { cx, cy, cz }
    }

    /// Same point in every lane.
    pub fn splat(x: f32, y: f32, z: f32) -> Self {
        Self {
            cx: [x; LANES],
            cy: [y; LANES],
            cz: [z; LANES],
        }
    }
}

/// Orbit positions for every lane, one slot per iteration.
///
/// Slots past a lane's escape count hold whatever the map produced after
/// escape (or stale data after an early exit) and must not be read.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitBuffer<const N: usize = MAX_ITERATIONS> {
    slots: [[Lanes; 3]; N],
}

impl<const N: usize> OrbitBuffer<N> {
    pub fn new() -> Self {
        Self {
            slots: [[[0.0; LANES]; 3]; N],
        }
    }

    /// Iteration budget this buffer supports.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// `[x, y, z]` lane arrays recorded at `iteration`.
    #[inline]
    pub fn slot(&self, iteration: usize) -> &[Lanes; 3] {
        &self.slots[iteration]
    }

    /// Position of one lane at `iteration`.
    pub fn position(&self, iteration: usize, lane: usize) -> [f32; 3] {
        let [x, y, z] = &self.slots[iteration];
        [x[lane], y[lane], z[lane]]
    }

    /// Overwrite one lane's position at `iteration`.
    pub fn set_position(&mut self, iteration: usize, lane: usize, position: [f32; 3]) {
        let slot = &mut self.slots[iteration];
        for (axis, value) in slot.iter_mut().zip(position) {
            axis[lane] = value;
        }
    }
}

impl<const N: usize> Default for OrbitBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Degree-8 triplex power of `(x, y, z)`.
///
/// Closed form from https://iquilezles.org/articles/mandelbulb/
/// The magnitude of the result is `|p|^8`.
#[inline(always)]
pub fn triplex_pow8(x: f32, y: f32, z: f32) -> [f32; 3] {
    let x2 = x * x;
    let x4 = x2 * x2;
    let y2 = y * y;
    let y4 = y2 * y2;
    let z2 = z * z;
    let z4 = z2 * z2;

    let k3 = x2 + z2;
    let k3_cubed = k3 * k3 * k3;
    let k2 = 1.0 / (k3_cubed * k3_cubed * k3).sqrt();
    let k1 = x4 + y4 + z4 - 6.0 * y2 * z2 - 6.0 * x2 * y2 + 2.0 * z2 * x2;
    let k4 = x2 - y2 + z2;

    let nx = 64.0 * x * y * z * (x2 - z2) * k4 * (x4 - 6.0 * x2 * z2 + z4) * (k1 * k2);
    let ny = -16.0 * y2 * (k3 * k4) * k4 + k1 * k1;
    let nz = -8.0
        * y
        * k4
        * (x4 * x4 - 28.0 * x4 * x2 * z2 + 70.0 * x4 * z4 - 28.0 * x2 * z2 * z4 + z4 * z4)
        * (k1 * k2);

    [nx, ny, nz]
}

/// Iterate `z <- z^8 + c` from `z = c` for every lane of `batch`.
///
/// Every iteration's positions are written to `orbit` for all lanes. A lane
/// stops counting once its squared norm reaches [`BAILOUT_NORM`] (NaN counts
/// as escaped); when no lane is still bounded the loop exits early. Lanes
/// that stay bounded for the whole budget `N` return 0.
pub fn evaluate<const N: usize>(batch: &SampleBatch, orbit: &mut OrbitBuffer<N>) -> EscapeCounts {
    let mut zx = batch.cx;
    let mut zy = batch.cy;
    let mut zz = batch.cz;
    let mut iterations = [0u32; LANES];
    let mut bounded = [true; LANES];

    for slot in orbit.slots.iter_mut() {
        for lane in 0..LANES {
            let [x, y, z] = triplex_pow8(zx[lane], zy[lane], zz[lane]);
            zx[lane] = x + batch.cx[lane];
            zy[lane] = y + batch.cy[lane];
            zz[lane] = z + batch.cz[lane];
        }

        *slot = [zx, zy, zz];

        let mut any_bounded = false;
        for lane in 0..LANES {
            let norm = zx[lane] * zx[lane] + zy[lane] * zy[lane] + zz[lane] * zz[lane];
            bounded[lane] &= norm < BAILOUT_NORM;
            iterations[lane] += bounded[lane] as u32;
            any_bounded |= bounded[lane];
        }

        if !any_bounded {
            break;
        }
    }

    // Points that never escaped are inside the set and are not plotted
    iterations.map(|n| if n as usize == N { 0 } else { n })
}
