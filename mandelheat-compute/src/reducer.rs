//! Merge per-worker grids into a single heatmap.

use mandelheat_core::{HeatmapArena, MergedHeatmap};

/// Sum every worker partition into worker 0's grid and take the largest
/// per-worker maximum.
///
/// Counters add with `u32` wrap-around; the sample budget keeps real runs
/// below that limit. Sum and max are order-independent, so the result does
/// not depend on how work was assigned to workers.
pub fn combine_heatmaps(mut arena: HeatmapArena) -> MergedHeatmap {
    let max_value = arena.max_values().iter().copied().max().unwrap_or(0);

    {
        let mut partitions = arena.partitions_mut().into_iter();
        if let Some(mut merged) = partitions.next() {
            let dst = merged.cells_mut();
            for partition in partitions {
                for (d, &s) in dst.iter_mut().zip(partition.cells()) {
                    *d = d.wrapping_add(s);
                }
            }
        }
    }

    log::debug!(
        "Combined {} partitions, max value {}",
        arena.workers(),
        max_value
    );

    MergedHeatmap {
        grid: arena.into_first_grid(),
        max_value,
    }
}
