use crate::adjacency::AdjacencyAccumulator;
use crate::union_find::LabelLut;
use crate::{LabelImage, LabelStats};
use num_traits::Float;
use std::ops::Range;

#[cfg(feature = "parallel")]
pub(crate) mod parallel;
pub(crate) mod serial;

/// Scans a band of raster rows for the current size threshold. For every
/// pixel whose canonical label has a population of exactly `threshold`, the
/// canonical labels of its 4-connected neighbours are recorded in the band's
/// accumulator. Labels are compared after resolution through the union-find
/// snapshot, so regions merged in an earlier pass are treated as identical.
pub(crate) fn scan_rows<T: Float>(
    image: &LabelImage,
    stats: &LabelStats<T>,
    lut: &LabelLut,
    threshold: usize,
    rows: Range<usize>,
) -> AdjacencyAccumulator {
    let mut accumulator = AdjacencyAccumulator::new();
    for y in rows {
        for x in 0..image.width() {
            let current = lut.find(image.label_at(x, y));
            if stats.population_of(current) != threshold {
                continue;
            }
            for neighbour_label in image.neighbour_labels(x, y) {
                let neighbour = lut.find(neighbour_label);
                if neighbour != current {
                    accumulator.record(current, neighbour);
                }
            }
        }
    }
    accumulator
}
