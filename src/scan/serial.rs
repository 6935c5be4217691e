use super::scan_rows;
use crate::adjacency::AdjacencyAccumulator;
use crate::union_find::LabelLut;
use crate::{LabelImage, LabelStats};
use num_traits::Float;

/// Single threaded adjacency scan: the whole raster is one tile.
pub(crate) fn scan<T: Float>(
    image: &LabelImage,
    stats: &LabelStats<T>,
    lut: &LabelLut,
    threshold: usize,
) -> AdjacencyAccumulator {
    scan_rows(image, stats, lut, threshold, 0..image.height())
}
