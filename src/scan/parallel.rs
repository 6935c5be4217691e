#![cfg(feature = "parallel")]
use super::scan_rows;
use crate::adjacency::AdjacencyAccumulator;
use crate::union_find::LabelLut;
use crate::{LabelImage, LabelStats};
use num_traits::Float;
use rayon::prelude::*;

/// Parallel adjacency scan: the raster is split into horizontal bands of
/// rows, one tile per band. Each band writes only to its own accumulator, so
/// the scan needs no synchronisation; the accumulators are absorbed into one
/// after all bands finish. Absorption is a set union per label, so the
/// result is independent of band completion order.
pub(crate) fn scan<T: Float + Send + Sync>(
    image: &LabelImage,
    stats: &LabelStats<T>,
    lut: &LabelLut,
    threshold: usize,
) -> AdjacencyAccumulator {
    let band_rows = (image.height() / rayon::current_num_threads()).max(1);
    (0..image.height())
        .step_by(band_rows)
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|band_start| {
            let band_end = (band_start + band_rows).min(image.height());
            scan_rows(image, stats, lut, threshold, band_start..band_end)
        })
        .reduce(AdjacencyAccumulator::new, AdjacencyAccumulator::absorb)
}
