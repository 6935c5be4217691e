use crate::adjacency::AdjacencyAccumulator;
#[cfg(feature = "parallel")]
use crate::scan::parallel;
#[cfg(feature = "serial")]
use crate::scan::serial;
use crate::union_find::LabelLut;
use crate::validation::SeedValidator;
use crate::{LabelImage, LabelStats, MergeError, MergeParams};
use num_traits::Float;
use std::collections::BTreeSet;

/// The small-region merging algorithm in Rust. Generic over floating point
/// numeric types.
///
/// Cleans up an over-segmented label image by repeatedly absorbing regions
/// below a size threshold into their closest 4-connected neighbour, where
/// closeness is the distance between the regions' mean feature vectors. One
/// full-image pass is run per size threshold from 1 up to (but excluding)
/// the configured minimum region size, so regions grow monotonically and
/// every region of the output reaches the minimum size unless it has no
/// neighbours at all.
#[derive(Debug, Clone, PartialEq)]
pub struct SmallRegionMerger<'a, T> {
    image: &'a LabelImage,
    stats: LabelStats<T>,
    params: MergeParams,
}

/// The outcome of a merge run: the relabelled image, in which every pixel
/// carries the canonical label of its merged region, and the final
/// statistics of those regions for downstream reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRegions<T> {
    labels: LabelImage,
    stats: LabelStats<T>,
}

impl<T> MergedRegions<T> {
    /// The relabelled image. Identical in dimensions to the input; every
    /// pixel's label is the canonical label of the region that absorbed it.
    pub fn labels(&self) -> &LabelImage {
        &self.labels
    }

    /// Final per-label statistics. Absorbed labels remain in the table with
    /// a population of zero.
    pub fn stats(&self) -> &LabelStats<T> {
        &self.stats
    }

    pub fn into_parts(self) -> (LabelImage, LabelStats<T>) {
        (self.labels, self.stats)
    }
}

impl<'a, T: Float> SmallRegionMerger<'a, T> {
    /// Creates an instance of the small-region merger using a custom
    /// parameter configuration.
    ///
    /// # Parameters
    /// * `image` - a reference to the label image to clean up.
    /// * `stats` - the seeded per-label statistics (population and mean
    ///             feature vector per label), as produced by the upstream
    ///             segmentation or by `LabelStats::from_pixel_features`.
    /// * `params` - the merge parameter configuration.
    ///
    /// # Returns
    /// * The small-region merger instance.
    ///
    /// # Examples
    /// ```
    ///use region_merging::{
    ///    DistanceMetric, LabelImage, LabelStats, MergeParams, SmallRegionMerger,
    ///};
    ///
    ///let image = LabelImage::new(2, 2, vec![0, 0, 0, 1]).unwrap();
    ///let stats = LabelStats::new(vec![3, 1], vec![vec![1.0], vec![5.0]]).unwrap();
    ///let params = MergeParams::builder()
    ///    .min_size(2)
    ///    .dist_metric(DistanceMetric::Manhattan)
    ///    .build();
    ///let merger = SmallRegionMerger::new(&image, stats, params);
    /// ```
    pub fn new(image: &'a LabelImage, stats: LabelStats<T>, params: MergeParams) -> Self {
        SmallRegionMerger {
            image,
            stats,
            params,
        }
    }

    /// Creates an instance of the small-region merger using the default
    /// parameters.
    ///
    /// # Parameters
    /// * `image` - a reference to the label image to clean up.
    /// * `stats` - the seeded per-label statistics.
    ///
    /// # Returns
    /// * The small-region merger instance.
    pub fn default_params(image: &'a LabelImage, stats: LabelStats<T>) -> Self {
        SmallRegionMerger::new(image, stats, MergeParams::default())
    }

    /// Merges the small regions of the label image passed to the
    /// constructor, scanning the raster single threaded.
    ///
    /// # Returns
    /// * A result that, if successful, contains the relabelled image and the
    ///   final region statistics. An error will be returned if the image is
    ///   empty, if a pixel carries a label that was never seeded, or if the
    ///   seeded mean vectors have mismatched dimensions.
    ///
    /// # Examples
    /// ```
    ///use region_merging::{LabelImage, LabelStats, MergeParams, SmallRegionMerger};
    ///
    ///let image = LabelImage::new(2, 2, vec![0, 0, 0, 1]).unwrap();
    ///let stats = LabelStats::new(vec![3, 1], vec![vec![1.0], vec![5.0]]).unwrap();
    ///let params = MergeParams::builder().min_size(2).build();
    ///let merger = SmallRegionMerger::new(&image, stats, params);
    ///let merged = merger.merge().unwrap();
    ///assert_eq!(&[0, 0, 0, 0], merged.labels().labels());
    ///assert_eq!(4, merged.stats().population(0).unwrap());
    /// ```
    #[cfg(feature = "serial")]
    pub fn merge(&self) -> Result<MergedRegions<T>, MergeError> {
        SeedValidator::new(self.image, &self.stats).validate_seed()?;
        self.run(serial::scan)
    }

    fn run(
        &self,
        scan: impl Fn(&LabelImage, &LabelStats<T>, &LabelLut, usize) -> AdjacencyAccumulator,
    ) -> Result<MergedRegions<T>, MergeError> {
        let mut stats = self.stats.clone();
        let mut lut = LabelLut::new(stats.n_labels());

        for threshold in 1..self.params.min_size {
            let adjacency = scan(self.image, &stats, &lut, threshold);
            self.reduce(&adjacency, &stats, &mut lut);
            lut.flatten();
            // Ascending order plus the smaller-root union policy folds every
            // label's mass into its root exactly once, even through
            // multi-hop chains.
            for label in 0..lut.len() {
                let canonical = lut.find(label);
                if canonical != label {
                    stats.merge(canonical, label)?;
                }
            }
        }

        let labels = self
            .image
            .labels()
            .iter()
            .map(|&label| lut.find(label))
            .collect();
        Ok(MergedRegions {
            labels: LabelImage::from_parts(self.image.width(), self.image.height(), labels),
            stats,
        })
    }

    /// Resolves every small label recorded during the scan to its closest
    /// neighbour and merges the two in the union-find table. Small labels
    /// with an empty neighbour set are skipped; they may merge in a later
    /// pass, or never, if truly isolated.
    fn reduce(&self, adjacency: &AdjacencyAccumulator, stats: &LabelStats<T>, lut: &mut LabelLut) {
        for (label, neighbours) in adjacency.iter() {
            if let Some(closest) = self.closest_neighbour(label, neighbours, stats) {
                lut.union(label, closest);
            }
        }
    }

    /// The neighbour whose mean feature vector is closest to the small
    /// label's own. Neighbour sets iterate in ascending label order and only
    /// a strictly smaller distance displaces the current winner, so ties
    /// always resolve to the smallest label.
    fn closest_neighbour(
        &self,
        label: usize,
        neighbours: &BTreeSet<usize>,
        stats: &LabelStats<T>,
    ) -> Option<usize> {
        let mean = stats.mean_of(label);
        let mut closest: Option<(T, usize)> = None;
        for &neighbour in neighbours {
            let distance = self
                .params
                .dist_metric
                .calc_dist(mean, stats.mean_of(neighbour));
            match closest {
                Some((proximity, _)) if distance >= proximity => {}
                _ => closest = Some((distance, neighbour)),
            }
        }
        closest.map(|(_, neighbour)| neighbour)
    }
}

#[cfg(feature = "parallel")]
impl<'a, T: Float + Send + Sync> SmallRegionMerger<'a, T> {
    /// Merges the small regions of the label image passed to the
    /// constructor, scanning the raster in parallel with one tile of rows
    /// per thread. The reduction and relabelling phases are single threaded
    /// either way, and the output is identical to `merge`.
    ///
    /// # Returns
    /// * A result that, if successful, contains the relabelled image and the
    ///   final region statistics. An error will be returned if the image is
    ///   empty, if a pixel carries a label that was never seeded, or if the
    ///   seeded mean vectors have mismatched dimensions.
    pub fn merge_par(&self) -> Result<MergedRegions<T>, MergeError> {
        SeedValidator::new(self.image, &self.stats).validate_seed()?;
        self.run(parallel::scan)
    }
}
