use crate::{LabelImage, MergeError};
use num_traits::Float;

/// Per-label region statistics: the population (pixel count) of each label
/// and the mean feature vector of its pixels. Labels index the tables
/// directly, so the tables cover the dense label range 0..n_labels.
///
/// A population of zero means the label has been fully absorbed into another
/// label; its mean is stale and is never read again by the merger.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStats<T> {
    population: Vec<usize>,
    means: Vec<Vec<T>>,
}

impl<T: Float> LabelStats<T> {
    /// Creates a statistics table from precomputed per-label populations and
    /// mean feature vectors, as reported by an upstream segmentation.
    ///
    /// # Parameters
    /// * `population` - pixel count per label, indexed by label.
    /// * `means` - mean feature vector per label, indexed by label. All means
    ///             must have the same length.
    ///
    /// # Returns
    /// * A result containing the statistics table, or an error if the two
    ///   tables differ in length.
    pub fn new(population: Vec<usize>, means: Vec<Vec<T>>) -> Result<Self, MergeError> {
        if population.len() != means.len() {
            return Err(MergeError::DataSizeMismatch(format!(
                "{} populations were passed, but {} means",
                population.len(),
                means.len()
            )));
        }
        Ok(LabelStats { population, means })
    }

    /// Seeds a statistics table from a per-pixel feature raster, computing
    /// each label's population and mean feature vector in one pass. The
    /// feature buffer is row-major and parallel to the label image.
    ///
    /// # Parameters
    /// * `image` - the label image to seed from.
    /// * `features` - one feature vector per pixel, row-major. The vectors
    ///                must all be of the same dimensionality.
    ///
    /// # Returns
    /// * A result containing the seeded statistics table. An error will be
    ///   returned if the image is empty, if the feature buffer length does
    ///   not match the pixel count, or if the feature vectors have
    ///   mismatched dimensions.
    pub fn from_pixel_features(
        image: &LabelImage,
        features: &[Vec<T>],
    ) -> Result<Self, MergeError> {
        if image.is_empty() {
            return Err(MergeError::EmptyImage);
        }
        if features.len() != image.labels().len() {
            return Err(MergeError::DataSizeMismatch(format!(
                "image has {} pixels, but {} feature vectors were passed",
                image.labels().len(),
                features.len()
            )));
        }
        let dims_0th = features[0].len();
        for (n, feature) in features.iter().enumerate() {
            let dims_nth = feature.len();
            if dims_nth != dims_0th {
                return Err(MergeError::WrongDimension(format!(
                    "0th feature vector has {dims_0th} dimensions, but {n}th has {dims_nth}"
                )));
            }
        }

        let n_labels = image.labels().iter().max().map(|max| max + 1).unwrap_or(0);
        let mut population = vec![0usize; n_labels];
        let mut sums = vec![vec![T::zero(); dims_0th]; n_labels];
        for (&label, feature) in image.labels().iter().zip(features.iter()) {
            population[label] += 1;
            for (sum, &element) in sums[label].iter_mut().zip(feature.iter()) {
                *sum = *sum + element;
            }
        }
        for (label, sum) in sums.iter_mut().enumerate() {
            if population[label] == 0 {
                continue;
            }
            let count = T::from(population[label]).unwrap();
            for element in sum.iter_mut() {
                *element = *element / count;
            }
        }
        Ok(LabelStats {
            population,
            means: sums,
        })
    }

    /// The number of labels covered by the table, including absorbed labels
    /// whose population has dropped to zero.
    pub fn n_labels(&self) -> usize {
        self.population.len()
    }

    /// The population of a label.
    ///
    /// # Returns
    /// * A result containing the label's pixel count, or an error if the
    ///   label was never registered in the table.
    pub fn population(&self, label: usize) -> Result<usize, MergeError> {
        self.population
            .get(label)
            .copied()
            .ok_or_else(|| Self::unknown_label(label, self.population.len()))
    }

    /// The mean feature vector of a label.
    ///
    /// # Returns
    /// * A result containing the label's mean, or an error if the label was
    ///   never registered in the table.
    pub fn mean(&self, label: usize) -> Result<&[T], MergeError> {
        self.means
            .get(label)
            .map(|mean| mean.as_slice())
            .ok_or_else(|| Self::unknown_label(label, self.means.len()))
    }

    /// The summed population of all labels. Invariant under merging.
    pub fn total_population(&self) -> usize {
        self.population.iter().sum()
    }

    /// The number of labels that still own pixels.
    pub fn region_count(&self) -> usize {
        self.population.iter().filter(|&&pop| pop > 0).count()
    }

    pub(crate) fn population_of(&self, label: usize) -> usize {
        self.population[label]
    }

    pub(crate) fn mean_of(&self, label: usize) -> &[T] {
        &self.means[label]
    }

    /// Folds the statistics of `from` into `into` as a population-weighted
    /// mean, then zeroes `from`. A label whose population is already zero has
    /// nothing left to fold, so the call is a no-op.
    pub(crate) fn merge(&mut self, into: usize, from: usize) -> Result<(), MergeError> {
        let pop_from = self.population[from];
        if pop_from == 0 {
            return Ok(());
        }
        let dims_into = self.means[into].len();
        let dims_from = self.means[from].len();
        if dims_into != dims_from {
            return Err(MergeError::WrongDimension(format!(
                "label {into} has a {dims_into} dimensional mean, \
                but label {from} has {dims_from}"
            )));
        }
        let pop_into = self.population[into];
        let weight_into = T::from(pop_into).unwrap();
        let weight_from = T::from(pop_from).unwrap();
        let weight_total = T::from(pop_into + pop_from).unwrap();
        for i in 0..dims_into {
            self.means[into][i] = (self.means[into][i] * weight_into
                + self.means[from][i] * weight_from)
                / weight_total;
        }
        self.population[into] = pop_into + pop_from;
        self.population[from] = 0;
        Ok(())
    }

    fn unknown_label(label: usize, n_labels: usize) -> MergeError {
        MergeError::UnknownLabel(format!(
            "label {label} is outside the table of {n_labels} seeded labels"
        ))
    }
}
