use crate::{LabelImage, LabelStats, MergeError};
use num_traits::Float;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SeedValidator<'a, T> {
    image: &'a LabelImage,
    stats: &'a LabelStats<T>,
}

impl<'a, T: Float> SeedValidator<'a, T> {
    pub(crate) fn new(image: &'a LabelImage, stats: &'a LabelStats<T>) -> Self {
        Self { image, stats }
    }

    pub(crate) fn validate_seed(&self) -> Result<(), MergeError> {
        if self.image.is_empty() {
            return Err(MergeError::EmptyImage);
        }
        for (n, &label) in self.image.labels().iter().enumerate() {
            if label >= self.stats.n_labels() {
                return Err(MergeError::UnknownLabel(format!(
                    "pixel {n} carries label {label}, but only {} labels were seeded",
                    self.stats.n_labels()
                )));
            }
        }
        self.validate_mean_dimensions()
    }

    fn validate_mean_dimensions(&self) -> Result<(), MergeError> {
        if self.stats.n_labels() == 0 {
            return Ok(());
        }
        let dims_0th = self.stats.mean_of(0).len();
        for label in 1..self.stats.n_labels() {
            let dims_nth = self.stats.mean_of(label).len();
            if dims_nth != dims_0th {
                return Err(MergeError::WrongDimension(format!(
                    "label 0 was seeded with {dims_0th} dimensions, but label {label} \
                    with {dims_nth}"
                )));
            }
        }
        Ok(())
    }
}
