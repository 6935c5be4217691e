use crate::MergeError;

/// A rectangular raster of region labels, stored row-major. Labels are dense
/// non-negative integers indexing into the per-label statistics tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelImage {
    width: usize,
    height: usize,
    labels: Vec<usize>,
}

impl LabelImage {
    /// Creates a label image from a row-major buffer of labels.
    ///
    /// # Parameters
    /// * `width` - the number of columns in the raster.
    /// * `height` - the number of rows in the raster.
    /// * `labels` - the per-pixel labels, row-major, of length width * height.
    ///
    /// # Returns
    /// * A result containing the label image, or an error if the buffer
    ///   length does not match the stated dimensions.
    pub fn new(width: usize, height: usize, labels: Vec<usize>) -> Result<Self, MergeError> {
        if labels.len() != width * height {
            return Err(MergeError::DataSizeMismatch(format!(
                "{width}x{height} image needs {} labels, but {} were passed",
                width * height,
                labels.len()
            )));
        }
        Ok(LabelImage {
            width,
            height,
            labels,
        })
    }

    pub(crate) fn from_parts(width: usize, height: usize, labels: Vec<usize>) -> Self {
        debug_assert_eq!(labels.len(), width * height);
        LabelImage {
            width,
            height,
            labels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The per-pixel labels in row-major order.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub(crate) fn label_at(&self, x: usize, y: usize) -> usize {
        self.labels[y * self.width + x]
    }

    /// The labels of the 4-connected neighbours of (x, y). Pixels outside the
    /// raster are simply absent, so corner pixels yield two neighbours and
    /// interior pixels four.
    pub(crate) fn neighbour_labels(&self, x: usize, y: usize) -> impl Iterator<Item = usize> + '_ {
        let north = (y > 0).then(|| self.label_at(x, y - 1));
        let south = (y + 1 < self.height).then(|| self.label_at(x, y + 1));
        let west = (x > 0).then(|| self.label_at(x - 1, y));
        let east = (x + 1 < self.width).then(|| self.label_at(x + 1, y));
        [north, south, west, east].into_iter().flatten()
    }
}
