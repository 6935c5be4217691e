use crate::distance::DistanceMetric;

// Defaults for parameters
const MIN_SIZE_DEFAULT: usize = 50;
const DISTANCE_METRIC_DEFAULT: DistanceMetric = DistanceMetric::Euclidean;

// Valid minimums/left bounds of parameters
const MIN_SIZE_MINIMUM: usize = 1;

/// A wrapper around the parameters used in small-region merging.
/// Only use if you want to tune parameters. Otherwise use
/// `SmallRegionMerger::default_params()` to instantiate the merger with
/// default parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeParams {
    pub(crate) min_size: usize,
    pub(crate) dist_metric: DistanceMetric,
}

/// Builder object to set custom merge parameters.
pub struct MergeParamsBuilder {
    min_size: Option<usize>,
    dist_metric: Option<DistanceMetric>,
}

impl MergeParams {
    pub(crate) fn default() -> Self {
        Self::builder().build()
    }

    /// Enters the builder pattern, allowing custom parameters to be set using
    /// various setter methods.
    ///
    /// # Returns
    /// * the merge parameter configuration builder
    pub fn builder() -> MergeParamsBuilder {
        MergeParamsBuilder {
            min_size: None,
            dist_metric: None,
        }
    }
}

impl MergeParamsBuilder {
    /// Sets the minimum region size - the population every region of the
    /// output labelling should reach. The merger runs one pass per size
    /// threshold from 1 up to (but excluding) this value, so a min_size of 1
    /// performs no merging at all. This should be considered the main
    /// parameter for changing the results of merging.
    /// Defaults to 50.
    ///
    /// # Parameters
    /// * min_size - the target minimum region population
    ///
    /// # Returns
    /// * the merge parameter configuration builder
    pub fn min_size(mut self, min_size: usize) -> MergeParamsBuilder {
        let valid_min_size =
            MergeParamsBuilder::validate_input_left_bound(min_size, MIN_SIZE_MINIMUM, "min_size");
        self.min_size = Some(valid_min_size);
        self
    }

    /// Sets the distance metric. The merger uses this metric to compare the
    /// mean feature vectors of a small region and its neighbours when
    /// selecting the closest one. Defaults to Euclidean. Options are defined
    /// by the DistanceMetric enum.
    ///
    /// # Parameters
    /// * dist_metric - the distance metric
    ///
    /// # Returns
    /// * the merge parameter configuration builder
    pub fn dist_metric(mut self, dist_metric: DistanceMetric) -> MergeParamsBuilder {
        self.dist_metric = Some(dist_metric);
        self
    }

    /// Finishes the building of the merge parameter configuration. A call to
    /// this method is required to exit the builder pattern and complete the
    /// construction of the parameters.
    ///
    /// # Returns
    /// * The completed merge parameter configuration.
    pub fn build(self) -> MergeParams {
        MergeParams {
            min_size: self.min_size.unwrap_or(MIN_SIZE_DEFAULT),
            dist_metric: self.dist_metric.unwrap_or(DISTANCE_METRIC_DEFAULT),
        }
    }

    fn validate_input_left_bound(input_param: usize, left_bound: usize, param: &str) -> usize {
        if input_param < left_bound {
            println!(
                "REGION_MERGING_WARNING: {param} ({input_param}) cannot be lower \
                than {left_bound}. Set to {left_bound}."
            );
            left_bound
        } else {
            input_param
        }
    }
}
