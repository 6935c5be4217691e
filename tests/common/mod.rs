use region_merging::{
    DistanceMetric, LabelImage, LabelStats, MergeError, MergeParams, MergedRegions,
    SmallRegionMerger,
};

pub type MergeFn = fn(&SmallRegionMerger<f64>) -> Result<MergedRegions<f64>, MergeError>;

pub fn test_center_pixel_absorbed(merge_fn: MergeFn) {
    let (image, stats) = ring_scenario();
    let params = MergeParams::builder().min_size(2).build();
    let merger = SmallRegionMerger::new(&image, stats, params);
    let merged = merge_fn(&merger).unwrap();

    // The stray centre pixel is absorbed by the surrounding background
    assert!(merged.labels().labels().iter().all(|&label| label == 0));
    assert_eq!(25, merged.stats().population(0).unwrap());
    assert_eq!(0, merged.stats().population(7).unwrap());
    // Population weighted mean: (10 * 24 + 200 * 1) / 25
    assert!((merged.stats().mean(0).unwrap()[0] - 17.6).abs() < 1e-10);
}

pub fn test_mutual_pair_merges_into_smaller(merge_fn: MergeFn) {
    let image = LabelImage::new(2, 1, vec![1, 2]).unwrap();
    let stats = LabelStats::new(
        vec![0, 1, 1],
        vec![vec![0.0], vec![4.0], vec![4.0]],
    )
    .unwrap();
    let params = MergeParams::builder().min_size(2).build();
    let merger = SmallRegionMerger::new(&image, stats, params);
    let merged = merge_fn(&merger).unwrap();

    // Each region is the other's only neighbour; the smaller label survives
    assert_eq!(&[1, 1], merged.labels().labels());
    assert_eq!(2, merged.stats().population(1).unwrap());
    assert_eq!(0, merged.stats().population(2).unwrap());
    assert_eq!(1, merged.stats().region_count());
}

pub fn test_deterministic_tie_break(merge_fn: MergeFn) {
    // The centre region is equidistant from both neighbours
    let image = LabelImage::new(3, 1, vec![3, 5, 4]).unwrap();
    let mut population = vec![0; 6];
    population[3] = 5;
    population[4] = 5;
    population[5] = 1;
    let mut means = vec![vec![0.0]; 6];
    means[3] = vec![2.0];
    means[4] = vec![2.0];
    means[5] = vec![0.0];
    let stats = LabelStats::new(population, means).unwrap();
    let params = MergeParams::builder().min_size(2).build();
    let merger = SmallRegionMerger::new(&image, stats, params);
    let merged = merge_fn(&merger).unwrap();

    // Ties resolve to the smaller label, reproducibly
    assert_eq!(&[3, 3, 4], merged.labels().labels());
    assert_eq!(6, merged.stats().population(3).unwrap());
    assert_eq!(5, merged.stats().population(4).unwrap());
}

pub fn test_manhattan_metric(merge_fn: MergeFn) {
    // Euclidean and Manhattan distances disagree on the closest neighbour:
    // squared Euclidean favours label 4 (8 vs 9), Manhattan label 3 (3 vs 4)
    let image = LabelImage::new(3, 1, vec![3, 5, 4]).unwrap();
    let mut population = vec![0; 6];
    population[3] = 5;
    population[4] = 5;
    population[5] = 1;
    let mut means = vec![vec![0.0, 0.0]; 6];
    means[3] = vec![3.0, 0.0];
    means[4] = vec![2.0, 2.0];
    means[5] = vec![0.0, 0.0];
    let stats = LabelStats::new(population, means).unwrap();
    let params = MergeParams::builder()
        .min_size(2)
        .dist_metric(DistanceMetric::Manhattan)
        .build();
    let merger = SmallRegionMerger::new(&image, stats, params);
    let merged = merge_fn(&merger).unwrap();

    assert_eq!(&[3, 3, 4], merged.labels().labels());
    assert_eq!(6, merged.stats().population(3).unwrap());
}

pub fn test_isolated_region_unmerged(merge_fn: MergeFn) {
    // A single pixel raster has no 4-connected neighbours at all
    let image = LabelImage::new(1, 1, vec![0]).unwrap();
    let stats = LabelStats::new(vec![1], vec![vec![5.0]]).unwrap();
    let params = MergeParams::builder().min_size(4).build();
    let merger = SmallRegionMerger::new(&image, stats, params);
    let merged = merge_fn(&merger).unwrap();

    assert_eq!(&[0], merged.labels().labels());
    assert_eq!(1, merged.stats().population(0).unwrap());
}

pub fn test_conservation_of_mass(merge_fn: MergeFn) {
    let image = LabelImage::new(
        4,
        4,
        vec![
            0, 0, 1, 1, //
            0, 0, 1, 1, //
            2, 3, 3, 3, //
            2, 3, 3, 3,
        ],
    )
    .unwrap();
    let stats = LabelStats::new(
        vec![4, 4, 2, 6],
        vec![vec![0.0], vec![10.0], vec![2.0], vec![9.0]],
    )
    .unwrap();
    let total_before = stats.total_population();
    let params = MergeParams::builder().min_size(4).build();
    let merger = SmallRegionMerger::new(&image, stats, params);
    let merged = merge_fn(&merger).unwrap();

    assert_eq!(total_before, merged.stats().total_population());
    // Label 2 is radiometrically closest to label 0
    assert_eq!(6, merged.stats().population(0).unwrap());
    assert_eq!(0, merged.stats().population(2).unwrap());
    assert_eq!(3, merged.stats().region_count());
}

pub fn test_multi_hop_chain_folds_once(merge_fn: MergeFn) {
    // Three single pixel regions collapse into one through a two hop chain
    let image = LabelImage::new(3, 1, vec![0, 1, 2]).unwrap();
    let stats = LabelStats::new(
        vec![1, 1, 1],
        vec![vec![0.0], vec![1.0], vec![10.0]],
    )
    .unwrap();
    let params = MergeParams::builder().min_size(2).build();
    let merger = SmallRegionMerger::new(&image, stats, params);
    let merged = merge_fn(&merger).unwrap();

    assert_eq!(&[0, 0, 0], merged.labels().labels());
    assert_eq!(3, merged.stats().population(0).unwrap());
    // (0.0 * 1 + 1.0 * 1) / 2 folded first, then (0.5 * 2 + 10.0 * 1) / 3;
    // each label's mass counted exactly once
    assert!((merged.stats().mean(0).unwrap()[0] - 11.0 / 3.0).abs() < 1e-10);
}

pub fn test_min_size_one_is_noop(merge_fn: MergeFn) {
    let image = LabelImage::new(2, 2, vec![0, 0, 0, 1]).unwrap();
    let stats = LabelStats::new(vec![3, 1], vec![vec![1.0], vec![5.0]]).unwrap();
    let params = MergeParams::builder().min_size(1).build();
    let merger = SmallRegionMerger::new(&image, stats, params);
    let merged = merge_fn(&merger).unwrap();

    // Zero passes are run and the labelling comes back unchanged
    assert_eq!(image.labels(), merged.labels().labels());
    assert_eq!(3, merged.stats().population(0).unwrap());
    assert_eq!(1, merged.stats().population(1).unwrap());
}

pub fn test_merge_idempotent(merge_fn: MergeFn) {
    let (image, stats) = ring_scenario();
    let params = MergeParams::builder().min_size(2).build();
    let merger = SmallRegionMerger::new(&image, stats, params.clone());
    let merged = merge_fn(&merger).unwrap();

    // Every output label is already canonical, so a second run with the
    // same parameters changes nothing
    let (labels, stats) = merged.into_parts();
    let merger = SmallRegionMerger::new(&labels, stats.clone(), params);
    let remerged = merge_fn(&merger).unwrap();
    assert_eq!(labels.labels(), remerged.labels().labels());
    assert_eq!(&stats, remerged.stats());
}

pub fn test_seed_from_pixel_features(merge_fn: MergeFn) {
    let image = LabelImage::new(2, 2, vec![0, 0, 1, 1]).unwrap();
    let features: Vec<Vec<f64>> = vec![vec![1.0], vec![3.0], vec![10.0], vec![20.0]];
    let stats = LabelStats::from_pixel_features(&image, &features).unwrap();
    assert_eq!(2, stats.population(0).unwrap());
    assert!((stats.mean(0).unwrap()[0] - 2.0).abs() < 1e-10);
    assert!((stats.mean(1).unwrap()[0] - 15.0).abs() < 1e-10);

    let params = MergeParams::builder().min_size(3).build();
    let merger = SmallRegionMerger::new(&image, stats, params);
    let merged = merge_fn(&merger).unwrap();

    assert_eq!(&[0, 0, 0, 0], merged.labels().labels());
    assert_eq!(4, merged.stats().population(0).unwrap());
    assert!((merged.stats().mean(0).unwrap()[0] - 8.5).abs() < 1e-10);
}

pub fn test_small_regions_all_reach_min_size(merge_fn: MergeFn) {
    // An 8x8 raster of sixteen 2x2 regions, all far below the minimum size.
    // Merging proceeds through multi-hop chains across several thresholds;
    // no region is isolated, so every survivor must reach the minimum size
    // and the total mass must be conserved.
    let labels = (0..64usize)
        .map(|n| (n / 8 / 2) * 4 + (n % 8) / 2)
        .collect::<Vec<_>>();
    let image = LabelImage::new(8, 8, labels).unwrap();
    let population = vec![4; 16];
    let means = (0..16).map(|label| vec![label as f64]).collect::<Vec<_>>();
    let stats = LabelStats::new(population, means).unwrap();
    let params = MergeParams::builder().min_size(10).build();
    let merger = SmallRegionMerger::new(&image, stats, params);
    let merged = merge_fn(&merger).unwrap();

    assert_eq!(64, merged.stats().total_population());
    for label in 0..16 {
        let population = merged.stats().population(label).unwrap();
        assert!(population == 0 || population >= 10);
    }
    // Every output pixel carries a canonical, surviving label
    let output_labels = merged
        .labels()
        .labels()
        .iter()
        .collect::<std::collections::HashSet<_>>();
    assert_eq!(output_labels.len(), merged.stats().region_count());
    for &&label in &output_labels {
        assert!(merged.stats().population(label).unwrap() > 0);
    }
}

pub fn test_empty_image(merge_fn: MergeFn) {
    let image = LabelImage::new(0, 0, Vec::new()).unwrap();
    let stats = LabelStats::new(Vec::new(), Vec::new()).unwrap();
    let merger = SmallRegionMerger::default_params(&image, stats);
    let result = merge_fn(&merger);
    assert!(matches!(result, Err(MergeError::EmptyImage)));
}

pub fn test_unseeded_label(merge_fn: MergeFn) {
    let image = LabelImage::new(2, 1, vec![0, 3]).unwrap();
    let stats = LabelStats::new(vec![1, 1], vec![vec![1.0], vec![2.0]]).unwrap();
    let merger = SmallRegionMerger::default_params(&image, stats);
    let result = merge_fn(&merger);
    assert!(matches!(result, Err(MergeError::UnknownLabel(_))));
}

pub fn test_mismatched_mean_dimensions(merge_fn: MergeFn) {
    let image = LabelImage::new(2, 1, vec![0, 1]).unwrap();
    let stats = LabelStats::new(vec![1, 1], vec![vec![1.0], vec![2.0, 3.0]]).unwrap();
    let merger = SmallRegionMerger::default_params(&image, stats);
    let result = merge_fn(&merger);
    assert!(matches!(result, Err(MergeError::WrongDimension(_))));
}

fn ring_scenario() -> (LabelImage, LabelStats<f64>) {
    let image = LabelImage::new(
        5,
        5,
        vec![
            0, 0, 0, 0, 0, //
            0, 0, 0, 0, 0, //
            0, 0, 7, 0, 0, //
            0, 0, 0, 0, 0, //
            0, 0, 0, 0, 0,
        ],
    )
    .unwrap();
    let mut population = vec![0; 8];
    population[0] = 24;
    population[7] = 1;
    let mut means = vec![vec![0.0]; 8];
    means[0] = vec![10.0];
    means[7] = vec![200.0];
    let stats = LabelStats::new(population, means).unwrap();
    (image, stats)
}
