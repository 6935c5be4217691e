use region_merging::{LabelImage, LabelStats, MergeParams, SmallRegionMerger};
use std::fs;

fn main() {
    let contents = fs::read_to_string("labels.csv").expect("Unable to read labels file");
    let rows = contents
        .lines()
        .map(|line| {
            line.split(',')
                .map(|num| num.trim().parse::<usize>().unwrap())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let height = rows.len();
    let width = rows.first().map(|row| row.len()).unwrap_or(0);
    let image = LabelImage::new(width, height, rows.into_iter().flatten().collect())
        .expect("Ragged label rows");

    // One line per label: population followed by the mean feature vector
    let contents = fs::read_to_string("stats.csv").expect("Unable to read stats file");
    let mut population = Vec::new();
    let mut means = Vec::new();
    for line in contents.lines() {
        let mut fields = line.split(',').map(str::trim);
        population.push(fields.next().unwrap().parse::<usize>().unwrap());
        means.push(
            fields
                .map(|num| num.parse::<f64>().unwrap())
                .collect::<Vec<_>>(),
        );
    }
    let stats = LabelStats::new(population, means).expect("Mismatched stats tables");

    let params = MergeParams::builder().min_size(50).build();
    let merger = SmallRegionMerger::new(&image, stats, params);
    let result = merger.merge();
    if let Ok(merged) = result {
        for row in merged.labels().labels().chunks(width) {
            let line = row
                .iter()
                .map(|label| label.to_string())
                .collect::<Vec<_>>()
                .join(",");
            println!("{line}");
        }
    }
}
