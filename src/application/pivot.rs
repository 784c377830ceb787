// Pivoting - reshape template rows into labels x datasets
use crate::domain::chart::{ChartData, ChartRow, ChartShape, Colors, Dataset};
use crate::domain::palette::Rgb;
use std::collections::{BTreeSet, HashMap};

/// Axis label used for time-series rows that carry no year
pub const UNKNOWN_YEAR: &str = "unknown";

const LINE_TENSION: f64 = 0.3;
const FILL_ALPHA: f64 = 0.1;

/// One label and one value per row, in row order
pub fn pivot_categorical(rows: &[ChartRow], label: &str) -> ChartData {
    ChartData {
        labels: rows.iter().map(ChartRow::series_label).collect(),
        datasets: vec![Dataset::new(
            label.to_string(),
            rows.iter().map(|r| r.value).collect(),
        )],
    }
}

/// Group rows into one series per label over a sorted year axis.
///
/// Series keep first-appearance order. Years missing from a series are 0;
/// repeated (series, year) rows are summed.
pub fn pivot_time_series(rows: &[ChartRow]) -> ChartData {
    let years: BTreeSet<&str> = rows
        .iter()
        .map(|r| r.year.as_deref().unwrap_or(UNKNOWN_YEAR))
        .collect();
    let labels: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    let positions: HashMap<&str, usize> = years.iter().enumerate().map(|(i, y)| (*y, i)).collect();

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut datasets: Vec<Dataset> = Vec::new();

    for row in rows {
        let series = row.series_label();
        let slot = match index.get(&series) {
            Some(slot) => *slot,
            None => {
                datasets.push(Dataset::new(series.clone(), vec![0.0; labels.len()]));
                index.insert(series, datasets.len() - 1);
                datasets.len() - 1
            }
        };
        let year = row.year.as_deref().unwrap_or(UNKNOWN_YEAR);
        datasets[slot].data[positions[year]] += row.value;
    }

    ChartData { labels, datasets }
}

/// Attach colors, cycling the fixed palette by index
pub fn apply_palette(mut data: ChartData, shape: ChartShape) -> ChartData {
    match shape {
        ChartShape::TimeSeries => {
            for (i, dataset) in data.datasets.iter_mut().enumerate() {
                let color = Rgb::for_index(i);
                dataset.border_color = Some(color.css());
                dataset.background_color = Some(Colors::Single(color.css_alpha(FILL_ALPHA)));
                dataset.tension = Some(LINE_TENSION);
            }
        }
        ChartShape::Categorical => {
            let colors: Vec<String> = (0..data.labels.len())
                .map(|i| Rgb::for_index(i).css())
                .collect();
            for dataset in data.datasets.iter_mut() {
                dataset.background_color = Some(Colors::PerPoint(colors.clone()));
            }
        }
    }
    data
}
