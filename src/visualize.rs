//! Terminal rendering of a sample window of the dataset.
//!
//! Each quantity gets its own panel: the window is bucketed into columns,
//! every column draws the min..max envelope of its bucket, and points
//! labelled with the quantity's category code are drawn as red markers.

use crate::core::{Dataset, Quantity, MINUTES_PER_WEEK};
use crate::export::TIMESTAMP_FORMAT;
use colored::Colorize;

/// Layout of the rendered panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartConfig {
    /// Number of leading rows to plot.
    pub window: usize,
    /// Plot width in character columns.
    pub width: usize,
    /// Plot height in character rows.
    pub height: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            window: MINUTES_PER_WEEK,
            width: 112,
            height: 14,
        }
    }
}

impl ChartConfig {
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Trace,
    Anomaly,
}

fn value_range(values: &[f64]) -> (f64, f64) {
    let (lo, hi) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        (-0.5, 0.5)
    } else if hi - lo < f64::EPSILON {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

/// Render one quantity's panel as lines of text.
pub fn render_panel(dataset: &Dataset, quantity: Quantity, config: &ChartConfig) -> Vec<String> {
    let sample = dataset.window(config.window);
    let n = sample.len();
    let values = sample.series(quantity);
    let labels = sample.labels();
    let code = quantity.code();
    let anomalies = labels.iter().filter(|&&l| l == code).count();

    let mut lines = vec![format!(
        "{}  {}",
        quantity.title().bold(),
        format!("[{anomalies} anomalies in {n} points]").dimmed()
    )];
    if n == 0 || config.width == 0 || config.height == 0 {
        lines.push("(no data)".to_string());
        return lines;
    }

    let height = config.height;
    let columns = config.width.min(n);
    let (lo, hi) = value_range(values);
    let row_of = |v: f64| -> usize {
        let scaled = (hi - v) / (hi - lo) * (height - 1) as f64;
        (scaled.round().max(0.0) as usize).min(height - 1)
    };

    let mut grid = vec![vec![Cell::Empty; columns]; height];
    for column in 0..columns {
        let start = column * n / columns;
        let end = ((column + 1) * n / columns).max(start + 1);
        let bucket = &values[start..end];
        let (b_lo, b_hi) = bucket
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(a, b), &v| (a.min(v), b.max(v)));
        if b_lo.is_finite() && b_hi.is_finite() {
            for row in grid.iter_mut().take(row_of(b_lo) + 1).skip(row_of(b_hi)) {
                row[column] = Cell::Trace;
            }
        }
        for i in start..end {
            if labels[i] == code {
                grid[row_of(values[i])][column] = Cell::Anomaly;
            }
        }
    }

    for (r, row) in grid.iter().enumerate() {
        let axis = if r == 0 {
            format!("{hi:>10.2} ┤")
        } else if r == height - 1 {
            format!("{lo:>10.2} ┤")
        } else {
            format!("{:>10} │", "")
        };
        let body: String = row
            .iter()
            .map(|cell| match cell {
                Cell::Empty => " ".to_string(),
                Cell::Trace => "│".cyan().to_string(),
                Cell::Anomaly => "●".red().bold().to_string(),
            })
            .collect();
        lines.push(format!("{axis}{body}"));
    }

    let first = sample.timestamps()[0].format(TIMESTAMP_FORMAT).to_string();
    let last = sample.timestamps()[n - 1].format(TIMESTAMP_FORMAT).to_string();
    let gap = (columns + 1).saturating_sub(first.len() + last.len()).max(1);
    lines.push(format!("{:>10}  {first}{}{last}", "", " ".repeat(gap)));
    lines
}

/// Render all three panels, stacked in column order.
pub fn render_sample(dataset: &Dataset, config: &ChartConfig) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, quantity) in Quantity::ALL.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(render_panel(dataset, quantity, config));
    }
    lines
}

/// Print the stacked panels to stdout.
pub fn show_sample(dataset: &Dataset, config: &ChartConfig) {
    for line in render_sample(dataset, config) {
        println!("{line}");
    }
}
