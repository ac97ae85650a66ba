//! Zipf-law estimation.
//!
//! Fits an ordinary-least-squares line through the `(ln rank, ln count)`
//! pairs of the top-ranked frequency entries. For a Zipfian corpus the
//! slope sits near -1 and `e^intercept` estimates the frequency of the
//! rank-1 word (the Zipf constant).

use serde::{Deserialize, Serialize};

use crate::frequency::FrequencyEntry;

/// Closed-form OLS result over the log-log points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// `e^intercept`, the implied frequency of rank 1.
    pub expected_frequency_factor: f64,
}

/// One charted point of the regression input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipfPoint {
    pub rank: usize,
    pub word: String,
    pub frequency: u64,
    pub log_rank: f64,
    pub log_frequency: f64,
}

/// The regression plus the points it was fitted over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZipfAnalysis {
    pub regression: RegressionResult,
    pub points: Vec<ZipfPoint>,
}

/// Fit the regression over the first `min(max_points, len)` entries.
///
/// Entries are already rank-ordered; zero counts never appear in a
/// frequency table, but `ln 0` is undefined so they are skipped anyway.
pub fn fit(table: &[FrequencyEntry], max_points: usize) -> ZipfAnalysis {
    let limit = max_points.min(table.len());
    let points: Vec<ZipfPoint> = table[..limit]
        .iter()
        .filter(|entry| entry.rank > 0 && entry.count > 0)
        .map(|entry| ZipfPoint {
            rank: entry.rank,
            word: entry.word.clone(),
            frequency: entry.count,
            log_rank: (entry.rank as f64).ln(),
            log_frequency: (entry.count as f64).ln(),
        })
        .collect();

    let pairs: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.log_rank, p.log_frequency))
        .collect();
    let (slope, intercept, r_squared) = linear_regression(&pairs);

    ZipfAnalysis {
        regression: RegressionResult {
            slope,
            intercept,
            r_squared,
            expected_frequency_factor: intercept.exp(),
        },
        points,
    }
}

/// Ordinary least squares over `(x, y)` pairs.
///
/// A zero denominator (fewer than two distinct x values) yields slope 0
/// with the mean of y as intercept; zero total variance yields R² = 0.
pub fn linear_regression(points: &[(f64, f64)]) -> (f64, f64, f64) {
    let n = points.len() as f64;
    if points.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();
    let sum_xx: f64 = points.iter().map(|(x, _)| x * x).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    let slope = if denominator != 0.0 {
        (n * sum_xy - sum_x * sum_y) / denominator
    } else {
        0.0
    };
    let intercept = (sum_y - slope * sum_x) / n;

    let mean_y = sum_y / n;
    let ss_tot: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
    let ss_res: f64 = points
        .iter()
        .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
        .sum();
    let r_squared = if ss_tot != 0.0 {
        1.0 - ss_res / ss_tot
    } else {
        0.0
    };

    (slope, intercept, r_squared)
}
