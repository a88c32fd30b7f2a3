//! Statistical Features Computation

use serde::{Deserialize, Serialize};

/// Statistical features for a signal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticalFeatures {
    /// Number of values summarized
    pub count: usize,
    /// Mean value
    pub mean: f64,
    /// Population variance
    pub variance: f64,
    /// Standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean absolute change between consecutive values
    pub rate_of_change: f64,
}

impl StatisticalFeatures {
    /// Compute statistical features from a slice of values
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let mean = mean(values).unwrap_or(0.0);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

        let rate_of_change = if values.len() >= 2 {
            let total: f64 = values.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
            total / (values.len() - 1) as f64
        } else {
            0.0
        };

        Self {
            count: values.len(),
            mean,
            variance,
            std_dev: variance.sqrt(),
            min,
            max,
            rate_of_change,
        }
    }
}

/// Streaming counterpart of [`StatisticalFeatures::compute`]
///
/// Constant memory; variance uses Welford's update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningStatistics {
    count: usize,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
    last: Option<f64>,
    total_change: f64,
}

impl RunningStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        if self.count == 1 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        if let Some(last) = self.last {
            self.total_change += (value - last).abs();
        }
        self.last = Some(value);

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Features of everything pushed so far
    pub fn features(&self) -> StatisticalFeatures {
        if self.count == 0 {
            return StatisticalFeatures::default();
        }
        let variance = (self.m2 / self.count as f64).max(0.0);
        let rate_of_change = if self.count >= 2 {
            self.total_change / (self.count - 1) as f64
        } else {
            0.0
        };
        StatisticalFeatures {
            count: self.count,
            mean: self.mean,
            variance,
            std_dev: variance.sqrt(),
            min: self.min,
            max: self.max,
            rate_of_change,
        }
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Population variance (divides by N), `None` for an empty slice
pub fn variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    Some(values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64)
}

/// Per-axis population variance of 2D points, returned as `(var_x, var_y)`
pub fn variance_2d(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    let (mx, my) = (sx / n, sy / n);
    let (vx, vy) = points.iter().fold((0.0, 0.0), |(vx, vy), (x, y)| {
        (vx + (x - mx).powi(2), vy + (y - my).powi(2))
    });
    Some((vx / n, vy / n))
}
