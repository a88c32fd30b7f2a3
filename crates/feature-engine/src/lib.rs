//! Feature Engineering Engine
//!
//! Summary statistics over per-sample metric series (movement, gaze
//! direction, stability) used by the temporal tracker and the classifier.

mod statistics;

pub use statistics::{mean, variance, variance_2d, RunningStatistics, StatisticalFeatures};
