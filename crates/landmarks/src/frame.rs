//! Landmark frame types and point geometry

use crate::LandmarkError;
use serde::{Deserialize, Serialize};

/// Normalized 3D landmark point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Check that every coordinate is finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Projection onto the image plane
    pub fn xy(&self) -> Point2 {
        Point2 {
            x: self.x,
            y: self.y,
        }
    }

    /// Euclidean distance in the image plane (depth ignored)
    pub fn planar_distance(&self, other: &Point3) -> f64 {
        self.xy().distance(&other.xy())
    }
}

/// 2D position in normalized image space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Arithmetic mean of a set of points
    pub fn centroid(points: &[Point3]) -> Option<Point2> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point2 {
            x: sx / n,
            y: sy / n,
        })
    }

    /// Component-wise midpoint
    pub fn midpoint(&self, other: &Point2) -> Point2 {
        Point2 {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// One frame of landmarks from the external detector
///
/// Points are indexed positionally; the frame is immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkFrame {
    points: Vec<Point3>,
}

impl LandmarkFrame {
    /// Create a frame from detector output
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Number of landmark points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in detector order
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Get a landmark, rejecting missing indices and NaN/infinite coordinates
    pub fn get(&self, index: usize) -> Result<Point3, LandmarkError> {
        let point = self
            .points
            .get(index)
            .copied()
            .ok_or(LandmarkError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })?;

        if !point.is_finite() {
            return Err(LandmarkError::NonFinite { index });
        }
        Ok(point)
    }

    /// Get several landmarks in the order given
    pub fn select(&self, indices: &[usize]) -> Result<Vec<Point3>, LandmarkError> {
        indices.iter().map(|&i| self.get(i)).collect()
    }
}

impl From<Vec<Point3>> for LandmarkFrame {
    fn from(points: Vec<Point3>) -> Self {
        Self::new(points)
    }
}

/// Per-tick input from the landmark detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameInput {
    /// A face was found and landmarks are available
    Landmarks(LandmarkFrame),
    /// The detector ran but found no face
    NoFace,
}

impl From<LandmarkFrame> for FrameInput {
    fn from(frame: LandmarkFrame) -> Self {
        FrameInput::Landmarks(frame)
    }
}
