//! Face-Mesh Landmark Input
//!
//! Types for the per-frame output of the external landmark detector:
//! - Normalized 3D landmark points (x, y, z in [0, 1] image space)
//! - Frame input envelope (landmarks or "no face detected")
//! - Eye contour and iris index sets for the 478-point refined mesh

pub mod frame;
pub mod indices;

pub use frame::{FrameInput, LandmarkFrame, Point2, Point3};
pub use indices::{EyeIndices, LEFT_EYE, REFINED_MESH_POINTS, RIGHT_EYE};

use thiserror::Error;

/// Landmark access errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LandmarkError {
    #[error("Landmark index {index} out of range (frame has {len} points)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}
