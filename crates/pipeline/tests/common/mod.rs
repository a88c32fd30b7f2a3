//! Synthetic landmark frames for scenario tests

use landmarks::{EyeIndices, LandmarkFrame, Point3, LEFT_EYE, REFINED_MESH_POINTS, RIGHT_EYE};

pub const EYE_WIDTH: f64 = 0.1;
pub const LEFT_CENTER: (f64, f64) = (0.35, 0.4);
pub const RIGHT_CENTER: (f64, f64) = (0.65, 0.4);

/// Per-eye pose of a synthetic frame
#[derive(Debug, Clone, Copy)]
pub struct EyePose {
    pub openness: f64,
    /// Iris offset from the eye-box center, in box widths/heights
    pub gaze: (f64, f64),
}

fn place_eye(points: &mut [Point3], eye: &EyeIndices, center: (f64, f64), pose: EyePose) {
    let (cx, cy) = center;
    let half_w = EYE_WIDTH / 2.0;
    let half_h = pose.openness * EYE_WIDTH / 2.0;

    for &i in eye.contour {
        points[i] = Point3::new(cx, cy, 0.0);
    }
    points[eye.outer_corner] = Point3::new(cx - half_w, cy, 0.0);
    points[eye.inner_corner] = Point3::new(cx + half_w, cy, 0.0);
    for (upper, lower) in eye.vertical_pairs {
        points[upper] = Point3::new(cx, cy - half_h, 0.0);
        points[lower] = Point3::new(cx, cy + half_h, 0.0);
    }

    let iris = Point3::new(
        cx + pose.gaze.0 * EYE_WIDTH,
        cy + pose.gaze.1 * 2.0 * half_h,
        0.0,
    );
    for &i in &eye.iris {
        points[i] = iris;
    }
}

/// Full refined-mesh frame with the given eye poses
pub fn frame(left: EyePose, right: EyePose) -> LandmarkFrame {
    let mut points = vec![Point3::new(0.5, 0.5, 0.0); REFINED_MESH_POINTS];
    place_eye(&mut points, &LEFT_EYE, LEFT_CENTER, left);
    place_eye(&mut points, &RIGHT_EYE, RIGHT_CENTER, right);
    LandmarkFrame::new(points)
}

/// Both eyes in the same pose
pub fn symmetric(openness: f64, gaze: (f64, f64)) -> LandmarkFrame {
    let pose = EyePose { openness, gaze };
    frame(pose, pose)
}
