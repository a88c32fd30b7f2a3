//! Refined face-mesh index sets for the eyes

/// Number of points in the refined mesh (468 face + 10 iris)
pub const REFINED_MESH_POINTS: usize = 478;

/// Landmark indices describing one eye
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeIndices {
    /// Full eye contour (16 points), used for the eye box
    pub contour: &'static [usize],
    /// Outer (temporal) eye corner
    pub outer_corner: usize,
    /// Inner (nasal) eye corner
    pub inner_corner: usize,
    /// Upper/lower lid pairs for the aspect ratio
    pub vertical_pairs: [(usize, usize); 3],
    /// Iris center and its four boundary points
    pub iris: [usize; 5],
}

/// Eye on the left side of the image
pub const LEFT_EYE: EyeIndices = EyeIndices {
    contour: &[
        33, 7, 163, 144, 145, 153, 154, 155, 133, 173, 157, 158, 159, 160, 161, 246,
    ],
    outer_corner: 33,
    inner_corner: 133,
    vertical_pairs: [(160, 144), (159, 145), (158, 153)],
    iris: [468, 469, 470, 471, 472],
};

/// Eye on the right side of the image
pub const RIGHT_EYE: EyeIndices = EyeIndices {
    contour: &[
        362, 382, 381, 380, 374, 373, 390, 249, 263, 466, 388, 387, 386, 385, 384, 398,
    ],
    outer_corner: 263,
    inner_corner: 362,
    vertical_pairs: [(385, 380), (386, 374), (387, 373)],
    iris: [473, 474, 475, 476, 477],
};

impl EyeIndices {
    /// Highest index referenced by this eye
    pub fn max_index(&self) -> usize {
        self.contour
            .iter()
            .chain(self.iris.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }
}
