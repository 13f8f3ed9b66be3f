//! Extent types shared by the generator and its host.

use serde::{Deserialize, Serialize};

/// Spatial size of the feature grid that the priors are allocated for.
///
/// Only used for buffer sizing; the tiling itself walks the image at the
/// scale-derived stride.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridExtent {
    /// Grid width in cells
    pub w: usize,
    /// Grid height in cells
    pub h: usize,
}

/// Pixel size of the reference image the box coordinates are normalized
/// against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageExtent {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
}
