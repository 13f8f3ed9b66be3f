//! Tiled prior-box generation.

use log::{debug, warn};

use super::buffer::{CapacityError, PriorBuffer};
use super::params::{ConfigError, PriorBoxConfig, PriorBoxParams};
use crate::types::{GridExtent, ImageExtent};

/// Generates prior boxes for a fixed, validated configuration.
///
/// Construction validates once; [`generate`](Self::generate) is then a
/// pure single-pass write into a caller-owned [`PriorBuffer`].
#[derive(Clone, Debug)]
pub struct PriorBoxGenerator {
    params: PriorBoxParams,
}

impl PriorBoxGenerator {
    pub fn new(config: PriorBoxConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            params: PriorBoxParams::from_config(config)?,
        })
    }

    pub fn from_params(params: PriorBoxParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PriorBoxParams {
        &self.params
    }

    /// Plane length the host allocates for `grid`: one prior slot per
    /// cell and configured prior, four values per slot.
    pub fn plane_len(&self, grid: GridExtent) -> usize {
        grid.w * grid.h * self.params.priors_per_cell() * 4
    }

    /// Fresh zeroed buffer sized by [`plane_len`](Self::plane_len).
    pub fn alloc_buffer(&self, grid: GridExtent) -> PriorBuffer {
        PriorBuffer::new(self.plane_len(grid))
    }

    /// Tiles every configured scale across `image` and writes the
    /// normalized coordinates into the mean plane of `out`, then fills
    /// the variance plane. Returns the number of coordinate values
    /// written for the caller to cross-check against its allocation.
    ///
    /// The buffer cursor is rewound first, so reusing a buffer across
    /// calls with identical inputs reproduces identical output.
    pub fn generate(
        &self,
        grid: GridExtent,
        image: ImageExtent,
        out: &mut PriorBuffer,
    ) -> Result<usize, CapacityError> {
        out.reset();

        for &scale in self.params.scales() {
            let (stride, duplicate) = self.params.stride_policy().strides_for(scale);
            tile_scale(scale, stride, image, out)?;
            if let Some(dup_stride) = duplicate {
                warn!(
                    "scale {scale} tiles twice (stride {stride} and {dup_stride}); \
                     historical duplicate pass"
                );
                tile_scale(scale, dup_stride, image, out)?;
            }
        }

        match *self.params.variance() {
            [value] => out.fill_variance_broadcast(value),
            [x_min, y_min, x_max, y_max] => {
                out.fill_variance_per_coord([x_min, y_min, x_max, y_max]);
            }
            // Length 1 or 4 is enforced at construction.
            _ => unreachable!("variance length validated at construction"),
        }

        debug!(
            "emitted {} values ({} boxes) for grid {}x{}, image {}x{}",
            out.written(),
            out.written() / 4,
            grid.w,
            grid.h,
            image.w,
            image.h
        );
        Ok(out.written())
    }
}

/// One tiling pass: centers every `stride` pixels starting half a
/// stride in, row-major with the row outer. Coordinates near the
/// borders may fall outside [0, 1]; they are not clamped.
fn tile_scale(
    scale: u32,
    stride: u32,
    image: ImageExtent,
    out: &mut PriorBuffer,
) -> Result<(), CapacityError> {
    let num_w = image.w / stride as usize;
    let num_h = image.h / stride as usize;
    let half = scale as f32 / 2.0;
    let img_w = image.w as f32;
    let img_h = image.h as f32;

    for h in 0..num_h {
        for w in 0..num_w {
            let cx = (w as f32 + 0.5) * stride as f32;
            let cy = (h as f32 + 0.5) * stride as f32;
            out.push_box([
                (cx - half) / img_w,
                (cy - half) / img_h,
                (cx + half) / img_w,
                (cy + half) / img_h,
            ])?;
        }
    }
    Ok(())
}
