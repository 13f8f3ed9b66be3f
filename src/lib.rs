#![doc = include_str!("../README.md")]

pub mod config;
pub mod prior;
pub mod types;

// --- High-level re-exports -------------------------------------------------

pub use crate::prior::{
    CapacityError, ConfigError, PriorBoxConfig, PriorBoxGenerator, PriorBoxParams, PriorBuffer,
    StridePolicy, StrideRule,
};
pub use crate::types::{GridExtent, ImageExtent};

/// Small prelude for quick experiments.
///
/// ```no_run
/// use prior_box::prelude::*;
///
/// # fn main() {
/// let generator = PriorBoxGenerator::new(PriorBoxConfig {
///     scales: vec![64],
///     ..Default::default()
/// })
/// .expect("valid config");
///
/// let grid = GridExtent { w: 8, h: 8 };
/// let image = ImageExtent { w: 256, h: 256 };
/// let mut buffer = generator.alloc_buffer(grid);
/// let written = generator.generate(grid, image, &mut buffer).expect("capacity");
/// println!("wrote {written} values");
/// # }
/// ```
pub mod prelude {
    pub use crate::prior::{PriorBoxConfig, PriorBoxGenerator, PriorBuffer};
    pub use crate::types::{GridExtent, ImageExtent};
}
