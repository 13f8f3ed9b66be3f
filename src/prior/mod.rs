//! Prior-box (anchor) generation for single-shot detection heads.
//!
//! For each configured box scale the generator tiles one reference
//! rectangle across the image at a scale-derived stride and appends the
//! normalized `(x_min, y_min, x_max, y_max)` coordinates to a
//! caller-owned buffer:
//!
//! - Stride selection goes through [`StridePolicy`], an explicit
//!   `scale → divisor` table with a fallback divisor for unlisted
//!   scales. The default table matches the original detection head
//!   (quarter stride at 32, half stride at 64, full stride elsewhere).
//! - Tiling walks the image row-major (row outer) with centers half a
//!   stride in from the border; counts come from truncating division
//!   of the image extent by the stride. Border boxes may extend past
//!   [0, 1] and are left unclamped for the decoder to handle.
//! - The variance plane is filled after all scales: one configured
//!   value is broadcast to the whole plane, four values are tiled per
//!   coordinate over the boxes actually emitted.
//!
//! The grid extent does not drive the tiling; it only sizes the
//! allocation (`grid.w * grid.h * priors_per_cell * 4` values per
//! plane). When a stride policy emits more boxes than that formula
//! covers — in particular when a historical duplicate pass is enabled —
//! the generator stops with a [`CapacityError`] before writing past the
//! allocation.
//!
//! See also
//! - [`PriorBoxParams`] for the validation rules and the derived
//!   per-cell prior count.
//! - `StridePolicy::with_duplicate_fallback` for reproducing the
//!   double tiling of the 32 scale found in the original generator.

mod buffer;
mod generator;
mod params;
mod stride;

pub use buffer::{CapacityError, PriorBuffer};
pub use generator::PriorBoxGenerator;
pub use params::{ConfigError, PriorBoxConfig, PriorBoxParams, DEFAULT_VARIANCE};
pub use stride::{StridePolicy, StrideRule};

#[cfg(test)]
mod tests;
