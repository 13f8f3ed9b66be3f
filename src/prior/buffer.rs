//! Caller-owned output planes for generated priors.
//!
//! A [`PriorBuffer`] holds two equally sized planes: a mean plane with
//! four normalized coordinates per prior, and a variance plane with the
//! per-coordinate decode variances. The caller allocates it once per
//! grid geometry; the generator only advances a single write cursor and
//! never grows the planes. Every write is bounds-checked, so a
//! configuration that emits more boxes than the allocation covers
//! surfaces as a [`CapacityError`] rather than an out-of-bounds write.

/// A write would exceed the plane capacity declared at allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapacityError {
    /// Plane capacity in values (4 per box).
    pub capacity: usize,
    /// Value count the rejected write would have reached.
    pub attempted: usize,
}

impl std::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "prior buffer capacity exceeded ({} values needed, {} allocated)",
            self.attempted, self.capacity
        )
    }
}

impl std::error::Error for CapacityError {}

/// Two named planes (mean, variance) behind a single write cursor.
#[derive(Clone, Debug)]
pub struct PriorBuffer {
    mean: Vec<f32>,
    variance: Vec<f32>,
    cursor: usize,
}

impl PriorBuffer {
    /// Zero-initialized planes of `len` values each. `len` is normally
    /// `grid.w * grid.h * priors_per_cell * 4`.
    pub fn new(len: usize) -> Self {
        Self {
            mean: vec![0.0; len],
            variance: vec![0.0; len],
            cursor: 0,
        }
    }

    /// Capacity of each plane in values.
    pub fn capacity(&self) -> usize {
        self.mean.len()
    }

    /// Values written to the mean plane since the last reset.
    pub fn written(&self) -> usize {
        self.cursor
    }

    /// Full mean plane; values past [`written`](Self::written) are
    /// whatever the last reset left there (zero on allocation).
    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    /// Full variance plane.
    pub fn variance(&self) -> &[f32] {
        &self.variance
    }

    /// Rewinds the cursor without touching the plane contents.
    pub(crate) fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Appends one box to the mean plane, rejecting the write if it
    /// would run past the plane end.
    pub(crate) fn push_box(&mut self, coords: [f32; 4]) -> Result<(), CapacityError> {
        let end = self.cursor + 4;
        if end > self.mean.len() {
            return Err(CapacityError {
                capacity: self.mean.len(),
                attempted: end,
            });
        }
        self.mean[self.cursor..end].copy_from_slice(&coords);
        self.cursor = end;
        Ok(())
    }

    /// Sets every slot of the variance plane to `value`.
    pub(crate) fn fill_variance_broadcast(&mut self, value: f32) {
        self.variance.fill(value);
    }

    /// Tiles the four per-coordinate variances across the values the
    /// mean tiling actually produced. Sized by the write cursor rather
    /// than a grid formula, so the two planes stay in step even when a
    /// duplicate tiling pass inflates the box count.
    pub(crate) fn fill_variance_per_coord(&mut self, values: [f32; 4]) {
        for (i, slot) in self.variance[..self.cursor].iter_mut().enumerate() {
            *slot = values[i % 4];
        }
    }
}
