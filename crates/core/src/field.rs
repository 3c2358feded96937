//! Two-dimensional scalar field holding substrate concentrations.
//!
//! A `Field` stores `width * height` f64 values in [0, 1] using row-major
//! layout. Coordinate access through `get`/`set` uses toroidal (wrap-around)
//! addressing, so negative and overflowing indices are valid; boundary-aware
//! kernels work on the raw data slice instead.

use crate::error::EngineError;
use crate::prng::Xorshift64;

/// A 2D scalar field with values clamped to [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Field {
    /// Creates a zero-filled field of the given dimensions.
    ///
    /// Returns `EngineError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; len],
        })
    }

    /// Creates a field filled with `value`, clamped to [0, 1].
    pub fn filled(width: usize, height: usize, value: f64) -> Result<Self, EngineError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value.clamp(0.0, 1.0); len],
        })
    }

    /// Creates a field of independent uniform-random values in [0, 1).
    ///
    /// This is the substrate initialization used at simulation start and on
    /// reseed. Cells are drawn in row-major order, so the same seed always
    /// reproduces the same field.
    pub fn random(width: usize, height: usize, rng: &mut Xorshift64) -> Result<Self, EngineError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: (0..len).map(|_| rng.next_f64()).collect(),
        })
    }

    /// Creates a field from a pre-built data vector, validating that
    /// `data.len() == width * height`.
    ///
    /// Values are **not** clamped; the caller is responsible for ensuring
    /// they lie in [0, 1].
    pub fn from_data(width: usize, height: usize, data: Vec<f64>) -> Result<Self, EngineError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(EngineError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: data.len(),
                rhs_h: 1,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Field width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable access to the underlying row-major data.
    ///
    /// Values written here bypass the [0, 1] clamping. Kernel hot paths
    /// that manage their own invariants use this for performance.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Converts signed coordinates to a flat index using toroidal wrapping.
    fn index(&self, x: isize, y: isize) -> usize {
        let xi = x.rem_euclid(self.width as isize) as usize;
        let yi = y.rem_euclid(self.height as isize) as usize;
        yi * self.width + xi
    }

    /// Gets the value at `(x, y)` with toroidal wrapping.
    pub fn get(&self, x: isize, y: isize) -> f64 {
        self.data[self.index(x, y)]
    }

    /// Sets the value at `(x, y)` with toroidal wrapping, clamped to [0, 1].
    pub fn set(&mut self, x: isize, y: isize, value: f64) {
        let idx = self.index(x, y);
        self.data[idx] = value.clamp(0.0, 1.0);
    }

    /// Mean cell value over the whole field.
    ///
    /// Drives the substrate-level trace reported by the CLI.
    pub fn mean(&self) -> f64 {
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// True if every cell lies in [0, 1].
    pub fn is_bounded(&self) -> bool {
        self.data.iter().all(|v| (0.0..=1.0).contains(v))
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize, EngineError> {
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(EngineError::InvalidDimensions)
}
