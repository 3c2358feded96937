//! Domain mask: a fixed boolean sub-region restricting where substrate
//! values may be nonzero.

use bz_lab_core::error::EngineError;
use bz_lab_core::field::Field;

/// Fraction of the shorter grid side used as the disk radius.
const DISK_RADIUS_FACTOR: f64 = 0.48;

/// A fixed boolean admissibility map over the grid.
///
/// Cells outside the mask are forced to 0 by [`DomainMask::apply`] and the
/// reaction step re-applies the mask after every update, so excluded cells
/// stay at 0 for the lifetime of the mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainMask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl DomainMask {
    /// Creates a centered disk mask of radius 0.48 x min(width, height).
    ///
    /// Returns `EngineError::InvalidDimensions` for zero or overflowing
    /// dimensions.
    pub fn disk(width: usize, height: usize) -> Result<Self, EngineError> {
        let len = checked_len(width, height)?;
        let cx = (width as f64 - 1.0) / 2.0;
        let cy = (height as f64 - 1.0) / 2.0;
        let radius = DISK_RADIUS_FACTOR * width.min(height) as f64;
        let r2 = radius * radius;
        let mut cells = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                cells.push(dx * dx + dy * dy <= r2);
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Creates a mask from a pre-built row-major boolean vector.
    ///
    /// Returns `EngineError::DimensionMismatch` if the length does not equal
    /// `width * height`.
    pub fn from_data(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, EngineError> {
        let expected = checked_len(width, height)?;
        if cells.len() != expected {
            return Err(EngineError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: cells.len(),
                rhs_h: 1,
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Mask width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the in-bounds cell `(x, y)` is inside the admissible region.
    ///
    /// Unlike `Field` access, mask lookup never wraps: callers pass
    /// already-resolved in-bounds coordinates.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    /// Forces every field cell outside the mask to 0.
    ///
    /// Returns `EngineError::DimensionMismatch` if the field shape differs.
    pub fn apply(&self, field: &mut Field) -> Result<(), EngineError> {
        self.check_shape(field)?;
        for (value, &inside) in field.data_mut().iter_mut().zip(self.cells.iter()) {
            if !inside {
                *value = 0.0;
            }
        }
        Ok(())
    }

    /// Validates that `field` has the same shape as this mask.
    pub fn check_shape(&self, field: &Field) -> Result<(), EngineError> {
        if field.width() != self.width || field.height() != self.height {
            return Err(EngineError::DimensionMismatch {
                lhs_w: field.width(),
                lhs_h: field.height(),
                rhs_w: self.width,
                rhs_h: self.height,
            });
        }
        Ok(())
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
