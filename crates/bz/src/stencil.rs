//! Masked, boundary-aware 3x3 neighborhood averaging.
//!
//! This is the shared primitive of the reaction step: every substrate field
//! is smoothed by the mean of each cell and its eight neighbors before the
//! reaction terms are applied.

use bz_lab_core::error::EngineError;
use bz_lab_core::field::Field;

use crate::boundary::Boundary;
use crate::mask::DomainMask;

/// Full 3x3 window size, the fixed divisor for Wrap and Clamp normalization.
const WINDOW_CELLS: f64 = 9.0;

/// Computes the 3x3 neighborhood mean of `field` under the given boundary
/// policy and optional domain mask.
///
/// Window sums follow the policy: `Wrap` indexes toroidally, `Open` and
/// `Clamp` treat out-of-range neighbors as 0. Masked-out cells contribute 0
/// regardless of policy. Normalization:
///
/// - no mask, `Wrap` or `Clamp`: divide by the constant 9. For `Clamp` this
///   biases edge means toward 0 (zero-fill with a full-window divisor); that
///   asymmetry is preserved deliberately as documented behavior.
/// - no mask, `Open`: divide by the number of in-bounds window cells.
/// - any mask: divide by the number of admissible window cells, floored at 1
///   so fully excluded neighborhoods yield 0 instead of dividing by zero.
///
/// Pure function of its inputs. Returns `EngineError::DimensionMismatch` if
/// the mask shape differs from the field shape.
pub fn neighborhood_mean(
    field: &Field,
    boundary: Boundary,
    mask: Option<&DomainMask>,
) -> Result<Field, EngineError> {
    if let Some(m) = mask {
        m.check_shape(field)?;
    }

    let w = field.width() as isize;
    let h = field.height() as isize;
    let data = field.data();
    let mut out = Vec::with_capacity(data.len());

    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            let mut valid = 0usize;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let (nx, ny) = (x + dx, y + dy);
                    let (ix, iy) = match boundary {
                        Boundary::Wrap => (nx.rem_euclid(w), ny.rem_euclid(h)),
                        Boundary::Open | Boundary::Clamp => {
                            if nx < 0 || nx >= w || ny < 0 || ny >= h {
                                continue;
                            }
                            (nx, ny)
                        }
                    };
                    if let Some(m) = mask {
                        if !m.contains(ix as usize, iy as usize) {
                            continue;
                        }
                    }
                    sum += data[(iy * w + ix) as usize];
                    valid += 1;
                }
            }
            let divisor = match (mask, boundary) {
                (None, Boundary::Wrap | Boundary::Clamp) => WINDOW_CELLS,
                _ => valid.max(1) as f64,
            };
            out.push(sum / divisor);
        }
    }

    Field::from_data(field.width(), field.height(), out)
}
