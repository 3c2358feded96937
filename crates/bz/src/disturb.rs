//! Localized disturbance: bounded random noise injected into a disk-shaped
//! neighborhood of all three substrate fields.

use bz_lab_core::error::EngineError;
use bz_lab_core::field::Field;
use bz_lab_core::prng::Xorshift64;

use crate::boundary::Boundary;
use crate::mask::DomainMask;

/// Scale applied to each noise sample before it hits the fields. Damps the
/// impact of a single disturbance relative to the configured strength.
const DISTURB_DAMPING: f64 = 0.65;

/// Injects uniform noise in [-strength, strength) into the disk of the given
/// radius around `(row, col)`, across all three fields.
///
/// One sample is drawn per cell of the (2R+1)x(2R+1) bounding box in
/// row-major order, whether or not that cell lands inside the disk, the
/// grid, or the mask. The RNG stream therefore advances by the same amount
/// for every call with the same radius, and the same sample is reused across
/// a, b, and c.
///
/// Coordinate handling follows the boundary policy: under `Wrap` every
/// bounding-box cell maps to a wrapped target; under `Open`/`Clamp` targets
/// outside the grid are discarded. Cells outside the domain mask are also
/// discarded. A disturbance whose every target is discarded leaves the
/// fields bit-for-bit unchanged.
///
/// When `2 * radius + 1` exceeds a grid side under `Wrap`, several
/// bounding-box cells resolve to the same grid cell; each applies its own
/// delta, so duplicate targets accumulate.
///
/// Each surviving cell is updated in place as
/// `v = clip(v + 0.65 * noise, 0, 1)`.
///
/// Returns `EngineError::DimensionMismatch` if the three fields (or the
/// mask) do not share one shape.
#[allow(clippy::too_many_arguments)]
pub fn disturb_fields(
    a: &mut Field,
    b: &mut Field,
    c: &mut Field,
    row: isize,
    col: isize,
    boundary: Boundary,
    mask: Option<&DomainMask>,
    radius: usize,
    strength: f64,
    rng: &mut Xorshift64,
) -> Result<(), EngineError> {
    check_same_shape(a, b)?;
    check_same_shape(a, c)?;
    if let Some(m) = mask {
        m.check_shape(a)?;
    }

    let w = a.width() as isize;
    let h = a.height() as isize;
    let r = radius as isize;

    // Under Wrap any pointer coordinate lands somewhere on the torus.
    let (cr, cc) = match boundary {
        Boundary::Wrap => (row.rem_euclid(h), col.rem_euclid(w)),
        Boundary::Open | Boundary::Clamp => (row, col),
    };

    for dy in -r..=r {
        for dx in -r..=r {
            let noise = rng.next_symmetric(strength);
            if dy * dy + dx * dx > r * r {
                continue;
            }
            let (ty, tx) = (cr + dy, cc + dx);
            let (iy, ix) = match boundary {
                Boundary::Wrap => (ty.rem_euclid(h), tx.rem_euclid(w)),
                Boundary::Open | Boundary::Clamp => {
                    if tx < 0 || tx >= w || ty < 0 || ty >= h {
                        continue;
                    }
                    (ty, tx)
                }
            };
            if let Some(m) = mask {
                if !m.contains(ix as usize, iy as usize) {
                    continue;
                }
            }
            let delta = DISTURB_DAMPING * noise;
            a.set(ix, iy, a.get(ix, iy) + delta);
            b.set(ix, iy, b.get(ix, iy) + delta);
            c.set(ix, iy, c.get(ix, iy) + delta);
        }
    }

    Ok(())
}

fn check_same_shape(lhs: &Field, rhs: &Field) -> Result<(), EngineError> {
    if lhs.width() != rhs.width() || lhs.height() != rhs.height() {
        return Err(EngineError::DimensionMismatch {
            lhs_w: lhs.width(),
            lhs_h: lhs.height(),
            rhs_w: rhs.width(),
            rhs_h: rhs.height(),
        });
    }
    Ok(())
}
