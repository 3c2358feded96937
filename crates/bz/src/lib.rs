#![deny(unsafe_code)]
//! Belousov-Zhabotinsky style three-substrate cellular automaton.
//!
//! Three concentration fields a, b, c compete cyclically on a 2D grid: each
//! species grows in proportion to its own local average, accelerated by the
//! species it feeds on and suppressed by the species that consumes it. Every
//! step first smooths each field with a boundary-aware 3x3 neighborhood mean,
//! then applies the reaction terms and clips back into [0, 1].
//!
//! The `Bz` engine owns the three fields, the boundary policy, an optional
//! domain mask, and the RNG that drives seeding and disturbances. The pure
//! building blocks (`neighborhood_mean`, `step_fields`, `disturb_fields`)
//! are exported for direct use.

pub mod boundary;
pub mod disturb;
pub mod mask;
pub mod stencil;

pub use boundary::Boundary;
pub use mask::DomainMask;

use bz_lab_core::error::EngineError;
use bz_lab_core::field::Field;
use bz_lab_core::params::{param_f64, param_string, param_usize};
use bz_lab_core::prng::Xorshift64;
use bz_lab_core::Engine;
use serde_json::{json, Value};

use disturb::disturb_fields;
use stencil::neighborhood_mean;

/// Default coupling coefficient for each reaction pair.
const DEFAULT_COEFF: f64 = 1.0;
/// Lower bound of the adjustable coefficient range.
const COEFF_MIN: f64 = 0.4;
/// Upper bound of the adjustable coefficient range.
const COEFF_MAX: f64 = 1.6;
/// Default disturbance disk radius in grid cells.
const DEFAULT_DISTURB_RADIUS: usize = 8;
/// Default maximum disturbance noise amplitude.
const DEFAULT_DISTURB_STRENGTH: f64 = 0.55;

/// Reaction coupling coefficients (alpha, beta, gamma).
///
/// Alpha accelerates a's growth from b, beta accelerates b's growth from c,
/// gamma accelerates c's growth from a; each simultaneously suppresses the
/// species it is consumed by. All three are clamped to [0.4, 1.6].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BzParams {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Default for BzParams {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_COEFF,
            beta: DEFAULT_COEFF,
            gamma: DEFAULT_COEFF,
        }
    }
}

impl BzParams {
    /// Extracts coefficients from a JSON object, falling back to defaults
    /// and clamping each into the adjustable range.
    pub fn from_json(params: &Value) -> Self {
        Self {
            alpha: param_f64(params, "alpha", DEFAULT_COEFF),
            beta: param_f64(params, "beta", DEFAULT_COEFF),
            gamma: param_f64(params, "gamma", DEFAULT_COEFF),
        }
        .clamped()
    }

    /// Returns a copy with every coefficient clamped to [0.4, 1.6].
    pub fn clamped(self) -> Self {
        Self {
            alpha: self.alpha.clamp(COEFF_MIN, COEFF_MAX),
            beta: self.beta.clamp(COEFF_MIN, COEFF_MAX),
            gamma: self.gamma.clamp(COEFF_MIN, COEFF_MAX),
        }
    }
}

/// Advances the three substrate fields by one discrete time unit.
///
/// Each field is smoothed with [`neighborhood_mean`] under the given policy
/// and mask, then updated with the cyclic competition rule:
///
/// ```text
/// a' = clip(avg_a + avg_a * (alpha * avg_b - gamma * avg_c), 0, 1)
/// b' = clip(avg_b + avg_b * (beta  * avg_c - alpha * avg_a), 0, 1)
/// c' = clip(avg_c + avg_c * (gamma * avg_a - beta  * avg_b), 0, 1)
/// ```
///
/// If a mask is present it is re-applied after clipping, so cells outside
/// the admissible region come out exactly 0 regardless of any leakage
/// through the averaging. Pure, deterministic function of its inputs.
///
/// Returns `EngineError::DimensionMismatch` if the fields (or the mask) do
/// not share one shape.
pub fn step_fields(
    a: &Field,
    b: &Field,
    c: &Field,
    params: &BzParams,
    boundary: Boundary,
    mask: Option<&DomainMask>,
) -> Result<(Field, Field, Field), EngineError> {
    check_same_shape(a, b)?;
    check_same_shape(a, c)?;

    let avg_a = neighborhood_mean(a, boundary, mask)?;
    let avg_b = neighborhood_mean(b, boundary, mask)?;
    let avg_c = neighborhood_mean(c, boundary, mask)?;

    let (alpha, beta, gamma) = (params.alpha, params.beta, params.gamma);
    let len = a.data().len();
    let mut next_a = Vec::with_capacity(len);
    let mut next_b = Vec::with_capacity(len);
    let mut next_c = Vec::with_capacity(len);

    for i in 0..len {
        let (aa, ab, ac) = (avg_a.data()[i], avg_b.data()[i], avg_c.data()[i]);
        next_a.push((aa + aa * (alpha * ab - gamma * ac)).clamp(0.0, 1.0));
        next_b.push((ab + ab * (beta * ac - alpha * aa)).clamp(0.0, 1.0));
        next_c.push((ac + ac * (gamma * aa - beta * ab)).clamp(0.0, 1.0));
    }

    let mut next_a = Field::from_data(a.width(), a.height(), next_a)?;
    let mut next_b = Field::from_data(a.width(), a.height(), next_b)?;
    let mut next_c = Field::from_data(a.width(), a.height(), next_c)?;

    if let Some(m) = mask {
        m.apply(&mut next_a)?;
        m.apply(&mut next_b)?;
        m.apply(&mut next_c)?;
    }

    Ok((next_a, next_b, next_c))
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

/// Belousov-Zhabotinsky cellular automaton engine.
///
/// Owns the three substrate fields together with the boundary policy, the
/// optional domain mask, the run-constant disturbance parameters, and the
/// RNG used for seeding and disturbance noise. Stepping is synchronous and
/// single-threaded; callers serialize access.
pub struct Bz {
    a: Field,
    b: Field,
    c: Field,
    params: BzParams,
    boundary: Boundary,
    mask: Option<DomainMask>,
    disturb_radius: usize,
    disturb_strength: f64,
    rng: Xorshift64,
}

impl Bz {
    /// Creates a new engine with three independently seeded uniform-random
    /// fields, Wrap boundary, and no mask.
    ///
    /// Returns `EngineError::InvalidDimensions` if width or height is zero.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        params: BzParams,
    ) -> Result<Self, EngineError> {
        let mut rng = Xorshift64::new(seed);
        let a = Field::random(width, height, &mut rng)?;
        let b = Field::random(width, height, &mut rng)?;
        let c = Field::random(width, height, &mut rng)?;
        Ok(Self {
            a,
            b,
            c,
            params: params.clamped(),
            boundary: Boundary::Wrap,
            mask: None,
            disturb_radius: DEFAULT_DISTURB_RADIUS,
            disturb_strength: DEFAULT_DISTURB_STRENGTH,
            rng,
        })
    }

    /// Creates an engine from a JSON params object.
    ///
    /// Recognized keys: `alpha`, `beta`, `gamma` (clamped to [0.4, 1.6]),
    /// `boundary` (`"wrap"`/`"open"`/`"clamp"`), `mask` (`"none"`/`"disk"`;
    /// unrecognized values fall back to none), `disturb_radius`, and
    /// `disturb_strength`. Selecting the disk mask while Wrap is active
    /// falls back to the Open boundary.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, EngineError> {
        let mut engine = Self::new(width, height, seed, BzParams::from_json(json_params))?;
        engine.boundary = Boundary::from_name(&param_string(json_params, "boundary", "wrap"))?;
        engine.disturb_radius =
            param_usize(json_params, "disturb_radius", DEFAULT_DISTURB_RADIUS);
        engine.disturb_strength =
            param_f64(json_params, "disturb_strength", DEFAULT_DISTURB_STRENGTH);
        if param_string(json_params, "mask", "none") == "disk" {
            engine.set_mask(Some(DomainMask::disk(width, height)?))?;
        }
        Ok(engine)
    }

    /// Read-only access to substrate a.
    pub fn a_field(&self) -> &Field {
        &self.a
    }

    /// Read-only access to substrate b.
    pub fn b_field(&self) -> &Field {
        &self.b
    }

    /// Read-only access to substrate c.
    pub fn c_field(&self) -> &Field {
        &self.c
    }

    /// The active boundary policy.
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// The active domain mask, if any.
    pub fn mask(&self) -> Option<&DomainMask> {
        self.mask.as_ref()
    }

    /// Current coupling coefficients.
    pub fn coefficients(&self) -> BzParams {
        self.params
    }

    /// Replaces the coupling coefficients, clamping each to [0.4, 1.6].
    ///
    /// Coefficients are read fresh on every step, so the change takes effect
    /// on the next `step()` call.
    pub fn set_coefficients(&mut self, alpha: f64, beta: f64, gamma: f64) {
        self.params = BzParams { alpha, beta, gamma }.clamped();
    }

    /// Switches the boundary policy.
    ///
    /// Returns `EngineError::WrapWithMask` if Wrap is requested while a
    /// domain mask is active.
    pub fn set_boundary(&mut self, boundary: Boundary) -> Result<(), EngineError> {
        if self.mask.is_some() && !boundary.supports_mask() {
            return Err(EngineError::WrapWithMask);
        }
        self.boundary = boundary;
        Ok(())
    }

    /// Installs or removes the domain mask.
    ///
    /// Installing a mask while Wrap is active falls back to Open. Cells
    /// outside the new mask are zeroed immediately in all three fields.
    /// Returns `EngineError::DimensionMismatch` if the mask shape differs
    /// from the fields.
    pub fn set_mask(&mut self, mask: Option<DomainMask>) -> Result<(), EngineError> {
        if let Some(m) = &mask {
            m.check_shape(&self.a)?;
            if !self.boundary.supports_mask() {
                self.boundary = Boundary::Open;
            }
            m.apply(&mut self.a)?;
            m.apply(&mut self.b)?;
            m.apply(&mut self.c)?;
        }
        self.mask = mask;
        Ok(())
    }

    /// Re-initializes all three fields from a fresh RNG seeded with `seed`.
    ///
    /// The active mask (if any) is re-applied to the new fields.
    pub fn reseed(&mut self, seed: u64) -> Result<(), EngineError> {
        self.rng = Xorshift64::new(seed);
        self.a = Field::random(self.a.width(), self.a.height(), &mut self.rng)?;
        self.b = Field::random(self.b.width(), self.b.height(), &mut self.rng)?;
        self.c = Field::random(self.c.width(), self.c.height(), &mut self.rng)?;
        if let Some(m) = &self.mask {
            m.apply(&mut self.a)?;
            m.apply(&mut self.b)?;
            m.apply(&mut self.c)?;
        }
        Ok(())
    }
}

impl Engine for Bz {
    fn step(&mut self) -> Result<(), EngineError> {
        let (a, b, c) = step_fields(
            &self.a,
            &self.b,
            &self.c,
            &self.params,
            self.boundary,
            self.mask.as_ref(),
        )?;
        self.a = a;
        self.b = b;
        self.c = c;
        Ok(())
    }

    fn field(&self) -> &Field {
        &self.a
    }

    fn substrates(&self) -> Option<[&Field; 3]> {
        Some([&self.a, &self.b, &self.c])
    }

    fn disturb(&mut self, row: isize, col: isize) -> Result<(), EngineError> {
        disturb_fields(
            &mut self.a,
            &mut self.b,
            &mut self.c,
            row,
            col,
            self.boundary,
            self.mask.as_ref(),
            self.disturb_radius,
            self.disturb_strength,
            &mut self.rng,
        )
    }

    fn params(&self) -> Value {
        json!({
            "alpha": self.params.alpha,
            "beta": self.params.beta,
            "gamma": self.params.gamma,
            "boundary": self.boundary.as_str(),
            "mask": if self.mask.is_some() { "disk" } else { "none" },
            "disturb_radius": self.disturb_radius,
            "disturb_strength": self.disturb_strength,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "alpha": {
                "type": "number",
                "default": DEFAULT_COEFF,
                "min": COEFF_MIN,
                "max": COEFF_MAX,
                "description": "Coupling of a's growth to b (and b's suppression by a)"
            },
            "beta": {
                "type": "number",
                "default": DEFAULT_COEFF,
                "min": COEFF_MIN,
                "max": COEFF_MAX,
                "description": "Coupling of b's growth to c (and c's suppression by b)"
            },
            "gamma": {
                "type": "number",
                "default": DEFAULT_COEFF,
                "min": COEFF_MIN,
                "max": COEFF_MAX,
                "description": "Coupling of c's growth to a (and a's suppression by c)"
            },
            "boundary": {
                "type": "string",
                "default": "wrap",
                "options": Boundary::list_names(),
                "description": "Neighborhood treatment at grid edges"
            },
            "mask": {
                "type": "string",
                "default": "none",
                "options": ["none", "disk"],
                "description": "Optional admissible sub-region (disk forces open boundary)"
            },
            "disturb_radius": {
                "type": "integer",
                "default": DEFAULT_DISTURB_RADIUS,
                "min": 1,
                "max": 64,
                "description": "Disturbance disk radius in grid cells"
            },
            "disturb_strength": {
                "type": "number",
                "default": DEFAULT_DISTURB_STRENGTH,
                "min": 0.0,
                "max": 1.0,
                "description": "Maximum disturbance noise amplitude"
            }
        })
    }
}
