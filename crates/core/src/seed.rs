//! Reproducible specification for a simulation run.
//!
//! A [`Seed`] captures everything needed to replay a run bit-identically:
//! engine name, grid dimensions, parameter overrides, PRNG seed, the
//! disturbances applied to the initial state, and step count. The CLI writes
//! one with `render --save-spec` and consumes it with `replay`.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Reproducible specification for a simulation run.
///
/// Two identical `Seed` values fed to the same binary produce bit-identical
/// output fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub engine: String,
    pub width: usize,
    pub height: usize,
    pub params: serde_json::Value,
    pub seed: u64,
    pub steps: usize,
    /// Disturbances applied to the initial state before stepping, as
    /// (row, col) pairs in application order.
    #[serde(default)]
    pub disturbances: Vec<(isize, isize)>,
}

impl Seed {
    /// Creates a new Seed with default params (`{}`) and steps (`0`).
    pub fn new(engine: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            engine: engine.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            steps: 0,
            disturbances: Vec::new(),
        }
    }

    /// Validates that the seed has non-zero dimensions and that
    /// `width * height` does not overflow.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(())
    }
}
