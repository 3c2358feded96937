#![deny(unsafe_code)]
//! Engine registry: maps engine names to implementations and provides
//! CPU-side snapshot rendering.
//!
//! This crate sits between `bz-lab-core` (which defines the `Engine` trait)
//! and the kernel crates (`bz-lab-bz`). The CLI depends on this crate so
//! dispatch and rendering logic live in one place.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use bz_lab_core::error::EngineError;
use bz_lab_core::field::Field;
use bz_lab_core::Engine;
use serde_json::Value;

/// All available engine names.
const ENGINE_NAMES: &[&str] = &["bz"];

/// Enumeration of all available simulation engines.
///
/// Wraps each engine implementation and delegates `Engine` trait methods.
/// Use [`EngineKind::from_name`] for string-based construction (CLI).
pub enum EngineKind {
    /// Belousov-Zhabotinsky three-substrate cellular automaton.
    Bz(bz_lab_bz::Bz),
}

impl EngineKind {
    /// Constructs an engine by name.
    ///
    /// Returns `EngineError::UnknownEngine` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EngineError> {
        match name {
            "bz" => Ok(EngineKind::Bz(bz_lab_bz::Bz::from_json(
                width, height, seed, params,
            )?)),
            _ => Err(EngineError::UnknownEngine(name.to_string())),
        }
    }

    /// Returns a slice of all recognized engine names.
    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }
}

impl Engine for EngineKind {
    fn step(&mut self) -> Result<(), EngineError> {
        match self {
            EngineKind::Bz(e) => e.step(),
        }
    }

    fn field(&self) -> &Field {
        match self {
            EngineKind::Bz(e) => e.field(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::Bz(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::Bz(e) => e.param_schema(),
        }
    }

    fn substrates(&self) -> Option<[&Field; 3]> {
        match self {
            EngineKind::Bz(e) => e.substrates(),
        }
    }

    fn disturb(&mut self, row: isize, col: isize) -> Result<(), EngineError> {
        match self {
            EngineKind::Bz(e) => e.disturb(row, col),
        }
    }
}
