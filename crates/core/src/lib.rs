#![deny(unsafe_code)]
//! Core types and traits for the bz-lab simulation workspace.
//!
//! Provides the `Engine` trait, the `Field` scalar grid, the `EngineError`
//! taxonomy, the `Xorshift64` PRNG, the `Seed` reproducibility record, and
//! JSON parameter helpers shared by every engine crate.

pub mod engine;
pub mod error;
pub mod field;
pub mod params;
pub mod prng;
pub mod seed;

pub use engine::Engine;
pub use error::EngineError;
pub use field::Field;
pub use prng::Xorshift64;
pub use seed::Seed;
