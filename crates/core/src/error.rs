//! Error types shared across the bz-lab workspace.

use thiserror::Error;

/// Errors produced by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero (or overflowed) when creating a Field or mask.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Two grids had incompatible dimensions for an element-wise operation.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// Wrap boundary requested while a domain mask is active.
    #[error("wrap boundary cannot be combined with a domain mask")]
    WrapWithMask,

    /// A boundary policy name was not recognized.
    #[error("unknown boundary policy: {0}")]
    UnknownBoundary(String),

    /// An engine name was not recognized by the registry.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// A color map name was not recognized.
    #[error("unknown color map: {0}")]
    UnknownColorMap(String),

    /// An I/O failure (snapshot write, spec file read).
    #[error("i/o error: {0}")]
    Io(String),
}
