//! CPU-side PNG rendering of an engine's current state.
//!
//! Feature-gated behind `png` (default on) so headless consumers can depend
//! on this crate without pulling in the `image` crate. The pixel conversion
//! itself lives in [`crate::pixel`] (always available).

use bz_lab_core::error::EngineError;
use bz_lab_core::Engine;
use std::path::Path;

use crate::pixel::{engine_to_rgba, ColorMap};

/// Writes an engine's current state as a PNG image.
///
/// Three-substrate engines are blended through the given color map; other
/// engines fall back to a grayscale of their primary field. Returns
/// `EngineError::InvalidDimensions` if the field dimensions overflow `u32`,
/// or `EngineError::Io` on write failure.
pub fn write_png(engine: &dyn Engine, map: ColorMap, path: &Path) -> Result<(), EngineError> {
    let rgba = engine_to_rgba(engine, map);
    let w = u32::try_from(engine.field().width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(engine.field().height()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}
