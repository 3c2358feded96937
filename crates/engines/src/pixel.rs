//! Pure-computation pixel buffer conversion from substrate fields.
//!
//! This module is always available (no feature gate) so the PNG snapshot
//! path and any future interactive surface share one conversion. Color maps
//! are a closed enum; each variant blends the three substrate channels into
//! one sRGB color per cell.

use bz_lab_core::error::EngineError;
use bz_lab_core::field::Field;
use bz_lab_core::Engine;

/// All recognized color map names, in display order.
const COLOR_MAP_NAMES: &[&str] = &["soft", "triad", "turbo"];

/// Ten-stop turbo ramp sampled for the `Turbo` map, sRGB in [0, 1].
const TURBO_STOPS: [[f64; 3]; 10] = [
    [48.0 / 255.0, 18.0 / 255.0, 59.0 / 255.0],
    [48.0 / 255.0, 70.0 / 255.0, 139.0 / 255.0],
    [38.0 / 255.0, 129.0 / 255.0, 198.0 / 255.0],
    [34.0 / 255.0, 181.0 / 255.0, 192.0 / 255.0],
    [40.0 / 255.0, 223.0 / 255.0, 140.0 / 255.0],
    [122.0 / 255.0, 245.0 / 255.0, 71.0 / 255.0],
    [211.0 / 255.0, 244.0 / 255.0, 45.0 / 255.0],
    [253.0 / 255.0, 196.0 / 255.0, 53.0 / 255.0],
    [241.0 / 255.0, 93.0 / 255.0, 34.0 / 255.0],
    [133.0 / 255.0, 16.0 / 255.0, 12.0 / 255.0],
];

/// Three-color palette blended by the `Triad` map.
const TRIAD_COLORS: [[f64; 3]; 3] = [
    [29.0 / 255.0, 210.0 / 255.0, 168.0 / 255.0],
    [255.0 / 255.0, 120.0 / 255.0, 104.0 / 255.0],
    [250.0 / 255.0, 207.0 / 255.0, 90.0 / 255.0],
];

/// How the three substrate channels are blended into a display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMap {
    /// Straight channel mapping with a 0.25 floor: r from a, g from c, b from b.
    Soft,
    /// Normalized-weight blend of a fixed three-color palette.
    Triad,
    /// Turbo ramp over `0.6 * mean + 0.4 * spread` of the channels.
    Turbo,
}

impl ColorMap {
    /// Parses a color map from its lowercase name.
    ///
    /// Returns `EngineError::UnknownColorMap` for anything else.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "soft" => Ok(ColorMap::Soft),
            "triad" => Ok(ColorMap::Triad),
            "turbo" => Ok(ColorMap::Turbo),
            other => Err(EngineError::UnknownColorMap(other.to_string())),
        }
    }

    /// The lowercase name of this color map.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMap::Soft => "soft",
            ColorMap::Triad => "triad",
            ColorMap::Turbo => "turbo",
        }
    }

    /// Returns a slice of all recognized color map names.
    pub fn list_names() -> &'static [&'static str] {
        COLOR_MAP_NAMES
    }

    /// Blends one cell's substrate values into sRGB components in [0, 1].
    fn blend(self, a: f64, b: f64, c: f64) -> [f64; 3] {
        match self {
            ColorMap::Soft => [
                0.25 + 0.75 * a,
                0.25 + 0.75 * c,
                0.25 + 0.75 * b,
            ],
            ColorMap::Triad => {
                let total = a + b + c + 1e-6;
                let weights = [a / total, b / total, c / total];
                let mut rgb = [0.0; 3];
                for (weight, color) in weights.iter().zip(TRIAD_COLORS.iter()) {
                    for (out, component) in rgb.iter_mut().zip(color.iter()) {
                        *out += weight * component;
                    }
                }
                rgb
            }
            ColorMap::Turbo => {
                let mean = (a + b + c) / 3.0;
                let spread = (((a - mean).powi(2) + (b - mean).powi(2) + (c - mean).powi(2))
                    / 3.0)
                    .sqrt();
                sample_turbo((0.6 * mean + 0.4 * spread).clamp(0.0, 1.0))
            }
        }
    }
}

/// Linear interpolation along the turbo stops for `t` in [0, 1].
fn sample_turbo(t: f64) -> [f64; 3] {
    let scaled = t * (TURBO_STOPS.len() - 1) as f64;
    let idx = (scaled as usize).min(TURBO_STOPS.len() - 2);
    let frac = scaled - idx as f64;
    let lo = TURBO_STOPS[idx];
    let hi = TURBO_STOPS[idx + 1];
    [
        lo[0] + (hi[0] - lo[0]) * frac,
        lo[1] + (hi[1] - lo[1]) * frac,
        lo[2] + (hi[2] - lo[2]) * frac,
    ]
}

fn push_rgba(buf: &mut Vec<u8>, rgb: [f64; 3]) {
    for component in rgb {
        buf.push((component.clamp(0.0, 1.0) * 255.0).round() as u8);
    }
    buf.push(255);
}

/// Maps three substrate fields through a color map into an RGBA8 buffer.
///
/// The fields must share one shape (they come from a single engine). The
/// buffer length is `width * height * 4` with alpha fixed at 255.
pub fn substrates_to_rgba(a: &Field, b: &Field, c: &Field, map: ColorMap) -> Vec<u8> {
    let mut buf = Vec::with_capacity(a.data().len() * 4);
    for ((&va, &vb), &vc) in a.data().iter().zip(b.data()).zip(c.data()) {
        push_rgba(&mut buf, map.blend(va, vb, vc));
    }
    buf
}

/// Grayscale fallback for engines without substrate channels.
pub fn field_to_rgba(field: &Field) -> Vec<u8> {
    let mut buf = Vec::with_capacity(field.data().len() * 4);
    for &v in field.data() {
        push_rgba(&mut buf, [v, v, v]);
    }
    buf
}

/// Renders an engine's current state through the given color map.
///
/// Uses the substrate triple when the engine exposes one, otherwise the
/// grayscale of the primary field.
pub fn engine_to_rgba(engine: &dyn Engine, map: ColorMap) -> Vec<u8> {
    match engine.substrates() {
        Some([a, b, c]) => substrates_to_rgba(a, b, c, map),
        None => field_to_rgba(engine.field()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_fields(value: f64) -> (Field, Field, Field) {
        (
            Field::filled(4, 4, value).unwrap(),
            Field::filled(4, 4, value).unwrap(),
            Field::filled(4, 4, value).unwrap(),
        )
    }

    // -- Name parsing --

    #[test]
    fn from_name_parses_all_maps() {
        assert_eq!(ColorMap::from_name("soft").unwrap(), ColorMap::Soft);
        assert_eq!(ColorMap::from_name("triad").unwrap(), ColorMap::Triad);
        assert_eq!(ColorMap::from_name("turbo").unwrap(), ColorMap::Turbo);
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert!(matches!(
            ColorMap::from_name("plasma"),
            Err(EngineError::UnknownColorMap(name)) if name == "plasma"
        ));
    }

    #[test]
    fn as_str_round_trips_through_from_name() {
        for &name in ColorMap::list_names() {
            assert_eq!(ColorMap::from_name(name).unwrap().as_str(), name);
        }
    }

    // -- Buffer shape --

    #[test]
    fn substrates_to_rgba_correct_length_and_alpha() {
        let (a, b, c) = constant_fields(0.5);
        let buf = substrates_to_rgba(&a, &b, &c, ColorMap::Soft);
        assert_eq!(buf.len(), 4 * 4 * 4);
        for (i, &byte) in buf.iter().enumerate() {
            if i % 4 == 3 {
                assert_eq!(byte, 255, "alpha at pixel {} should be 255", i / 4);
            }
        }
    }

    #[test]
    fn field_to_rgba_is_grayscale() {
        let field = Field::filled(2, 2, 0.5).unwrap();
        let buf = field_to_rgba(&field);
        assert_eq!(buf.len(), 2 * 2 * 4);
        assert_eq!(buf[0], buf[1]);
        assert_eq!(buf[1], buf[2]);
        assert_eq!(buf[3], 255);
    }

    // -- Soft map --

    #[test]
    fn soft_maps_channels_with_quarter_floor() {
        let a = Field::filled(1, 1, 1.0).unwrap();
        let b = Field::filled(1, 1, 0.0).unwrap();
        let c = Field::filled(1, 1, 0.0).unwrap();
        let buf = substrates_to_rgba(&a, &b, &c, ColorMap::Soft);
        // r = 0.25 + 0.75*a = 1.0; g = 0.25 + 0.75*c = 0.25; b likewise.
        assert_eq!(buf[0], 255);
        assert_eq!(buf[1], 64);
        assert_eq!(buf[2], 64);
    }

    #[test]
    fn soft_green_tracks_substrate_c() {
        let a = Field::filled(1, 1, 0.0).unwrap();
        let b = Field::filled(1, 1, 0.0).unwrap();
        let c = Field::filled(1, 1, 1.0).unwrap();
        let buf = substrates_to_rgba(&a, &b, &c, ColorMap::Soft);
        assert_eq!(buf[0], 64);
        assert_eq!(buf[1], 255);
        assert_eq!(buf[2], 64);
    }

    // -- Triad map --

    #[test]
    fn triad_pure_substrate_yields_its_palette_color() {
        let a = Field::filled(1, 1, 1.0).unwrap();
        let b = Field::filled(1, 1, 0.0).unwrap();
        let c = Field::filled(1, 1, 0.0).unwrap();
        let buf = substrates_to_rgba(&a, &b, &c, ColorMap::Triad);
        // Within rounding of the first triad color (29, 210, 168).
        assert!(buf[0].abs_diff(29) <= 1);
        assert!(buf[1].abs_diff(210) <= 1);
        assert!(buf[2].abs_diff(168) <= 1);
    }

    #[test]
    fn triad_all_zero_substrates_stay_black() {
        let (a, b, c) = constant_fields(0.0);
        let buf = substrates_to_rgba(&a, &b, &c, ColorMap::Triad);
        assert!(buf.iter().enumerate().all(|(i, &v)| i % 4 == 3 || v == 0));
    }

    // -- Turbo map --

    #[test]
    fn turbo_endpoints_hit_first_and_last_stops() {
        let low = sample_turbo(0.0);
        let high = sample_turbo(1.0);
        for i in 0..3 {
            assert!((low[i] - TURBO_STOPS[0][i]).abs() < 1e-12);
            assert!((high[i] - TURBO_STOPS[9][i]).abs() < 1e-12);
        }
    }

    #[test]
    fn turbo_equal_substrates_have_zero_spread() {
        // All channels 0.5: level = 0.6 * 0.5 = 0.3.
        let (a, b, c) = constant_fields(0.5);
        let buf = substrates_to_rgba(&a, &b, &c, ColorMap::Turbo);
        let expected = sample_turbo(0.3);
        assert_eq!(buf[0], (expected[0] * 255.0).round() as u8);
        assert_eq!(buf[1], (expected[1] * 255.0).round() as u8);
        assert_eq!(buf[2], (expected[2] * 255.0).round() as u8);
    }

    // -- Engine dispatch --

    #[test]
    fn engine_to_rgba_uses_substrates_for_bz() {
        let engine =
            crate::EngineKind::from_name("bz", 8, 8, 42, &serde_json::json!({})).unwrap();
        let via_engine = engine_to_rgba(&engine, ColorMap::Soft);
        let [a, b, c] = bz_lab_core::Engine::substrates(&engine).unwrap();
        assert_eq!(via_engine, substrates_to_rgba(a, b, c, ColorMap::Soft));
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_map() -> impl Strategy<Value = ColorMap> {
            prop_oneof![
                Just(ColorMap::Soft),
                Just(ColorMap::Triad),
                Just(ColorMap::Turbo),
            ]
        }

        proptest! {
            #[test]
            fn blend_components_stay_in_unit_interval(
                a in 0.0_f64..=1.0,
                b in 0.0_f64..=1.0,
                c in 0.0_f64..=1.0,
                map in any_map(),
            ) {
                let rgb = map.blend(a, b, c);
                for component in rgb {
                    prop_assert!((0.0..=1.0 + 1e-9).contains(&component));
                }
            }
        }
    }
}
