//! Helpers for extracting typed parameters from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or has the wrong type, the default is returned. These never fail.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- param_f64 --

    #[test]
    fn param_f64_extracts_existing_float() {
        let params = json!({"alpha": 1.2});
        assert!((param_f64(&params, "alpha", 1.0) - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"gamma": 1});
        assert!((param_f64(&params, "gamma", 0.4) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_key_missing() {
        let params = json!({"alpha": 1.0});
        assert!((param_f64(&params, "beta", 0.9) - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_wrong_type() {
        let params = json!({"alpha": "strong"});
        assert!((param_f64(&params, "alpha", 1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_for_non_object() {
        let params = json!("not an object");
        assert!((param_f64(&params, "alpha", 0.7) - 0.7).abs() < f64::EPSILON);
    }

    // -- param_usize --

    #[test]
    fn param_usize_extracts_existing_integer() {
        let params = json!({"disturb_radius": 12});
        assert_eq!(param_usize(&params, "disturb_radius", 8), 12);
    }

    #[test]
    fn param_usize_returns_default_when_key_missing() {
        assert_eq!(param_usize(&json!({}), "disturb_radius", 8), 8);
    }

    #[test]
    fn param_usize_returns_default_for_float_value() {
        let params = json!({"disturb_radius": 2.5});
        assert_eq!(param_usize(&params, "disturb_radius", 8), 8);
    }

    #[test]
    fn param_usize_returns_default_for_negative_integer() {
        let params = json!({"disturb_radius": -1});
        assert_eq!(param_usize(&params, "disturb_radius", 8), 8);
    }

    // -- param_string --

    #[test]
    fn param_string_extracts_existing_string() {
        let params = json!({"boundary": "open"});
        assert_eq!(param_string(&params, "boundary", "wrap"), "open");
    }

    #[test]
    fn param_string_returns_default_when_key_missing() {
        assert_eq!(param_string(&json!({}), "boundary", "wrap"), "wrap");
    }

    #[test]
    fn param_string_returns_default_for_wrong_type() {
        let params = json!({"boundary": 3});
        assert_eq!(param_string(&params, "boundary", "wrap"), "wrap");
    }

    #[test]
    fn param_string_handles_empty_string_value() {
        let params = json!({"mask": ""});
        assert_eq!(param_string(&params, "mask", "none"), "");
    }
}
