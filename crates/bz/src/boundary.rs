//! Boundary policy: how the 3x3 neighborhood behaves at grid edges.

use bz_lab_core::error::EngineError;

/// All recognized boundary policy names, in display order.
const BOUNDARY_NAMES: &[&str] = &["wrap", "open", "clamp"];

/// Rule for handling neighbor lookups at grid edges.
///
/// - `Wrap`: toroidal indexing; the window wraps around both axes.
/// - `Open`: out-of-range neighbors contribute 0 and the mean is taken over
///   the in-bounds cells only.
/// - `Clamp`: out-of-range neighbors contribute 0 but the mean always
///   divides by the full window size of 9, biasing edge cells toward 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Wrap,
    Open,
    Clamp,
}

impl Boundary {
    /// Parses a boundary policy from its lowercase name.
    ///
    /// Returns `EngineError::UnknownBoundary` for anything else.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "wrap" => Ok(Boundary::Wrap),
            "open" => Ok(Boundary::Open),
            "clamp" => Ok(Boundary::Clamp),
            other => Err(EngineError::UnknownBoundary(other.to_string())),
        }
    }

    /// The lowercase name of this policy.
    pub fn as_str(self) -> &'static str {
        match self {
            Boundary::Wrap => "wrap",
            Boundary::Open => "open",
            Boundary::Clamp => "clamp",
        }
    }

    /// Returns a slice of all recognized boundary policy names.
    pub fn list_names() -> &'static [&'static str] {
        BOUNDARY_NAMES
    }

    /// Whether a domain mask may be combined with this policy.
    ///
    /// Toroidal wrapping would carry values across the masked-out rim, so
    /// Wrap excludes masks.
    pub fn supports_mask(self) -> bool {
        !matches!(self, Boundary::Wrap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_parses_all_policies() {
        assert_eq!(Boundary::from_name("wrap").unwrap(), Boundary::Wrap);
        assert_eq!(Boundary::from_name("open").unwrap(), Boundary::Open);
        assert_eq!(Boundary::from_name("clamp").unwrap(), Boundary::Clamp);
    }

    #[test]
    fn from_name_rejects_unknown() {
        let result = Boundary::from_name("mirror");
        assert!(matches!(result, Err(EngineError::UnknownBoundary(name)) if name == "mirror"));
    }

    #[test]
    fn from_name_is_case_sensitive() {
        assert!(Boundary::from_name("Wrap").is_err());
    }

    #[test]
    fn as_str_round_trips_through_from_name() {
        for &name in Boundary::list_names() {
            let policy = Boundary::from_name(name).unwrap();
            assert_eq!(policy.as_str(), name);
        }
    }

    #[test]
    fn list_names_covers_all_three() {
        assert_eq!(Boundary::list_names(), &["wrap", "open", "clamp"]);
    }

    #[test]
    fn only_wrap_excludes_masks() {
        assert!(!Boundary::Wrap.supports_mask());
        assert!(Boundary::Open.supports_mask());
        assert!(Boundary::Clamp.supports_mask());
    }
}
