//! Interpolation method selector for the GapFiller.

use super::FusionError;
use std::fmt;
use std::str::FromStr;

/// Strategy for estimating Missing cells from surrounding valid cells.
///
/// `Linear` and `Cubic` are limited to the convex hull of the valid
/// samples; `Nearest` always produces a value. The usual workflow is a
/// `Linear` pass followed by a `Nearest` pass over its result.
///
/// # Examples
/// ```
/// use composite_core::InterpolationMethod;
///
/// let method: InterpolationMethod = "Nearest".parse().unwrap();
/// assert_eq!(method, InterpolationMethod::Nearest);
/// assert_eq!(method.to_string(), "nearest");
/// assert!(!InterpolationMethod::Linear.covers_everything());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InterpolationMethod {
    /// Barycentric interpolation on a Delaunay triangulation
    #[default]
    Linear,
    /// Value of the closest valid sample
    Nearest,
    /// Clough-Tocher piecewise cubic on a Delaunay triangulation
    Cubic,
}

impl InterpolationMethod {
    /// Lowercase method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationMethod::Linear => "linear",
            InterpolationMethod::Nearest => "nearest",
            InterpolationMethod::Cubic => "cubic",
        }
    }

    /// Whether a single pass with this method leaves no cell Missing.
    pub fn covers_everything(&self) -> bool {
        matches!(self, InterpolationMethod::Nearest)
    }
}

impl FromStr for InterpolationMethod {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(InterpolationMethod::Linear),
            "nearest" => Ok(InterpolationMethod::Nearest),
            "cubic" => Ok(InterpolationMethod::Cubic),
            _ => Err(FusionError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(
            InterpolationMethod::from_str("LINEAR").unwrap(),
            InterpolationMethod::Linear
        );
        assert_eq!(
            InterpolationMethod::from_str(" cubic ").unwrap(),
            InterpolationMethod::Cubic
        );
        assert_eq!(
            InterpolationMethod::from_str("nearest").unwrap(),
            InterpolationMethod::Nearest
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            InterpolationMethod::from_str("quintic"),
            Err(FusionError::UnknownMethod("quintic".to_string()))
        );
    }

    #[test]
    fn test_display_matches_parse() {
        for method in [
            InterpolationMethod::Linear,
            InterpolationMethod::Nearest,
            InterpolationMethod::Cubic,
        ] {
            assert_eq!(method.to_string().parse::<InterpolationMethod>(), Ok(method));
        }
    }
}
