//! Inclusive measurement range.

use super::FusionError;

/// Closed interval `[fmin, fmax]` of acceptable measurement values.
///
/// Both bounds are inclusive: a value equal to `fmin` or `fmax` is valid.
///
/// # Example
///
/// ```
/// use composite_core::ValidRange;
///
/// let range = ValidRange::default();
/// assert_eq!((range.fmin(), range.fmax()), (-32.0, 64.0));
/// assert!(range.contains(-32.0));
/// assert!(!range.contains(64.5));
///
/// assert!(ValidRange::new(10.0, -10.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRange {
    fmin: f64,
    fmax: f64,
}

impl ValidRange {
    /// Default lower bound for reflectivity grids.
    pub const DEFAULT_FMIN: f64 = -32.0;
    /// Default upper bound for reflectivity grids.
    pub const DEFAULT_FMAX: f64 = 64.0;

    /// Construct a range, rejecting `fmin > fmax` and non-finite bounds.
    pub fn new(fmin: f64, fmax: f64) -> Result<Self, FusionError> {
        if !fmin.is_finite() || !fmax.is_finite() || fmin > fmax {
            return Err(FusionError::InvalidRange { fmin, fmax });
        }
        Ok(Self { fmin, fmax })
    }

    /// Lower bound.
    #[inline]
    pub fn fmin(&self) -> f64 {
        self.fmin
    }

    /// Upper bound.
    #[inline]
    pub fn fmax(&self) -> f64 {
        self.fmax
    }

    /// Whether `value` lies within the closed interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.fmin && value <= self.fmax
    }
}

impl Default for ValidRange {
    fn default() -> Self {
        Self {
            fmin: Self::DEFAULT_FMIN,
            fmax: Self::DEFAULT_FMAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        let range = ValidRange::new(-1.0, 1.0).unwrap();
        assert!(range.contains(-1.0));
        assert!(range.contains(1.0));
        assert!(range.contains(0.0));
        assert!(!range.contains(-1.0001));
        assert!(!range.contains(1.0001));
    }

    #[test]
    fn test_degenerate_range_allowed() {
        let range = ValidRange::new(5.0, 5.0).unwrap();
        assert!(range.contains(5.0));
        assert!(!range.contains(4.0));
    }

    #[test]
    fn test_inverted_range_rejected() {
        match ValidRange::new(64.0, -32.0) {
            Err(FusionError::InvalidRange { fmin, fmax }) => {
                assert_eq!(fmin, 64.0);
                assert_eq!(fmax, -32.0);
            }
            other => panic!("Expected InvalidRange, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        assert!(ValidRange::new(f64::NAN, 1.0).is_err());
        assert!(ValidRange::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_nan_is_never_contained() {
        assert!(!ValidRange::default().contains(f64::NAN));
    }
}
