//! Error types for structured error handling.
//!
//! Every variant names the stage that raised it, so a failed run reports
//! which stage and which condition failed rather than a generic failure.
//!
//! Cells left Missing after a single fill pass are not an error; they are
//! reported through [`FillSummary::residual`](crate::FillSummary).

use thiserror::Error;

/// Errors raised by the Sanitizer, Compositor, and GapFiller stages.
///
/// # Variants
/// - `ShapeMismatch`: Compositor inputs differ in dimensions
/// - `InvalidRange`: Sanitizer range has `fmin > fmax` (or a non-finite bound)
/// - `NoValidSamples`: GapFiller has nothing to interpolate from
/// - `UnknownMethod`: Unrecognised interpolation method name
///
/// # Examples
/// ```
/// use composite_core::FusionError;
///
/// let err = FusionError::ShapeMismatch { left: (2, 3), right: (3, 2) };
/// assert_eq!(
///     format!("{}", err),
///     "Compositor: grid shapes differ (2x3 vs 3x2)"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FusionError {
    /// Compositor invoked with grids of differing dimensions.
    #[error("Compositor: grid shapes differ ({}x{} vs {}x{})", .left.0, .left.1, .right.0, .right.1)]
    ShapeMismatch {
        /// Shape of the first grid (rows, cols)
        left: (usize, usize),
        /// Shape of the second grid (rows, cols)
        right: (usize, usize),
    },

    /// Sanitizer invoked with an unusable valid range.
    #[error("Sanitizer: invalid range [{fmin}, {fmax}], fmin must not exceed fmax")]
    InvalidRange {
        /// Lower bound supplied
        fmin: f64,
        /// Upper bound supplied
        fmax: f64,
    },

    /// GapFiller invoked on a grid with zero valid cells.
    #[error("GapFiller: no valid samples to interpolate {missing} missing cell(s) from")]
    NoValidSamples {
        /// Number of Missing cells that could not be filled
        missing: usize,
    },

    /// Interpolation method name not recognised.
    #[error("GapFiller: unknown interpolation method '{0}', expected linear, nearest or cubic")]
    UnknownMethod(String),
}
