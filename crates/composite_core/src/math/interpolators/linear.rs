//! Piecewise linear interpolation on a Delaunay triangulation.

use super::mesh::TriangleMesh;
use super::ScatteredInterpolator;
use crate::types::Sample;

/// Barycentric interpolation inside the convex hull of the samples.
///
/// Within each Delaunay triangle the estimate is the plane through its three
/// sample values. Cells outside the hull are left unestimated, as are all
/// cells when the samples are collinear or fewer than three.
///
/// # Example
///
/// ```
/// use composite_core::math::interpolators::{LinearInterpolator, ScatteredInterpolator};
/// use composite_core::Sample;
///
/// let samples = [
///     Sample::new(0, 0, 10.0),
///     Sample::new(0, 2, 20.0),
///     Sample::new(2, 0, 30.0),
/// ];
/// let interp = LinearInterpolator::new(&samples, (3, 3));
/// assert_eq!(interp.estimate(0, 1), Some(15.0));
/// assert_eq!(interp.estimate(2, 2), None);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    mesh: TriangleMesh,
}

impl LinearInterpolator {
    /// Triangulate `samples` on a grid of `shape`.
    pub fn new(samples: &[Sample], shape: (usize, usize)) -> Self {
        Self {
            mesh: TriangleMesh::new(samples, shape),
        }
    }
}

impl ScatteredInterpolator for LinearInterpolator {
    fn estimate(&self, row: usize, col: usize) -> Option<f64> {
        let hit = self.mesh.locate(row, col)?;
        let values = self.mesh.values();
        let [a, b, c] = hit.vertices.map(|v| values[v]);
        let [_, wb, wc] = hit.weights;

        // Offsets from the first vertex keep uniform fields exact.
        Some(a + ((b - a) * wb as f64 + (c - a) * wc as f64) / hit.area as f64)
    }
}
