//! Triangulated samples shared by the linear and cubic interpolators.

use ndarray::Array2;

use crate::math::triangulation::{orient, LatticePoint, Triangulation};
use crate::types::Sample;

/// A query cell resolved to its enclosing triangle.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Location {
    pub triangle: usize,
    pub vertices: [usize; 3],
    /// Unnormalized barycentric weights; they sum to `area`.
    pub weights: [i64; 3],
    /// Twice the triangle area, always positive.
    pub area: i64,
}

impl Location {
    /// Normalized barycentric coordinates.
    pub fn barycentric(&self) -> [f64; 3] {
        let area = self.area as f64;
        self.weights.map(|w| w as f64 / area)
    }
}

/// Delaunay triangulation of the sample positions with a per-cell locator.
#[derive(Debug, Clone)]
pub(crate) struct TriangleMesh {
    triangulation: Triangulation,
    values: Vec<f64>,
    located: Array2<Option<usize>>,
}

impl TriangleMesh {
    pub fn new(samples: &[Sample], shape: (usize, usize)) -> Self {
        let points: Vec<LatticePoint> = samples
            .iter()
            .map(|s| [s.row as i64, s.col as i64])
            .collect();
        let values = samples.iter().map(|s| s.value).collect();
        let triangulation = Triangulation::new(&points);
        let located = triangulation.locate_cells(shape.0, shape.1);

        tracing::debug!(
            samples = samples.len(),
            triangles = triangulation.len(),
            "triangulated samples"
        );

        Self {
            triangulation,
            values,
            located,
        }
    }

    #[inline]
    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn point(&self, vertex: usize) -> LatticePoint {
        self.triangulation.points()[vertex]
    }

    /// Resolve `(row, col)` to its triangle, or `None` outside the hull.
    pub fn locate(&self, row: usize, col: usize) -> Option<Location> {
        let triangle = (*self.located.get((row, col))?)?;
        let vertices = self.triangulation.triangle(triangle);
        let [a, b, c] = vertices.map(|v| self.point(v));
        let q = [row as i64, col as i64];
        Some(Location {
            triangle,
            vertices,
            weights: [orient(b, c, q), orient(c, a, q), orient(a, b, q)],
            area: orient(a, b, c),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_locate_weights_sum_to_area() {
        let samples = [
            Sample::new(0, 0, 1.0),
            Sample::new(0, 6, 2.0),
            Sample::new(6, 0, 3.0),
        ];
        let mesh = TriangleMesh::new(&samples, (7, 7));
        let hit = mesh.locate(2, 3).expect("inside the hull");
        assert_eq!(hit.weights.iter().sum::<i64>(), hit.area);
        assert!(hit.weights.iter().all(|&w| w >= 0));

        let b = hit.barycentric();
        assert_relative_eq!(b.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_locate_vertex_has_unit_weight() {
        let samples = [
            Sample::new(0, 0, 1.0),
            Sample::new(0, 6, 2.0),
            Sample::new(6, 0, 3.0),
        ];
        let mesh = TriangleMesh::new(&samples, (7, 7));
        let hit = mesh.locate(0, 6).expect("vertex");
        let k = hit
            .vertices
            .iter()
            .position(|&v| mesh.point(v) == [0, 6])
            .expect("vertex present");
        assert_eq!(hit.weights[k], hit.area);
    }

    #[test]
    fn test_locate_outside_and_out_of_bounds() {
        let samples = [
            Sample::new(0, 0, 1.0),
            Sample::new(0, 2, 2.0),
            Sample::new(2, 0, 3.0),
        ];
        let mesh = TriangleMesh::new(&samples, (3, 3));
        assert!(mesh.locate(2, 2).is_none());
        assert!(mesh.locate(10, 10).is_none());
    }
}
