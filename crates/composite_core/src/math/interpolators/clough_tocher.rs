//! Clough-Tocher C¹ piecewise cubic interpolation.
//!
//! Each Delaunay triangle is split at its centroid into three cubic Bézier
//! patches. Control points come from the sample values and from vertex
//! gradients estimated by minimizing the curvature of the whole surface.
//! Along an edge shared by two triangles the cross-boundary derivative is
//! forced to vary linearly, which makes the surface C¹ everywhere inside
//! the convex hull.

use tracing::{debug, warn};

use super::mesh::TriangleMesh;
use super::ScatteredInterpolator;
use crate::math::triangulation::{LatticePoint, Triangulation};
use crate::types::Sample;

type Vec2 = [f64; 2];

#[inline]
fn to_vec2(p: LatticePoint) -> Vec2 {
    [p[0] as f64, p[1] as f64]
}

#[inline]
fn sub(a: Vec2, b: Vec2) -> Vec2 {
    [a[0] - b[0], a[1] - b[1]]
}

#[inline]
fn dot(a: Vec2, b: Vec2) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

/// Barycentric coordinates of `q` in the triangle `(a, b, c)`.
fn barycentric(a: Vec2, b: Vec2, c: Vec2, q: Vec2) -> [f64; 3] {
    let det = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
    let l1 = ((q[0] - a[0]) * (c[1] - a[1]) - (q[1] - a[1]) * (c[0] - a[0])) / det;
    let l2 = ((b[0] - a[0]) * (q[1] - a[1]) - (b[1] - a[1]) * (q[0] - a[0])) / det;
    [1.0 - l1 - l2, l1, l2]
}

/// Clough-Tocher interpolation inside the convex hull of the samples.
///
/// Exact at sample positions and reproduces linear fields up to the
/// gradient estimation tolerance. Cells outside the hull are left
/// unestimated.
///
/// # Example
///
/// ```
/// use composite_core::math::interpolators::{CloughTocherInterpolator, ScatteredInterpolator};
/// use composite_core::Sample;
///
/// let samples = [
///     Sample::new(0, 0, 1.0),
///     Sample::new(0, 4, 5.0),
///     Sample::new(4, 0, 9.0),
///     Sample::new(4, 4, 13.0),
/// ];
/// let interp = CloughTocherInterpolator::new(&samples, (5, 5));
/// let v = interp.estimate(2, 2).unwrap();
/// assert!((v - 7.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct CloughTocherInterpolator {
    mesh: TriangleMesh,
    gradients: Vec<Vec2>,
}

impl CloughTocherInterpolator {
    /// Convergence threshold on the relative gradient change per sweep.
    pub const TOLERANCE: f64 = 1e-6;
    /// Maximum number of Gauss-Seidel sweeps in gradient estimation.
    pub const MAX_SWEEPS: usize = 400;

    /// Triangulate `samples` and estimate the vertex gradients.
    pub fn new(samples: &[Sample], shape: (usize, usize)) -> Self {
        let mesh = TriangleMesh::new(samples, shape);
        let gradients = estimate_gradients(
            mesh.triangulation(),
            mesh.values(),
            Self::TOLERANCE,
            Self::MAX_SWEEPS,
        );
        Self { mesh, gradients }
    }

    /// Estimated `(∂/∂row, ∂/∂col)` at each sample, in sample order.
    pub fn gradients(&self) -> &[[f64; 2]] {
        &self.gradients
    }

    /// Evaluate the patch of triangle `t` at barycentric coordinates `b`.
    fn evaluate(&self, t: usize, b: [f64; 3]) -> f64 {
        let tri = self.mesh.triangulation();
        let vertices = tri.triangle(t);
        let [x1, x2, x3] = vertices.map(|v| to_vec2(self.mesh.point(v)));
        let [f1, f2, f3] = vertices.map(|v| self.mesh.values()[v]);
        let [g1, g2, g3] = vertices.map(|v| self.gradients[v]);

        let e12 = sub(x2, x1);
        let e23 = sub(x3, x2);
        let e31 = sub(x1, x3);

        // Directional derivatives along the edges
        let df12 = dot(g1, e12);
        let df21 = -dot(g2, e12);
        let df23 = dot(g2, e23);
        let df32 = -dot(g3, e23);
        let df31 = dot(g3, e31);
        let df13 = -dot(g1, e31);

        let c3000 = f1;
        let c2100 = (df12 + 3.0 * c3000) / 3.0;
        let c2010 = (df13 + 3.0 * c3000) / 3.0;
        let c0300 = f2;
        let c1200 = (df21 + 3.0 * c0300) / 3.0;
        let c0210 = (df23 + 3.0 * c0300) / 3.0;
        let c0030 = f3;
        let c1020 = (df31 + 3.0 * c0030) / 3.0;
        let c0120 = (df32 + 3.0 * c0030) / 3.0;

        let c2001 = (c2100 + c2010 + c3000) / 3.0;
        let c0201 = (c1200 + c0300 + c0210) / 3.0;
        let c0021 = (c1020 + c0120 + c0030) / 3.0;

        let g = self.edge_factors(tri, t, [x1, x2, x3]);

        let c0111 = (g[0] * (-c0300 + 3.0 * c0210 - 3.0 * c0120 + c0030)
            + (-c0300 + 2.0 * c0210 - c0120 + c0021 + c0201))
            / 2.0;
        let c1011 = (g[1] * (-c0030 + 3.0 * c1020 - 3.0 * c2010 + c3000)
            + (-c0030 + 2.0 * c1020 - c2010 + c2001 + c0021))
            / 2.0;
        let c1101 = (g[2] * (-c3000 + 3.0 * c2100 - 3.0 * c1200 + c0300)
            + (-c3000 + 2.0 * c2100 - c1200 + c2001 + c0201))
            / 2.0;

        let c1002 = (c1101 + c1011 + c2001) / 3.0;
        let c0102 = (c1101 + c0111 + c0201) / 3.0;
        let c0012 = (c1011 + c0111 + c0021) / 3.0;

        let c0003 = (c1002 + c0102 + c0012) / 3.0;

        // Coordinates within the micro-triangle; one of b1, b2, b3 is zero
        let minval = b[0].min(b[1]).min(b[2]);
        let b1 = b[0] - minval;
        let b2 = b[1] - minval;
        let b3 = b[2] - minval;
        let b4 = 3.0 * minval;

        b1.powi(3) * c3000
            + 3.0 * b1 * b1 * b2 * c2100
            + 3.0 * b1 * b1 * b3 * c2010
            + 3.0 * b1 * b1 * b4 * c2001
            + 3.0 * b1 * b2 * b2 * c1200
            + 6.0 * b1 * b2 * b4 * c1101
            + 3.0 * b1 * b3 * b3 * c1020
            + 6.0 * b1 * b3 * b4 * c1011
            + 3.0 * b1 * b4 * b4 * c1002
            + b2.powi(3) * c0300
            + 3.0 * b2 * b2 * b3 * c0210
            + 3.0 * b2 * b2 * b4 * c0201
            + 3.0 * b2 * b3 * b3 * c0120
            + 6.0 * b2 * b3 * b4 * c0111
            + 3.0 * b2 * b4 * b4 * c0102
            + b3.powi(3) * c0030
            + 3.0 * b3 * b3 * b4 * c0021
            + 3.0 * b3 * b4 * b4 * c0012
            + b4.powi(3) * c0003
    }

    /// Per-edge factors making the cross-boundary derivative linear.
    ///
    /// Edge `k` is the one opposite vertex `k`. Hull edges take `-1/2`.
    fn edge_factors(&self, tri: &Triangulation, t: usize, corners: [Vec2; 3]) -> [f64; 3] {
        let [x1, x2, x3] = corners;
        let mut g = [-0.5; 3];
        for (k, factor) in g.iter_mut().enumerate() {
            let Some(u) = tri.neighbor(t, k) else {
                continue;
            };
            let [p, q, r] = tri.triangle(u).map(|v| to_vec2(self.mesh.point(v)));
            let centroid = [(p[0] + q[0] + r[0]) / 3.0, (p[1] + q[1] + r[1]) / 3.0];
            let c = barycentric(x1, x2, x3, centroid);

            *factor = match k {
                0 => (2.0 * c[2] + c[1] - 1.0) / (2.0 - 3.0 * c[2] - 3.0 * c[1]),
                1 => (2.0 * c[0] + c[2] - 1.0) / (2.0 - 3.0 * c[0] - 3.0 * c[2]),
                _ => (2.0 * c[1] + c[0] - 1.0) / (2.0 - 3.0 * c[1] - 3.0 * c[0]),
            };
        }
        g
    }
}

impl ScatteredInterpolator for CloughTocherInterpolator {
    fn estimate(&self, row: usize, col: usize) -> Option<f64> {
        let hit = self.mesh.locate(row, col)?;
        Some(self.evaluate(hit.triangle, hit.barycentric()))
    }
}

/// Estimate vertex gradients by global curvature minimization.
///
/// Each vertex gradient is solved against the current gradients of its
/// neighbours (Gauss-Seidel) until the largest relative change in a sweep
/// drops below `tol`. Vertices with a singular neighbourhood keep a zero
/// gradient.
fn estimate_gradients(
    tri: &Triangulation,
    values: &[f64],
    tol: f64,
    max_sweeps: usize,
) -> Vec<Vec2> {
    let points = tri.points();
    let mut gradients = vec![[0.0; 2]; points.len()];
    if tri.is_empty() {
        return gradients;
    }
    let neighbors = tri.vertex_neighbors();

    for sweep in 0..max_sweeps {
        let mut err: f64 = 0.0;

        for i in 0..points.len() {
            let xi = to_vec2(points[i]);
            // Symmetric 2x2 system: [qxx, qxy, qyy]
            let mut q = [0.0; 3];
            let mut s = [0.0; 2];

            for &j in &neighbors[i] {
                let e = sub(to_vec2(points[j]), xi);
                let l3 = dot(e, e).sqrt().powi(3);
                let df2 = -dot(e, gradients[j]);
                let w = 6.0 * (values[i] - values[j]) - 2.0 * df2;

                q[0] += 4.0 * e[0] * e[0] / l3;
                q[1] += 4.0 * e[0] * e[1] / l3;
                q[2] += 4.0 * e[1] * e[1] / l3;
                s[0] += w * e[0] / l3;
                s[1] += w * e[1] / l3;
            }

            let det = q[0] * q[2] - q[1] * q[1];
            if det == 0.0 {
                continue;
            }
            let r = [
                (q[2] * s[0] - q[1] * s[1]) / det,
                (-q[1] * s[0] + q[0] * s[1]) / det,
            ];

            let change = (gradients[i][0] + r[0])
                .abs()
                .max((gradients[i][1] + r[1]).abs())
                / r[0].abs().max(r[1].abs()).max(1.0);
            gradients[i] = [-r[0], -r[1]];
            err = err.max(change);
        }

        if err < tol {
            debug!(sweeps = sweep + 1, "gradient estimation converged");
            return gradients;
        }
    }

    warn!(
        max_sweeps,
        "gradient estimation did not converge, cubic estimates may be inaccurate"
    );
    gradients
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn lattice_samples(
        rows: usize,
        cols: usize,
        step: usize,
        f: impl Fn(f64, f64) -> f64,
    ) -> Vec<Sample> {
        let mut samples = Vec::new();
        for r in (0..rows).step_by(step) {
            for c in (0..cols).step_by(step) {
                samples.push(Sample::new(r, c, f(r as f64, c as f64)));
            }
        }
        samples
    }

    #[test]
    fn test_barycentric_of_vertices_and_centroid() {
        let (a, b, c) = ([0.0, 0.0], [3.0, 0.0], [0.0, 3.0]);
        assert_eq!(barycentric(a, b, c, a), [1.0, 0.0, 0.0]);
        assert_eq!(barycentric(a, b, c, b), [0.0, 1.0, 0.0]);
        let centroid = barycentric(a, b, c, [1.0, 1.0]);
        for v in centroid {
            assert_relative_eq!(v, 1.0 / 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gradients_of_linear_field() {
        let samples = lattice_samples(9, 9, 2, |r, c| 2.0 * r - 3.0 * c + 1.0);
        let interp = CloughTocherInterpolator::new(&samples, (9, 9));
        for g in interp.gradients() {
            assert_relative_eq!(g[0], 2.0, epsilon = 1e-3);
            assert_relative_eq!(g[1], -3.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_reproduces_linear_field() {
        let f = |r: f64, c: f64| 0.5 * r + 1.25 * c - 7.0;
        let samples = lattice_samples(11, 11, 2, f);
        let interp = CloughTocherInterpolator::new(&samples, (11, 11));
        for row in 0..11 {
            for col in 0..11 {
                let v = interp.estimate(row, col).expect("inside hull");
                assert_relative_eq!(v, f(row as f64, col as f64), epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_exact_at_samples() {
        let samples = lattice_samples(7, 7, 3, |r, c| (r * 0.7).sin() + c * c / 10.0);
        let interp = CloughTocherInterpolator::new(&samples, (7, 7));
        for s in &samples {
            let v = interp.estimate(s.row, s.col).expect("sample is a vertex");
            assert_relative_eq!(v, s.value, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_constant_field() {
        let samples = lattice_samples(6, 6, 5, |_, _| 21.0);
        let interp = CloughTocherInterpolator::new(&samples, (6, 6));
        for g in interp.gradients() {
            assert_eq!(*g, [0.0, 0.0]);
        }
        for row in 0..6 {
            for col in 0..6 {
                let v = interp.estimate(row, col).expect("inside hull");
                assert_relative_eq!(v, 21.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_smooth_field_is_close() {
        let f = |r: f64, c: f64| (r / 6.0).sin() * (c / 8.0).cos() * 10.0;
        let samples = lattice_samples(25, 25, 2, f);
        let interp = CloughTocherInterpolator::new(&samples, (25, 25));
        for (row, col) in [(5, 7), (11, 13), (17, 3), (21, 21)] {
            let v = interp.estimate(row, col).expect("inside hull");
            assert_relative_eq!(v, f(row as f64, col as f64), epsilon = 0.1);
        }
    }

    #[test]
    fn test_outside_hull_and_degenerate() {
        let samples = [
            Sample::new(0, 0, 1.0),
            Sample::new(0, 4, 2.0),
            Sample::new(4, 0, 3.0),
        ];
        let interp = CloughTocherInterpolator::new(&samples, (5, 5));
        assert_eq!(interp.estimate(4, 4), None);

        let line = [
            Sample::new(0, 0, 1.0),
            Sample::new(1, 0, 2.0),
            Sample::new(2, 0, 3.0),
        ];
        let interp = CloughTocherInterpolator::new(&line, (3, 3));
        assert_eq!(interp.estimate(1, 1), None);
    }
}
