//! Delaunay triangulation of integer lattice points.
//!
//! Sample positions are cell indices, so every coordinate is an integer and
//! both geometric predicates are evaluated exactly (`i64` orientation,
//! `i128` in-circle). No epsilon tuning is needed and cocircular lattice
//! configurations cannot send the edge flipping into a loop.
//!
//! ## Construction
//!
//! Points are inserted in lexicographic order, which keeps every new point
//! strictly outside the current convex hull:
//! 1. The leading run of collinear points is fanned to the first point off
//!    their line.
//! 2. Each further point is joined to the hull edges it can see, found by
//!    walking the hull both ways from the previously inserted point.
//! 3. Lawson edge flips restore the empty-circumcircle property.
//!
//! Triangles are stored as half-edges: half-edge `e` runs from
//! `triangles[e]` to `triangles[next(e)]` and `halfedges[e]` is its twin in
//! the adjacent triangle, or [`EMPTY`] on the convex hull. All triangles are
//! counter-clockwise with respect to [`orient`].

use ndarray::Array2;

/// Integer `(row, col)` position of a sample.
pub type LatticePoint = [i64; 2];

/// Marker for a half-edge without a twin (convex hull edge).
pub const EMPTY: usize = usize::MAX;

/// Twice the signed area of `(a, b, c)`; positive when counter-clockwise.
#[inline]
pub fn orient(a: LatticePoint, b: LatticePoint, c: LatticePoint) -> i64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Positive when `d` lies strictly inside the circumcircle of the
/// counter-clockwise triangle `(a, b, c)`.
#[inline]
fn in_circle(a: LatticePoint, b: LatticePoint, c: LatticePoint, d: LatticePoint) -> i128 {
    let (adx, ady) = ((a[0] - d[0]) as i128, (a[1] - d[1]) as i128);
    let (bdx, bdy) = ((b[0] - d[0]) as i128, (b[1] - d[1]) as i128);
    let (cdx, cdy) = ((c[0] - d[0]) as i128, (c[1] - d[1]) as i128);

    let ad = adx * adx + ady * ady;
    let bd = bdx * bdx + bdy * bdy;
    let cd = cdx * cdx + cdy * cdy;

    adx * (bdy * cd - bd * cdy) - ady * (bdx * cd - bd * cdx) + ad * (bdx * cdy - bdy * cdx)
}

#[inline]
fn next_halfedge(e: usize) -> usize {
    if e % 3 == 2 {
        e - 2
    } else {
        e + 1
    }
}

#[inline]
fn prev_halfedge(e: usize) -> usize {
    if e % 3 == 0 {
        e + 2
    } else {
        e - 1
    }
}

/// Delaunay triangulation over a set of lattice points.
///
/// Vertex ids are indices into the point slice passed to [`Triangulation::new`].
/// Duplicate points are ignored; fewer than three non-collinear points yield
/// an empty triangulation.
///
/// # Example
///
/// ```
/// use composite_core::math::triangulation::Triangulation;
///
/// let tri = Triangulation::new(&[[0, 0], [0, 2], [2, 0], [2, 2]]);
/// assert_eq!(tri.len(), 2);
///
/// let collinear = Triangulation::new(&[[0, 0], [1, 1], [2, 2]]);
/// assert!(collinear.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Triangulation {
    points: Vec<LatticePoint>,
    triangles: Vec<usize>,
    halfedges: Vec<usize>,
}

impl Triangulation {
    /// Triangulate `points`.
    pub fn new(points: &[LatticePoint]) -> Self {
        let mut builder = Builder::new(points);
        builder.run();
        Self {
            points: points.to_vec(),
            triangles: builder.triangles,
            halfedges: builder.halfedges,
        }
    }

    /// The input points, indexed by vertex id.
    #[inline]
    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    /// Number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len() / 3
    }

    /// True when no triangle could be formed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Vertex ids of triangle `t`, counter-clockwise.
    #[inline]
    pub fn triangle(&self, t: usize) -> [usize; 3] {
        [
            self.triangles[3 * t],
            self.triangles[3 * t + 1],
            self.triangles[3 * t + 2],
        ]
    }

    /// Triangle sharing the edge opposite vertex `k` (0, 1 or 2) of `t`.
    #[inline]
    pub fn neighbor(&self, t: usize, k: usize) -> Option<usize> {
        let twin = self.halfedges[3 * t + (k + 1) % 3];
        (twin != EMPTY).then_some(twin / 3)
    }

    /// Adjacency list of every vertex, built from the triangle edges.
    pub fn vertex_neighbors(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.points.len()];
        for e in 0..self.triangles.len() {
            let twin = self.halfedges[e];
            if twin == EMPTY || e < twin {
                let a = self.triangles[e];
                let b = self.triangles[next_halfedge(e)];
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
        }
        adjacency
    }

    /// Map every cell of a `rows × cols` lattice to a triangle covering it.
    ///
    /// Cells on a shared edge go to whichever triangle is visited first;
    /// cells outside the convex hull map to `None`.
    pub fn locate_cells(&self, rows: usize, cols: usize) -> Array2<Option<usize>> {
        let mut located = Array2::from_elem((rows, cols), None);
        if rows == 0 || cols == 0 {
            return located;
        }
        let (max_row, max_col) = (rows as i64 - 1, cols as i64 - 1);

        for t in 0..self.len() {
            let [a, b, c] = self.triangle(t).map(|v| self.points[v]);
            let r0 = a[0].min(b[0]).min(c[0]).max(0);
            let r1 = a[0].max(b[0]).max(c[0]).min(max_row);
            let c0 = a[1].min(b[1]).min(c[1]).max(0);
            let c1 = a[1].max(b[1]).max(c[1]).min(max_col);

            for row in r0..=r1 {
                for col in c0..=c1 {
                    let slot = &mut located[(row as usize, col as usize)];
                    if slot.is_some() {
                        continue;
                    }
                    let q = [row, col];
                    if orient(b, c, q) >= 0 && orient(c, a, q) >= 0 && orient(a, b, q) >= 0 {
                        *slot = Some(t);
                    }
                }
            }
        }
        located
    }
}

/// Incremental construction state.
struct Builder<'a> {
    points: &'a [LatticePoint],
    triangles: Vec<usize>,
    halfedges: Vec<usize>,
    hull_next: Vec<usize>,
    hull_prev: Vec<usize>,
    /// Hull half-edge leaving each hull vertex
    hull_tri: Vec<usize>,
    stack: Vec<usize>,
}

impl<'a> Builder<'a> {
    fn new(points: &'a [LatticePoint]) -> Self {
        let n = points.len();
        let capacity = if n > 2 { 3 * (2 * n - 5) } else { 0 };
        Self {
            points,
            triangles: Vec::with_capacity(capacity),
            halfedges: Vec::with_capacity(capacity),
            hull_next: vec![EMPTY; n],
            hull_prev: vec![EMPTY; n],
            hull_tri: vec![EMPTY; n],
            stack: Vec::new(),
        }
    }

    #[inline]
    fn pt(&self, v: usize) -> LatticePoint {
        self.points[v]
    }

    fn run(&mut self) {
        let points = self.points;
        let mut order: Vec<usize> = (0..points.len()).collect();
        order.sort_unstable_by_key(|&i| points[i]);
        order.dedup_by_key(|i| points[*i]);
        if order.len() < 3 {
            return;
        }

        let (p0, p1) = (points[order[0]], points[order[1]]);
        let Some(k) = (2..order.len()).find(|&k| orient(p0, p1, points[order[k]]) != 0) else {
            return;
        };

        self.seed_fan(&order[..k], order[k]);

        let mut last = order[k];
        for &p in &order[k + 1..] {
            self.insert(p, last);
            last = p;
        }
    }

    /// Triangulate a collinear chain (sorted along its line) against `apex`.
    fn seed_fan(&mut self, chain: &[usize], apex: usize) {
        let ccw = orient(self.pt(chain[0]), self.pt(chain[1]), self.pt(apex)) > 0;
        let mut shared = EMPTY;
        for pair in chain.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if ccw {
                let t = self.add_triangle(a, b, apex, EMPTY, EMPTY, shared);
                shared = t + 1;
            } else {
                let t = self.add_triangle(b, a, apex, EMPTY, shared, EMPTY);
                shared = t + 2;
            }
        }

        for e in 0..self.triangles.len() {
            if self.halfedges[e] == EMPTY {
                let (v, w) = (self.triangles[e], self.triangles[next_halfedge(e)]);
                self.hull_next[v] = w;
                self.hull_prev[w] = v;
                self.hull_tri[v] = e;
            }
        }
    }

    /// Insert `p`, which lies strictly outside the hull; `last` is the
    /// previously inserted (lexicographically largest) hull vertex.
    fn insert(&mut self, p: usize, last: usize) {
        let pp = self.pt(p);

        let mut end = last;
        while orient(self.pt(end), self.pt(self.hull_next[end]), pp) < 0 {
            end = self.hull_next[end];
        }
        let mut start = last;
        while orient(self.pt(self.hull_prev[start]), self.pt(start), pp) < 0 {
            start = self.hull_prev[start];
        }
        if start == end {
            return;
        }

        let mut created = Vec::new();
        let mut shared = EMPTY;
        let mut v = start;
        while v != end {
            let w = self.hull_next[v];
            let t = self.add_triangle(w, v, p, self.hull_tri[v], shared, EMPTY);
            created.push(t);
            shared = t + 2;
            v = w;
        }

        self.hull_next[start] = p;
        self.hull_prev[p] = start;
        self.hull_next[p] = end;
        self.hull_prev[end] = p;
        self.hull_tri[start] = created[0] + 1;
        self.hull_tri[p] = shared;

        for e in created {
            self.legalize(e);
        }
    }

    /// Flip edges until every triangle around the new point is Delaunay.
    ///
    /// `start` is a half-edge whose opposite vertex is the new point.
    fn legalize(&mut self, start: usize) {
        self.stack.push(start);
        while let Some(a) = self.stack.pop() {
            let b = self.halfedges[a];
            if b == EMPTY {
                continue;
            }

            //        r                  r
            //       / \                /|\
            //      /   \              / | \
            //     p--a--q    =>      p  |  q
            //      \ b /              \ | /
            //       \ /                \|/
            //        s                  s
            let (na, pa) = (next_halfedge(a), prev_halfedge(a));
            let (nb, pb) = (next_halfedge(b), prev_halfedge(b));
            let p = self.triangles[a];
            let q = self.triangles[na];
            let r = self.triangles[pa];
            let s = self.triangles[pb];

            if in_circle(self.pt(p), self.pt(q), self.pt(r), self.pt(s)) <= 0 {
                continue;
            }

            let (t_qr, t_rp) = (self.halfedges[na], self.halfedges[pa]);
            let (t_ps, t_sq) = (self.halfedges[nb], self.halfedges[pb]);

            self.triangles[a] = s;
            self.triangles[na] = r;
            self.triangles[pa] = p;
            self.triangles[b] = r;
            self.triangles[nb] = s;
            self.triangles[pb] = q;

            self.link(a, b);
            self.link(na, t_rp);
            self.link(pa, t_ps);
            self.link(nb, t_sq);
            self.link(pb, t_qr);

            for e in [na, pa, nb, pb] {
                if self.halfedges[e] == EMPTY {
                    self.hull_tri[self.triangles[e]] = e;
                }
            }

            self.stack.push(pa);
            self.stack.push(nb);
        }
    }

    fn add_triangle(&mut self, i0: usize, i1: usize, i2: usize, a: usize, b: usize, c: usize) -> usize {
        let t = self.triangles.len();
        self.triangles.extend([i0, i1, i2]);
        self.halfedges.extend([EMPTY; 3]);
        self.link(t, a);
        self.link(t + 1, b);
        self.link(t + 2, c);
        t
    }

    #[inline]
    fn link(&mut self, a: usize, b: usize) {
        self.halfedges[a] = b;
        if b != EMPTY {
            self.halfedges[b] = a;
        }
    }
}
