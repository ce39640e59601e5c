//! 2D points, segments and their intersection classification.

use std::ops::{Add, Mul, Sub};

/// Numerical tolerance for collinearity and coincidence tests.
pub(crate) const EPSILON: f64 = 1e-9;

/// A point (or vector) in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean norm, treating the point as a vector from the origin.
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// 2D cross product `self x other` (the z component of the 3D cross product).
    pub fn cross(&self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Rotates the point about the origin by `theta` radians.
    pub fn rotate(&self, theta: f64) -> Point {
        let (sin, cos) = theta.sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// True when two points coincide within tolerance.
    pub fn coincident(&self, other: Point) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Point::new(p[0], p[1])
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// A line segment between two points.
pub type Segment = [Point; 2];

/// How two segments meet, as reported by [`line_intersection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineIntersection {
    /// The segments do not touch.
    None,
    /// The segments meet only at a shared endpoint of each.
    Vertex,
    /// An endpoint of one segment lies in the interior of the other, or the
    /// segments cross transversally at a single interior point.
    Adjacent,
    /// The segments lie on the same line and overlap over an interval.
    Colinear,
}

/// True when three points lie on a single line, within tolerance.
///
/// # Examples
///
/// ```
/// use drumhead::geometry::{is_colinear, Point};
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(0.5, 0.5);
/// let c = Point::new(1.0, 1.0);
/// assert!(is_colinear(a, b, c));
/// assert!(!is_colinear(a, b, Point::new(1.0, 0.0)));
/// ```
pub fn is_colinear(a: Point, b: Point, c: Point) -> bool {
    (b - a).cross(c - a).abs() < EPSILON
}

/// Classifies the intersection of two segments and returns a representative point.
///
/// The classification is exactly one of [`LineIntersection`]'s variants:
///
/// - `Vertex` - the segments meet only at a shared endpoint, which is returned.
/// - `Adjacent` - a single contact point involving at least one segment
///   interior (either an endpoint-on-interior contact or a transversal
///   crossing); the contact point is returned.
/// - `Colinear` - the segments lie on one line and overlap; the midpoint of
///   the overlap interval is returned. A collinear touch at a single shared
///   endpoint degrades to `Vertex`.
/// - `None` - no contact; the first segment's first vertex is returned as a
///   sentinel.
///
/// # Examples
///
/// ```
/// use drumhead::geometry::{line_intersection, LineIntersection, Point};
///
/// let a = [Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
/// let b = [Point::new(0.5, 0.0), Point::new(0.5, 1.0)];
/// let (class, p) = line_intersection(a, b);
/// assert_eq!(class, LineIntersection::Adjacent);
/// assert_eq!((p.x, p.y), (0.5, 0.0));
/// ```
pub fn line_intersection(a: Segment, b: Segment) -> (LineIntersection, Point) {
    let [a0, a1] = a;
    let [b0, b1] = b;

    // All four endpoints on one line: overlap interval arithmetic.
    if is_colinear(a0, a1, b0) && is_colinear(a0, a1, b1) {
        let dir = a1 - a0;
        let len_sq = dir.dot(dir);
        if len_sq < EPSILON * EPSILON {
            return (LineIntersection::None, a0);
        }
        let t0 = (b0 - a0).dot(dir) / len_sq;
        let t1 = (b1 - a0).dot(dir) / len_sq;
        let lo = t0.min(t1).max(0.0);
        let hi = t0.max(t1).min(1.0);
        if lo > hi + EPSILON {
            return (LineIntersection::None, a0);
        }
        if hi - lo < EPSILON {
            // Touching at a single point, necessarily an endpoint of both.
            return (LineIntersection::Vertex, a0 + dir * lo);
        }
        return (LineIntersection::Colinear, a0 + dir * ((lo + hi) / 2.0));
    }

    // Shared endpoint of non-collinear segments.
    for p in [a0, a1] {
        for q in [b0, b1] {
            if p.coincident(q) {
                return (LineIntersection::Vertex, p);
            }
        }
    }

    let d1 = (b1 - b0).cross(a0 - b0);
    let d2 = (b1 - b0).cross(a1 - b0);
    let d3 = (a1 - a0).cross(b0 - a0);
    let d4 = (a1 - a0).cross(b1 - a0);

    // Transversal crossing through both interiors.
    if ((d1 > EPSILON && d2 < -EPSILON) || (d1 < -EPSILON && d2 > EPSILON))
        && ((d3 > EPSILON && d4 < -EPSILON) || (d3 < -EPSILON && d4 > EPSILON))
    {
        let t = (b0 - a0).cross(b1 - b0) / (a1 - a0).cross(b1 - b0);
        return (LineIntersection::Adjacent, a0 + (a1 - a0) * t);
    }

    // An endpoint of one segment resting on the other.
    for (d, p) in [(d1, a0), (d2, a1), (d3, b0), (d4, b1)] {
        if d.abs() < EPSILON && on_segment(p, if p == a0 || p == a1 { b } else { a }) {
            return (LineIntersection::Adjacent, p);
        }
    }

    (LineIntersection::None, a0)
}

/// True when `p` lies on the segment `s`, boundary inclusive.
pub(crate) fn on_segment(p: Point, s: Segment) -> bool {
    let [v0, v1] = s;
    if !is_colinear(v0, v1, p) {
        return false;
    }
    let dir = v1 - v0;
    let len_sq = dir.dot(dir);
    if len_sq < EPSILON * EPSILON {
        return p.coincident(v0);
    }
    let t = (p - v0).dot(dir) / len_sq;
    (-EPSILON..=1.0 + EPSILON).contains(&t)
}

/// Finds the longest vertex-to-vertex vector of a point set.
///
/// Returns the magnitude and the index pair `(a, b)` with `a < b`. After
/// canonical normalisation the magnitude is exactly 1.
pub fn largest_vector(vertices: &[Point]) -> (f64, (usize, usize)) {
    let mut best = (0.0, (0, 0));
    for i in 0..vertices.len() {
        for j in (i + 1)..vertices.len() {
            let mag = (vertices[j] - vertices[i]).magnitude();
            if mag > best.0 {
                best = (mag, (i, j));
            }
        }
    }
    best
}
