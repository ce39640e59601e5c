//! Simple polygons: area, centroid, containment, simplicity and rasterisation.

use ndarray::Array2;

use super::point::{EPSILON, LineIntersection, Point, is_colinear, line_intersection, on_segment};
use crate::error::Error;

/// A simple closed polygon given by its ordered vertices.
///
/// Convexity is derived once at construction. Vertices may be mutated only
/// through the explicit rescale/recentre operations ([`Polygon::set_area`],
/// [`Polygon::set_centroid`]).
///
/// # Examples
///
/// ```
/// use drumhead::geometry::Polygon;
///
/// let square = Polygon::new(vec![[0., 0.], [1., 0.], [1., 1.], [0., 1.]]).unwrap();
/// assert!(square.convex());
/// assert!((square.area() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point>,
    convex: bool,
}

impl Polygon {
    /// Builds a polygon from ordered vertices.
    ///
    /// Fails fast on degenerate input: fewer than three vertices, or zero area.
    pub fn new(vertices: Vec<impl Into<Point>>) -> Result<Self, Error> {
        let vertices: Vec<Point> = vertices.into_iter().map(Into::into).collect();
        if vertices.len() < 3 {
            return Err(Error::TooFewVertices(vertices.len()));
        }
        if shoelace(&vertices).abs() < EPSILON {
            return Err(Error::DegenerateShape);
        }
        let convex = is_convex(&vertices);
        Ok(Self { vertices, convex })
    }

    /// A unit-area rectangle of aspect ratio `epsilon`, centred on the origin.
    ///
    /// The half-extents are `(epsilon / 2, 1 / (2 * epsilon))`, so the area is
    /// always 1 while the proportions follow `epsilon`.
    pub fn unit_rectangle(epsilon: f64) -> Result<Self, Error> {
        if epsilon <= 0.0 || !epsilon.is_finite() {
            return Err(Error::InvalidPhysicalParameter("aspect ratio"));
        }
        let (hx, hy) = (epsilon / 2.0, 1.0 / (2.0 * epsilon));
        Self::new(vec![[hx, hy], [hx, -hy], [-hx, -hy], [-hx, hy]])
    }

    /// The ordered vertex sequence.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when the polygon has no vertices (never holds for a constructed one).
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether the polygon was convex at construction.
    pub fn convex(&self) -> bool {
        self.convex
    }

    /// Polygon area by the shoelace formula.
    pub fn area(&self) -> f64 {
        shoelace(&self.vertices).abs() / 2.0
    }

    /// The polygon's centroid (centre of mass of the enclosed region).
    pub fn centroid(&self) -> Point {
        let signed = shoelace(&self.vertices) / 2.0;
        let n = self.vertices.len();
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let w = a.cross(b);
            cx += (a.x + b.x) * w;
            cy += (a.y + b.y) * w;
        }
        Point::new(cx / (6.0 * signed), cy / (6.0 * signed))
    }

    /// Rescales the polygon about its centroid so that its area becomes `area`.
    pub fn set_area(&mut self, area: f64) {
        let scale = (area / self.area()).sqrt();
        let c = self.centroid();
        for v in &mut self.vertices {
            *v = c + (*v - c) * scale;
        }
    }

    /// Translates the polygon so that its centroid lands on `centroid`.
    pub fn set_centroid(&mut self, centroid: Point) {
        let delta = centroid - self.centroid();
        for v in &mut self.vertices {
            *v = *v + delta;
        }
    }

    /// Boundary-inclusive point containment by even-odd ray casting.
    ///
    /// # Examples
    ///
    /// ```
    /// use drumhead::geometry::{Point, Polygon};
    ///
    /// let square = Polygon::new(vec![[0., 0.], [1., 0.], [1., 1.], [0., 1.]]).unwrap();
    /// assert!(square.contains(Point::new(0.999, 0.5)));
    /// assert!(!square.contains(Point::new(1.001, 0.5)));
    /// assert!(square.contains(Point::new(1.0, 1.0)));
    /// ```
    pub fn contains(&self, p: Point) -> bool {
        let n = self.vertices.len();
        // The boundary counts as inside.
        for i in 0..n {
            if on_segment(p, [self.vertices[i], self.vertices[(i + 1) % n]]) {
                return true;
            }
        }
        let mut inside = false;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (b.x - a.x) * (p.y - a.y) / (b.y - a.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// True when no two edges intersect away from their shared vertices.
    pub fn is_simple(&self) -> bool {
        let n = self.vertices.len();
        for i in 0..n {
            let ei = [self.vertices[i], self.vertices[(i + 1) % n]];
            for j in (i + 1)..n {
                let ej = [self.vertices[j], self.vertices[(j + 1) % n]];
                let neighbours = j == i + 1 || (i == 0 && j == n - 1);
                let (class, _) = line_intersection(ei, ej);
                match class {
                    LineIntersection::None => {}
                    LineIntersection::Vertex if neighbours => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Rasterises the polygon into a `grid_size` x `grid_size` occupancy mask.
    ///
    /// The polygon is expected in normalised coordinates; cell `(ix, iy)`
    /// samples the point `(ix, iy) / (grid_size - 1)`, boundary inclusive, so
    /// the mask is indexed `[x, y]`. `grid_size` must be at least 2.
    pub fn draw(&self, grid_size: usize) -> Array2<bool> {
        debug_assert!(grid_size >= 2, "occupancy masks need at least 2x2 cells");
        let scale = (grid_size - 1) as f64;
        Array2::from_shape_fn((grid_size, grid_size), |(ix, iy)| {
            self.contains(Point::new(ix as f64 / scale, iy as f64 / scale))
        })
    }
}

/// Twice the signed area of the vertex cycle (positive for counter-clockwise).
pub(crate) fn shoelace(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    let mut sum = 0.0;
    for i in 0..n {
        sum += vertices[i].cross(vertices[(i + 1) % n]);
    }
    sum
}

/// True iff the cross product of consecutive edge vectors never changes sign
/// around the full cycle.
///
/// # Examples
///
/// ```
/// use drumhead::geometry::{is_convex, Point};
///
/// let square: Vec<Point> = [[0., 0.], [1., 0.], [1., 1.], [0., 1.]]
///     .into_iter().map(Point::from).collect();
/// assert!(is_convex(&square));
/// ```
pub fn is_convex(vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0.0f64;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];
        let cross = (b - a).cross(c - b);
        if cross.abs() < EPSILON {
            continue;
        }
        if sign != 0.0 && cross.signum() != sign {
            return false;
        }
        sign = cross.signum();
    }
    sign != 0.0
}

/// True when any three cyclically adjacent vertices are collinear.
pub(crate) fn has_colinear_triple(vertices: &[Point]) -> bool {
    let n = vertices.len();
    (0..n).any(|i| {
        is_colinear(
            vertices[if i == 0 { n - 1 } else { i - 1 }],
            vertices[i],
            vertices[(i + 1) % n],
        )
    })
}
