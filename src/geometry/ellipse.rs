//! Ellipses and circles with algebraic containment and rasterisation.

use ndarray::Array2;
use rand::Rng;

use super::point::Point;
use crate::error::Error;

/// An axis-aligned ellipse described by its semi-axes and centroid.
///
/// The constructor orders the axes so that `major >= minor` always holds,
/// mirroring how the axes are swapped rather than rejected when given in the
/// wrong order.
///
/// # Examples
///
/// ```
/// use drumhead::geometry::{Ellipse, Point};
///
/// let e = Ellipse::new(0.5, 1.0).unwrap();
/// assert_eq!(e.major(), 1.0);
/// assert_eq!(e.minor(), 0.5);
/// assert!(e.contains(Point::new(0.0, 0.4)));
/// ```
#[derive(Debug, Clone)]
pub struct Ellipse {
    major: f64,
    minor: f64,
    centroid: Point,
}

impl Ellipse {
    /// Creates an ellipse centred on the origin.
    pub fn new(major: f64, minor: f64) -> Result<Self, Error> {
        if major <= 0.0 || minor <= 0.0 || !major.is_finite() || !minor.is_finite() {
            return Err(Error::InvalidAxes { major, minor });
        }
        Ok(Self {
            major: major.max(minor),
            minor: major.min(minor),
            centroid: Point::default(),
        })
    }

    /// Creates an ellipse with a unit major axis and a random minor axis.
    pub fn random(rng: &mut impl Rng) -> Self {
        // gen_range(0.0..1.0) excludes 0, so the axes stay positive.
        let minor = rng.gen_range(f64::MIN_POSITIVE..1.0);
        Self {
            major: 1.0,
            minor,
            centroid: Point::default(),
        }
    }

    /// Semi-axis along x.
    pub fn major(&self) -> f64 {
        self.major
    }

    /// Semi-axis along y.
    pub fn minor(&self) -> f64 {
        self.minor
    }

    /// Centre of the ellipse.
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Area by Archimedes' formula.
    pub fn area(&self) -> f64 {
        self.major * self.minor * std::f64::consts::PI
    }

    /// Rescales both axes, preserving their ratio, so the area becomes `area`.
    pub fn set_area(&mut self, area: f64) {
        let epsilon = self.major / self.minor;
        let scaled = (area / std::f64::consts::PI).sqrt();
        self.major = scaled * epsilon.sqrt();
        self.minor = scaled / epsilon.sqrt();
    }

    /// Translates the ellipse about the plane.
    pub fn set_centroid(&mut self, centroid: Point) {
        self.centroid = centroid;
    }

    /// The ratio between the focal distance and the major axis.
    pub fn eccentricity(&self) -> f64 {
        (1.0 - self.minor.powi(2) / self.major.powi(2)).sqrt()
    }

    /// The distance between a focus and the centroid.
    pub fn focal_distance(&self) -> f64 {
        self.major * self.eccentricity()
    }

    /// The two points for which the summed distance to any boundary point is
    /// constant.
    pub fn foci(&self) -> (Point, Point) {
        let c = self.focal_distance();
        (
            Point::new(self.centroid.x + c, self.centroid.y),
            Point::new(self.centroid.x - c, self.centroid.y),
        )
    }

    /// Boundary-inclusive algebraic containment test.
    pub fn contains(&self, p: Point) -> bool {
        (p.x - self.centroid.x).powi(2) / self.major.powi(2)
            + (p.y - self.centroid.y).powi(2) / self.minor.powi(2)
            <= 1.0
    }

    /// Rasterises into a `grid_size` x `grid_size` occupancy mask.
    ///
    /// The ellipse is normalised to the grid domain: the major semi-axis spans
    /// half the grid, so the mask shape depends only on the axis ratio. Both
    /// rasterised semi-axes are at least one cell wide, so the centre cell is
    /// foreground however extreme the ratio. `grid_size` must be at least 2.
    pub fn draw(&self, grid_size: usize) -> Array2<bool> {
        debug_assert!(grid_size >= 2, "occupancy masks need at least 2x2 cells");
        let half = ((grid_size - 1) as f64 / 2.0).round().max(1.0);
        let ry = (half * self.minor / self.major).round().max(1.0);
        Array2::from_shape_fn((grid_size, grid_size), |(ix, iy)| {
            let dx = ix as f64 - half;
            let dy = iy as f64 - half;
            dx.powi(2) / half.powi(2) + dy.powi(2) / ry.powi(2) <= 1.0
        })
    }
}

/// A circle, an ellipse with equal axes, instantiated from a radius.
///
/// # Examples
///
/// ```
/// use drumhead::geometry::Circle;
///
/// let c = Circle::new(0.5).unwrap();
/// assert_eq!(c.r(), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct Circle(Ellipse);

impl Circle {
    /// Creates a circle of radius `r` centred on the origin.
    pub fn new(r: f64) -> Result<Self, Error> {
        Ok(Self(Ellipse::new(r, r)?))
    }

    /// Creates a circle with a random radius in (0, 1).
    pub fn random(rng: &mut impl Rng) -> Self {
        let r = rng.gen_range(f64::MIN_POSITIVE..1.0);
        Self(Ellipse {
            major: r,
            minor: r,
            centroid: Point::default(),
        })
    }

    /// The radius.
    pub fn r(&self) -> f64 {
        self.0.major
    }

    /// Resizes the circle, updating both underlying axes.
    pub fn set_r(&mut self, r: f64) {
        self.0.major = r;
        self.0.minor = r;
    }

    /// Access to the underlying ellipse operations.
    pub fn as_ellipse(&self) -> &Ellipse {
        &self.0
    }

    /// Boundary-inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        self.0.contains(p)
    }

    /// Rasterises into a `grid_size` x `grid_size` occupancy mask.
    pub fn draw(&self, grid_size: usize) -> Array2<bool> {
        self.0.draw(grid_size)
    }
}

impl From<Circle> for Ellipse {
    fn from(c: Circle) -> Ellipse {
        c.0
    }
}
