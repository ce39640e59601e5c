//! The `Shape` sum type over every supported membrane boundary, plus the
//! per-variant settings used to sample shapes at random.

use ndarray::Array2;
use rand::Rng;

use super::ellipse::{Circle, Ellipse};
use super::generate::{generate_convex_polygon, generate_irregular_star, generate_polygon};
use super::point::Point;
use super::polygon::Polygon;
use crate::error::Error;
use crate::sampler::Labels;

/// Settings for the random polygon generators.
#[derive(Debug, Clone, Copy)]
pub struct PolygonSettings {
    /// Upper bound on the number of vertices.
    pub max_vertices: usize,
}

impl Default for PolygonSettings {
    fn default() -> Self {
        Self { max_vertices: 10 }
    }
}

/// Settings for a fixed or partially random ellipse.
///
/// A missing `major` falls back to 1.0 and a missing `minor` to a uniform
/// random value in (0, 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct EllipseSettings {
    pub major: Option<f64>,
    pub minor: Option<f64>,
}

/// Settings for a circle; a missing radius falls back to a uniform random
/// value in (0, 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleSettings {
    pub r: Option<f64>,
}

/// Settings for a unit-area rectangle; a missing aspect ratio falls back to a
/// uniform random value in [0.25, 4].
#[derive(Debug, Clone, Copy, Default)]
pub struct RectangleSettings {
    pub epsilon: Option<f64>,
}

/// Tagged per-variant configuration for sampling membrane boundaries.
///
/// # Examples
///
/// ```
/// use drumhead::geometry::{PolygonSettings, ShapeSettings};
///
/// let settings = ShapeSettings::ConvexPolygon(PolygonSettings { max_vertices: 6 });
/// let shape = settings.sample(&mut rand::thread_rng()).unwrap();
/// assert!(shape.area() > 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub enum ShapeSettings {
    Circle(CircleSettings),
    Ellipse(EllipseSettings),
    ConvexPolygon(PolygonSettings),
    IrregularStar(PolygonSettings),
    SimplePolygon(PolygonSettings),
    UnitRectangle(RectangleSettings),
}

impl Default for ShapeSettings {
    fn default() -> Self {
        Self::ConvexPolygon(PolygonSettings::default())
    }
}

impl ShapeSettings {
    /// Draws a concrete shape from these settings.
    pub fn sample(&self, rng: &mut impl Rng) -> Result<Shape, Error> {
        Ok(match *self {
            Self::Circle(settings) => Shape::Circle(match settings.r {
                Some(r) => Circle::new(r)?,
                None => Circle::random(rng),
            }),
            Self::Ellipse(settings) => Shape::Ellipse(match (settings.major, settings.minor) {
                (None, None) => Ellipse::random(rng),
                (major, minor) => Ellipse::new(
                    major.unwrap_or(1.0),
                    minor.unwrap_or_else(|| rng.gen_range(f64::MIN_POSITIVE..1.0)),
                )?,
            }),
            Self::ConvexPolygon(settings) => {
                Shape::ConvexPolygon(generate_convex_polygon(settings.max_vertices, rng))
            }
            Self::IrregularStar(settings) => {
                Shape::IrregularStar(generate_irregular_star(settings.max_vertices, rng))
            }
            Self::SimplePolygon(settings) => {
                Shape::SimplePolygon(generate_polygon(settings.max_vertices, rng))
            }
            Self::UnitRectangle(settings) => {
                let epsilon = match settings.epsilon {
                    Some(e) => e,
                    None => rng.gen_range(0.25..4.0),
                };
                let mut polygon = Polygon::unit_rectangle(epsilon)?;
                fit_to_unit_domain(&mut polygon);
                Shape::UnitRectangle { polygon, epsilon }
            }
        })
    }
}

/// A membrane boundary, polymorphic over the supported variants.
///
/// Polygon variants live in normalised coordinates (vertices within the unit
/// square); ellipse variants are centred on their centroid with the semi-axes
/// as extents. All operations dispatch to the underlying geometry.
#[derive(Debug, Clone)]
pub enum Shape {
    Circle(Circle),
    Ellipse(Ellipse),
    ConvexPolygon(Polygon),
    IrregularStar(Polygon),
    SimplePolygon(Polygon),
    UnitRectangle { polygon: Polygon, epsilon: f64 },
}

impl Shape {
    fn polygon(&self) -> Option<&Polygon> {
        match self {
            Self::ConvexPolygon(p) | Self::IrregularStar(p) | Self::SimplePolygon(p) => Some(p),
            Self::UnitRectangle { polygon, .. } => Some(polygon),
            _ => None,
        }
    }

    fn ellipse(&self) -> Option<&Ellipse> {
        match self {
            Self::Circle(c) => Some(c.as_ellipse()),
            Self::Ellipse(e) => Some(e),
            _ => None,
        }
    }

    /// Shape area.
    pub fn area(&self) -> f64 {
        match (self.polygon(), self.ellipse()) {
            (Some(p), _) => p.area(),
            (_, Some(e)) => e.area(),
            _ => unreachable!(),
        }
    }

    /// Shape centroid in the shape's own coordinate system.
    pub fn centroid(&self) -> Point {
        match (self.polygon(), self.ellipse()) {
            (Some(p), _) => p.centroid(),
            (_, Some(e)) => e.centroid(),
            _ => unreachable!(),
        }
    }

    /// Boundary-inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        match (self.polygon(), self.ellipse()) {
            (Some(poly), _) => poly.contains(p),
            (_, Some(e)) => e.contains(p),
            _ => unreachable!(),
        }
    }

    /// Rasterises the shape into a `grid_size` x `grid_size` occupancy mask.
    pub fn draw(&self, grid_size: usize) -> Array2<bool> {
        match (self.polygon(), self.ellipse()) {
            (Some(poly), _) => poly.draw(grid_size),
            (_, Some(e)) => e.draw(grid_size),
            _ => unreachable!(),
        }
    }

    /// Maps a point in shape coordinates to its cell in a `grid_size` mask,
    /// matching the mapping used by [`Shape::draw`].
    pub fn grid_position(&self, p: Point, grid_size: usize) -> (usize, usize) {
        let clamp = |v: f64| (v.round().max(0.0) as usize).min(grid_size - 1);
        match (self.polygon(), self.ellipse()) {
            (Some(_), _) => {
                let scale = (grid_size - 1) as f64;
                (clamp(p.x * scale), clamp(p.y * scale))
            }
            (_, Some(e)) => {
                let half = ((grid_size - 1) as f64 / 2.0).round();
                let c = e.centroid();
                (
                    clamp(half + (p.x - c.x) * half / e.major()),
                    clamp(half + (p.y - c.y) * half / e.major()),
                )
            }
            _ => unreachable!(),
        }
    }

    /// Inverse of [`Shape::grid_position`]: the shape-coordinate point a mask
    /// cell samples.
    pub fn grid_point(&self, (ix, iy): (usize, usize), grid_size: usize) -> Point {
        match (self.polygon(), self.ellipse()) {
            (Some(_), _) => {
                let scale = (grid_size - 1) as f64;
                Point::new(ix as f64 / scale, iy as f64 / scale)
            }
            (_, Some(e)) => {
                let half = ((grid_size - 1) as f64 / 2.0).round();
                let c = e.centroid();
                Point::new(
                    c.x + (ix as f64 - half) * e.major() / half,
                    c.y + (iy as f64 - half) * e.major() / half,
                )
            }
            _ => unreachable!(),
        }
    }

    /// Samples a uniform random point inside the shape by rejection over its
    /// bounding box.
    pub fn random_point_inside(&self, rng: &mut impl Rng) -> Point {
        let (x_range, y_range) = match (self.polygon(), self.ellipse()) {
            (Some(_), _) => (0.0..=1.0, 0.0..=1.0),
            (_, Some(e)) => {
                let c = e.centroid();
                (
                    c.x - e.major()..=c.x + e.major(),
                    c.y - e.minor()..=c.y + e.minor(),
                )
            }
            _ => unreachable!(),
        };
        loop {
            let p = Point::new(
                rng.gen_range(x_range.clone()),
                rng.gen_range(y_range.clone()),
            );
            if self.contains(p) {
                return p;
            }
        }
    }

    /// Metadata describing the current shape, merged into sampler labels.
    pub fn labels(&self) -> Labels {
        let mut labels = Labels::new();
        match self {
            Self::Circle(c) => {
                labels.insert("r".into(), vec![c.r()]);
                labels.insert("major".into(), vec![c.r()]);
                labels.insert("minor".into(), vec![c.r()]);
            }
            Self::Ellipse(e) => {
                labels.insert("major".into(), vec![e.major()]);
                labels.insert("minor".into(), vec![e.minor()]);
            }
            Self::ConvexPolygon(p) | Self::IrregularStar(p) | Self::SimplePolygon(p) => {
                labels.insert("vertices".into(), flatten(p));
            }
            Self::UnitRectangle { polygon, epsilon } => {
                labels.insert("aspect_ratio".into(), vec![*epsilon]);
                labels.insert("vertices".into(), flatten(polygon));
            }
        }
        labels
    }
}

/// Row-major `[x0, y0, x1, y1, ...]` layout of a vertex sequence.
fn flatten(polygon: &Polygon) -> Vec<f64> {
    polygon
        .vertices()
        .iter()
        .flat_map(|v| [v.x, v.y])
        .collect()
}

/// Uniformly rescales and recentres a polygon so that it fits the unit square
/// with its longest bounding-box side spanning the full domain.
fn fit_to_unit_domain(polygon: &mut Polygon) {
    let (min_x, max_x, min_y, max_y) = polygon.vertices().iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(min_x, max_x, min_y, max_y), v| {
            (
                min_x.min(v.x),
                max_x.max(v.x),
                min_y.min(v.y),
                max_y.max(v.y),
            )
        },
    );
    let extent = (max_x - min_x).max(max_y - min_y);
    polygon.set_area(polygon.area() / (extent * extent));
    polygon.set_centroid(Point::new(0.5, 0.5));
}
