//! Computational geometry for membrane boundaries.
//!
//! Generates, validates and rasterises the 2D shapes consumed by the
//! finite-difference synthesis path: ellipses and circles, random convex
//! polygons, star-shaped irregular polygons and arbitrary simple polygons.

mod ellipse;
mod generate;
mod point;
mod polygon;
mod shape;

pub use ellipse::{Circle, Ellipse};
pub use generate::{
    generate_convex_polygon, generate_irregular_star, generate_polygon, normalise_convex_polygon,
};
pub use point::{LineIntersection, Point, Segment, largest_vector, line_intersection, is_colinear};
pub use polygon::{Polygon, is_convex};
pub use shape::{
    CircleSettings, EllipseSettings, PolygonSettings, RectangleSettings, Shape, ShapeSettings,
};
