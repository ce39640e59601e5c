//! Random polygon generation and canonical normalisation.
//!
//! Three generators are provided, in increasing order of irregularity:
//! convex polygons (Valtr's algorithm), star-shaped irregular polygons
//! (random points ordered by angle), and arbitrary simple polygons (a
//! perturbed star seed untangled by 2-opt edge reversals). All of them retry
//! internally until the output satisfies the polygon invariants: simple,
//! no three cyclically adjacent vertices collinear, vertices within the unit
//! square with the longest vertex-to-vertex vector of length 1 along the
//! x axis.

use rand::Rng;
use rand::seq::SliceRandom;

use super::point::{EPSILON, LineIntersection, Point, is_colinear, largest_vector, line_intersection};
use super::polygon::{Polygon, has_colinear_triple, shoelace};

/// Generates a random convex polygon with exactly `n` vertices.
///
/// Uses Valtr's algorithm: sorted random coordinates are split into two
/// monotone chains per axis, the resulting edge vectors are paired at random
/// and sorted by angle, and the chained vectors close into a convex cycle.
/// The output is canonically normalised and almost surely different between
/// two calls with the same `n`.
///
/// # Examples
///
/// ```
/// use drumhead::geometry::generate_convex_polygon;
///
/// let polygon = generate_convex_polygon(6, &mut rand::thread_rng());
/// assert_eq!(polygon.len(), 6);
/// assert!(polygon.convex());
/// ```
pub fn generate_convex_polygon(n: usize, rng: &mut impl Rng) -> Polygon {
    let n = n.max(3);
    loop {
        let vertices = normalise_convex_polygon(&valtr(n, rng));
        if has_colinear_triple(&vertices) {
            continue;
        }
        if let Ok(polygon) = Polygon::new(vertices) {
            if polygon.convex() {
                return polygon;
            }
        }
    }
}

/// Generates a star-shaped polygon with up to `n` vertices.
///
/// Random points are ordered by angle about their centroid, which yields a
/// polygon that is star-shaped as seen from that centroid. Collinear vertex
/// triples are repaired by dropping the middle vertex, so the result may have
/// fewer than `n` vertices.
pub fn generate_irregular_star(n: usize, rng: &mut impl Rng) -> Polygon {
    let n = n.max(3);
    loop {
        let mut points = random_points(n, rng);
        sort_by_angle(&mut points);
        remove_colinear_triples(&mut points);
        if points.len() < 3 {
            continue;
        }
        if let Some(polygon) = finalise(points) {
            return polygon;
        }
    }
}

/// Generates an arbitrary simple polygon with up to `n` vertices.
///
/// Starts from a star-shaped seed, perturbs the vertex order at random, then
/// repairs the resulting self-intersections with 2-opt edge reversals until
/// the cycle is untangled.
pub fn generate_polygon(n: usize, rng: &mut impl Rng) -> Polygon {
    let n = n.max(3);
    loop {
        let mut points = random_points(n, rng);
        sort_by_angle(&mut points);
        // Perturb the star ordering to escape star-shapedness.
        for _ in 0..points.len() {
            let i = rng.gen_range(0..points.len());
            let j = rng.gen_range(0..points.len());
            points.swap(i, j);
        }
        if !untangle(&mut points) {
            continue;
        }
        remove_colinear_triples(&mut points);
        if points.len() < 3 {
            continue;
        }
        if let Some(polygon) = finalise(points) {
            return polygon;
        }
    }
}

/// Canonicalises a convex vertex set.
///
/// Congruent polygons, whatever their scale, rotation, winding, starting
/// vertex or reflection, normalise to an identical sequence: the longest
/// vertex-to-vertex vector has length 1 and lies along the x axis, the
/// vertices fit the unit square with both minima at 0, the winding is
/// clockwise, and the cycle starts at the left diameter endpoint. Of the
/// reflection candidates the lexicographically smallest sequence is kept, so
/// the map is idempotent.
///
/// # Examples
///
/// ```
/// use drumhead::geometry::{normalise_convex_polygon, Point};
///
/// let square: Vec<Point> = [[0., 0.], [1., 0.], [1., 1.], [0., 1.]]
///     .into_iter().map(Point::from).collect();
/// let normalised = normalise_convex_polygon(&square);
/// let expected = [[0., 0.5], [0.5, 1.], [1., 0.5], [0.5, 0.]];
/// for (v, e) in normalised.iter().zip(expected) {
///     assert!((v.x - e[0]).abs() < 1e-9 && (v.y - e[1]).abs() < 1e-9);
/// }
/// ```
pub fn normalise_convex_polygon(vertices: &[Point]) -> Vec<Point> {
    let base = orient_to_diameter(vertices);
    let y_max = base.iter().map(|p| p.y).fold(f64::MIN, f64::max);
    let mut best: Option<Vec<Point>> = None;
    for flip_h in [false, true] {
        for flip_v in [false, true] {
            let candidate: Vec<Point> = base
                .iter()
                .map(|p| {
                    Point::new(
                        if flip_h { 1.0 - p.x } else { p.x },
                        if flip_v { y_max - p.y } else { p.y },
                    )
                })
                .collect();
            let candidate = canonical_cycle(candidate);
            if best.as_deref().is_none_or(|b| lexicographic_less(&candidate, b)) {
                best = Some(candidate);
            }
        }
    }
    best.unwrap_or_default()
}

/// Rotates, scales and translates a vertex set so that its longest
/// vertex-to-vertex vector has length 1 and lies along the x axis, with both
/// coordinate minima at 0.
///
/// Since no vertex can be further from a diameter endpoint than the diameter
/// itself, this bounds every vertex to the unit square.
pub(crate) fn orient_to_diameter(vertices: &[Point]) -> Vec<Point> {
    let (magnitude, (a, b)) = largest_vector(vertices);
    let origin = vertices[a];
    let direction = vertices[b] - origin;
    let theta = direction.y.atan2(direction.x);
    let mut out: Vec<Point> = vertices
        .iter()
        .map(|&v| (v - origin).rotate(-theta) * (1.0 / magnitude))
        .collect();
    let min_x = out.iter().map(|p| p.x).fold(f64::MAX, f64::min);
    let min_y = out.iter().map(|p| p.y).fold(f64::MAX, f64::min);
    for p in &mut out {
        p.x -= min_x;
        p.y -= min_y;
    }
    out
}

/// Fixes winding to clockwise and starts the cycle at the left diameter
/// endpoint (smallest x, ties broken by y).
fn canonical_cycle(mut vertices: Vec<Point>) -> Vec<Point> {
    if shoelace(&vertices) > 0.0 {
        vertices.reverse();
    }
    let start = vertices
        .iter()
        .enumerate()
        .min_by(|(_, p), (_, q)| p.x.total_cmp(&q.x).then(p.y.total_cmp(&q.y)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    vertices.rotate_left(start);
    vertices
}

fn lexicographic_less(a: &[Point], b: &[Point]) -> bool {
    for (p, q) in a.iter().zip(b) {
        match p.x.total_cmp(&q.x).then(p.y.total_cmp(&q.y)) {
            std::cmp::Ordering::Less => return true,
            std::cmp::Ordering::Greater => return false,
            std::cmp::Ordering::Equal => {}
        }
    }
    false
}

/// Valtr's construction of a random convex cycle with `n` vertices.
fn valtr(n: usize, rng: &mut impl Rng) -> Vec<Point> {
    let mut xs: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..1.0)).collect();
    let mut ys: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..1.0)).collect();
    xs.sort_by(f64::total_cmp);
    ys.sort_by(f64::total_cmp);

    let x_components = chain_components(&xs, rng);
    let mut y_components = chain_components(&ys, rng);
    y_components.shuffle(rng);

    let mut vectors: Vec<Point> = x_components
        .into_iter()
        .zip(y_components)
        .map(|(x, y)| Point::new(x, y))
        .collect();
    vectors.sort_by(|a, b| a.y.atan2(a.x).total_cmp(&b.y.atan2(b.x)));

    let mut cursor = Point::default();
    let mut vertices = Vec::with_capacity(n);
    for v in vectors {
        vertices.push(cursor);
        cursor = cursor + v;
    }
    vertices
}

/// Splits sorted coordinates into two monotone chains and returns the signed
/// per-edge components; the components sum to zero so the cycle closes.
fn chain_components(sorted: &[f64], rng: &mut impl Rng) -> Vec<f64> {
    let n = sorted.len();
    let (min, max) = (sorted[0], sorted[n - 1]);
    let mut last_top = min;
    let mut last_bottom = min;
    let mut components = Vec::with_capacity(n);
    for &value in &sorted[1..n - 1] {
        if rng.gen_bool(0.5) {
            components.push(value - last_top);
            last_top = value;
        } else {
            components.push(last_bottom - value);
            last_bottom = value;
        }
    }
    components.push(max - last_top);
    components.push(last_bottom - max);
    components
}

fn random_points(n: usize, rng: &mut impl Rng) -> Vec<Point> {
    (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect()
}

/// Orders points by angle about their centroid, producing a star-shaped cycle.
fn sort_by_angle(points: &mut [Point]) {
    let n = points.len() as f64;
    let c = points
        .iter()
        .fold(Point::default(), |acc, &p| acc + p)
        * (1.0 / n);
    points.sort_by(|a, b| {
        (a.y - c.y)
            .atan2(a.x - c.x)
            .total_cmp(&(b.y - c.y).atan2(b.x - c.x))
    });
}

/// Drops the middle vertex of every collinear adjacent triple.
fn remove_colinear_triples(points: &mut Vec<Point>) {
    loop {
        let n = points.len();
        if n < 3 {
            return;
        }
        let found = (0..n).find(|&i| {
            is_colinear(
                points[(i + n - 1) % n],
                points[i],
                points[(i + 1) % n],
            )
        });
        match found {
            Some(i) => {
                points.remove(i);
            }
            None => return,
        }
    }
}

/// Removes self-intersections by 2-opt edge reversals.
///
/// Each reversal strictly shortens the cycle, so the process terminates; the
/// pass bound guards against tolerance-induced cycling on adversarial input.
fn untangle(points: &mut [Point]) -> bool {
    let n = points.len();
    for _ in 0..n * n {
        let mut crossed = false;
        'scan: for i in 0..n {
            for j in (i + 1)..n {
                // Edges sharing a vertex meet there legitimately.
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                let ei = [points[i], points[(i + 1) % n]];
                let ej = [points[j], points[(j + 1) % n]];
                if line_intersection(ei, ej).0 != LineIntersection::None {
                    points[i + 1..=j].reverse();
                    crossed = true;
                    // The reversal invalidates the edges under scan.
                    break 'scan;
                }
            }
        }
        if !crossed {
            return true;
        }
    }
    false
}

/// Normalises a repaired point cycle and runs the final invariant checks.
fn finalise(points: Vec<Point>) -> Option<Polygon> {
    let mut oriented = orient_to_diameter(&points);
    if shoelace(&oriented) > 0.0 {
        oriented.reverse();
    }
    if oriented.len() < 3 || has_colinear_triple(&oriented) {
        return None;
    }
    let polygon = Polygon::new(oriented).ok()?;
    if polygon.area() < EPSILON.sqrt() || !polygon.is_simple() {
        return None;
    }
    Some(polygon)
}
