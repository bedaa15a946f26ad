//! Point-set geometry for the Cloud and Path kinds.
//!
//! Coordinates are conventionally normalised to `[0, 1]`. Distance math runs in
//! f64; stored values stay f32.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A sample point carrying a scalar payload.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub value: f32,
}

impl Point {
    pub fn new(x: f32, y: f32, value: f32) -> Self {
        Self { x, y, value }
    }

    #[inline]
    pub fn distance_sq(&self, other: &Point) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_sq(other).sqrt()
    }
}

/// Visiting order of the greedy nearest-neighbour tour starting at index 0.
///
/// At each step the closest unvisited point to the last selected one is taken;
/// on equal distance the lowest index wins. O(n²).
pub fn nns_order(points: &[Point]) -> Vec<usize> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = 0;
    visited[0] = true;
    order.push(0);

    for _ in 1..n {
        let mut best: Option<(usize, f64)> = None;
        for (j, p) in points.iter().enumerate() {
            if visited[j] {
                continue;
            }
            let d = points[current].distance_sq(p);
            // Strict comparison keeps the earliest index on ties.
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((j, d));
            }
        }
        let Some((next, _)) = best else { break };
        visited[next] = true;
        order.push(next);
        current = next;
    }
    order
}

/// Re-sequence `points` in place along the nearest-neighbour tour.
/// Only the order changes; coordinates and values are untouched.
pub fn reorder_nns(points: &mut [Point]) {
    let order = nns_order(points);
    let reordered: Vec<Point> = order.iter().map(|&i| points[i]).collect();
    points.copy_from_slice(&reordered);
}

/// `n` points with x, y and value drawn uniformly from `[0, 1)`.
pub fn random_points(seed: u64, n: usize) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point::new(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>()))
        .collect()
}

/// Polyline length, including the closing segment when `closed`.
pub fn path_length(points: &[Point], closed: bool) -> f64 {
    let open: f64 = points.windows(2).map(|w| w[0].distance(&w[1])).sum();
    match (closed, points.first(), points.last()) {
        (true, Some(first), Some(last)) if points.len() > 2 => open + last.distance(first),
        _ => open,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sorted_bits(points: &[Point]) -> Vec<(u32, u32, u32)> {
        let mut v: Vec<_> = points
            .iter()
            .map(|p| (p.x.to_bits(), p.y.to_bits(), p.value.to_bits()))
            .collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn empty_and_single_point() {
        assert!(nns_order(&[]).is_empty());
        assert_eq!(nns_order(&[Point::new(0.3, 0.3, 1.0)]), vec![0]);
    }

    #[test]
    fn collinear_points_are_walked_in_order() {
        let pts = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(0.9, 0.0, 1.0),
            Point::new(0.3, 0.0, 2.0),
            Point::new(0.6, 0.0, 3.0),
        ];
        assert_eq!(nns_order(&pts), vec![0, 2, 3, 1]);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        // Both candidates are exactly 0.5 away from the start.
        let pts = vec![
            Point::new(0.5, 0.5, 0.0),
            Point::new(1.0, 0.5, 1.0),
            Point::new(0.0, 0.5, 2.0),
        ];
        assert_eq!(nns_order(&pts), vec![0, 1, 2]);
    }

    #[test]
    fn reorder_is_a_permutation() {
        let original = random_points(7, 64);
        let mut pts = original.clone();
        reorder_nns(&mut pts);
        assert_eq!(pts.len(), original.len());
        assert_eq!(pts[0], original[0]);
        assert_eq!(sorted_bits(&pts), sorted_bits(&original));
    }

    #[test]
    fn reorder_is_idempotent() {
        let mut pts = random_points(42, 50);
        reorder_nns(&mut pts);
        let once = pts.clone();
        reorder_nns(&mut pts);
        assert_eq!(pts, once);
    }

    #[test]
    fn reorder_shortens_a_random_tour() {
        let mut pts = random_points(3, 100);
        let before = path_length(&pts, false);
        reorder_nns(&mut pts);
        let after = path_length(&pts, false);
        assert!(after < before, "nns tour {after:.3} should beat random order {before:.3}");
    }

    #[test]
    fn random_points_depend_on_seed_only() {
        assert_eq!(random_points(11, 10), random_points(11, 10));
        assert_ne!(random_points(11, 10), random_points(12, 10));
        for p in random_points(5, 200) {
            assert!((0.0..1.0).contains(&p.x));
            assert!((0.0..1.0).contains(&p.y));
            assert!((0.0..1.0).contains(&p.value));
        }
    }

    #[test]
    fn closed_length_adds_return_segment() {
        let square = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ];
        assert_abs_diff_eq!(path_length(&square, false), 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(path_length(&square, true), 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(path_length(&square[..2], true), 1.0, epsilon = 1e-9);
    }
}
