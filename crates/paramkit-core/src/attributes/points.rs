//! Point-set kinds. A Cloud is an unordered bag of points; a Path is an ordered
//! polyline (or polygon when `closed`) whose order carries meaning.

use serde_json::json;

use crate::document::{number_array, read_bool, read_f32_vec, Fields};
use crate::error::{AttrError, AttrResult};
use crate::geometry::{path_length, random_points, reorder_nns, Point};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CloudAttr {
    pub points: Vec<Point>,
}

impl CloudAttr {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn remove_point(&mut self, index: usize) -> Option<Point> {
        (index < self.points.len()).then(|| self.points.remove(index))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Replace the content with `n` seeded random points.
    pub fn randomize(&mut self, seed: u64, n: usize) {
        self.points = random_points(seed, n);
    }

    /// `(min, max)` of the point values, `None` when empty.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        value_range(&self.points)
    }

    pub fn remap_values(&mut self, vmin: f32, vmax: f32) {
        remap_values(&mut self.points, vmin, vmax);
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        write_points(&self.points, doc);
    }

    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        self.points = read_points(doc)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathAttr {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl PathAttr {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Insert before `index` (appends when `index >= len`).
    pub fn insert_point(&mut self, index: usize, point: Point) {
        let index = index.min(self.points.len());
        self.points.insert(index, point);
    }

    pub fn remove_point(&mut self, index: usize) -> Option<Point> {
        (index < self.points.len()).then(|| self.points.remove(index))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Random points, already sequenced along a nearest-neighbour tour.
    pub fn randomize(&mut self, seed: u64, n: usize) {
        self.points = random_points(seed, n);
        self.reorder_nns();
    }

    /// Re-sequence along the greedy nearest-neighbour tour from the first point.
    pub fn reorder_nns(&mut self) {
        reorder_nns(&mut self.points);
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    pub fn length(&self) -> f64 {
        path_length(&self.points, self.closed)
    }

    pub fn value_range(&self) -> Option<(f32, f32)> {
        value_range(&self.points)
    }

    pub fn remap_values(&mut self, vmin: f32, vmax: f32) {
        remap_values(&mut self.points, vmin, vmax);
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        write_points(&self.points, doc);
        doc.insert("closed".into(), json!(self.closed));
    }

    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        let points = read_points(doc)?;
        let closed = read_bool(doc, "closed")?;
        self.points = points;
        self.closed = closed;
        Ok(())
    }
}

// ── Shared helpers ────────────────────────────────────────────────────────────

fn value_range(points: &[Point]) -> Option<(f32, f32)> {
    points.iter().map(|p| p.value).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn remap_values(points: &mut [Point], vmin: f32, vmax: f32) {
    let Some((lo, hi)) = value_range(points) else { return };
    let span = hi - lo;
    for p in points {
        p.value = if span > 0.0 { vmin + (p.value - lo) / span * (vmax - vmin) } else { vmin };
    }
}

fn write_points(points: &[Point], doc: &mut Fields) {
    let xs: Vec<f32> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f32> = points.iter().map(|p| p.y).collect();
    let vs: Vec<f32> = points.iter().map(|p| p.value).collect();
    doc.insert("x".into(), number_array(&xs));
    doc.insert("y".into(), number_array(&ys));
    doc.insert("values".into(), number_array(&vs));
}

fn read_points(doc: &Fields) -> AttrResult<Vec<Point>> {
    let xs = read_f32_vec(doc, "x")?;
    let ys = read_f32_vec(doc, "y")?;
    let vs = read_f32_vec(doc, "values")?;
    if xs.len() != ys.len() || xs.len() != vs.len() {
        return Err(AttrError::shape(
            "x",
            format!(
                "x, y and values of equal length (got {}, {}, {})",
                xs.len(),
                ys.len(),
                vs.len()
            ),
        ));
    }
    Ok(xs
        .into_iter()
        .zip(ys)
        .zip(vs)
        .map(|((x, y), value)| Point::new(x, y, value))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn fields(v: Value) -> Fields {
        v.as_object().cloned().unwrap()
    }

    fn triangle() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 1.0, 3.0),
            Point::new(0.1, 0.0, 2.0),
        ]
    }

    #[test]
    fn path_reorder_keeps_points() {
        let mut p = PathAttr::new(triangle(), false);
        p.reorder_nns();
        assert_eq!(p.points[0], triangle()[0]);
        assert_eq!(p.points[1], triangle()[2]);
        assert_eq!(p.points[2], triangle()[1]);
    }

    #[test]
    fn path_randomize_is_seeded() {
        let mut a = PathAttr::default();
        let mut b = PathAttr::default();
        a.randomize(9, 20);
        b.randomize(9, 20);
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
    }

    #[test]
    fn cloud_value_remap() {
        let mut c = CloudAttr::new(triangle());
        assert_eq!(c.value_range(), Some((1.0, 3.0)));
        c.remap_values(0.0, 10.0);
        assert_eq!(c.value_range(), Some((0.0, 10.0)));
        assert_eq!(CloudAttr::default().value_range(), None);
    }

    #[test]
    fn path_editing() {
        let mut p = PathAttr::new(triangle(), true);
        p.insert_point(99, Point::new(0.5, 0.5, 0.0));
        assert_eq!(p.len(), 4);
        assert_eq!(p.remove_point(10), None);
        assert_eq!(p.remove_point(3), Some(Point::new(0.5, 0.5, 0.0)));
        p.reverse();
        assert_eq!(p.points[0], triangle()[2]);
    }

    #[test]
    fn point_arrays_must_match() {
        let mut c = CloudAttr::new(triangle());
        let doc = fields(serde_json::json!({"x": [0.0, 1.0], "y": [0.0], "values": [1.0, 1.0]}));
        assert!(matches!(c.read_fields(&doc), Err(AttrError::WrongShape { .. })));
        assert_eq!(c.len(), 3);
    }
}
