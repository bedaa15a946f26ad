//! Heightmap-style 2D float grid.
//!
//! Element `(i, j)` with `i < shape.0` and `j < shape.1` lives at
//! `i * shape.1 + j` in the flat vector.

use serde_json::json;

use crate::document::{number_array, read_f32_vec, read_i32, Fields};
use crate::error::{AttrError, AttrResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAttr {
    shape: (i32, i32),
    values: Vec<f32>,
}

impl ArrayAttr {
    /// Grid of `shape` filled with `fill`.
    pub fn filled(shape: (i32, i32), fill: f32) -> AttrResult<Self> {
        let n = checked_len(shape).ok_or_else(|| bad_shape(shape))?;
        Ok(Self { shape, values: vec![fill; n] })
    }

    pub fn new(shape: (i32, i32), values: Vec<f32>) -> AttrResult<Self> {
        let n = checked_len(shape).ok_or_else(|| bad_shape(shape))?;
        if values.len() != n {
            return Err(AttrError::invalid(format!(
                "array of shape {shape:?} needs {n} values, got {}",
                values.len()
            )));
        }
        Ok(Self { shape, values })
    }

    pub fn shape(&self) -> (i32, i32) {
        self.shape
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn set_values(&mut self, shape: (i32, i32), values: Vec<f32>) -> AttrResult<()> {
        *self = Self::new(shape, values)?;
        Ok(())
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> Option<usize> {
        let (nx, ny) = (self.shape.0 as usize, self.shape.1 as usize);
        (i < nx && j < ny).then_some(i * ny + j)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        self.index(i, j).map(|k| self.values[k])
    }

    /// Returns false when `(i, j)` is outside the grid.
    pub fn set(&mut self, i: usize, j: usize, value: f32) -> bool {
        match self.index(i, j) {
            Some(k) => {
                self.values[k] = value;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, value: f32) {
        self.values.iter_mut().for_each(|v| *v = value);
    }

    pub fn min(&self) -> f32 {
        self.values.iter().cloned().fold(f32::INFINITY, f32::min)
    }

    pub fn max(&self) -> f32 {
        self.values.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Linearly rescale to `[vmin, vmax]`. A constant grid is set to `vmin`.
    pub fn remap(&mut self, vmin: f32, vmax: f32) {
        let (lo, hi) = (self.min(), self.max());
        let span = hi - lo;
        for v in &mut self.values {
            *v = if span > 0.0 { vmin + (*v - lo) / span * (vmax - vmin) } else { vmin };
        }
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("shape.x".into(), json!(self.shape.0));
        doc.insert("shape.y".into(), json!(self.shape.1));
        doc.insert("vector".into(), number_array(&self.values));
    }

    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        let shape = (read_i32(doc, "shape.x")?, read_i32(doc, "shape.y")?);
        let values = read_f32_vec(doc, "vector")?;
        match checked_len(shape) {
            Some(n) if n == values.len() => {
                self.shape = shape;
                self.values = values;
                Ok(())
            }
            Some(n) => Err(AttrError::shape("vector", format!("{n} values for shape {shape:?}"))),
            None => Err(AttrError::shape("shape.x", "positive dimensions")),
        }
    }
}

fn checked_len(shape: (i32, i32)) -> Option<usize> {
    if shape.0 <= 0 || shape.1 <= 0 {
        return None;
    }
    (shape.0 as usize).checked_mul(shape.1 as usize)
}

fn bad_shape(shape: (i32, i32)) -> AttrError {
    AttrError::invalid(format!("array shape {shape:?} must be positive in both dimensions"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::Value;

    fn fields(v: Value) -> Fields {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn shape_is_validated() {
        assert!(ArrayAttr::filled((0, 4), 0.0).is_err());
        assert!(ArrayAttr::filled((4, -1), 0.0).is_err());
        assert!(ArrayAttr::new((2, 3), vec![0.0; 5]).is_err());
        let a = ArrayAttr::new((2, 3), vec![0.0; 6]).unwrap();
        assert_eq!(a.values().len(), 6);
    }

    #[test]
    fn indexing_is_row_major_over_first_axis() {
        let a = ArrayAttr::new((2, 3), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(a.get(0, 2), Some(2.0));
        assert_eq!(a.get(1, 0), Some(3.0));
        assert_eq!(a.get(2, 0), None);
        assert_eq!(a.get(0, 3), None);
    }

    #[test]
    fn remap_spans_target_range() {
        let mut a = ArrayAttr::new((2, 2), vec![-1.0, 0.0, 1.0, 3.0]).unwrap();
        a.remap(0.0, 1.0);
        assert_relative_eq!(a.min(), 0.0);
        assert_relative_eq!(a.max(), 1.0);
        assert_relative_eq!(a.get(0, 1).unwrap(), 0.25);

        a.fill(7.0);
        a.remap(0.0, 1.0);
        assert!(a.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn load_rejects_inconsistent_length() {
        let mut a = ArrayAttr::filled((2, 2), 1.0).unwrap();
        let doc = fields(serde_json::json!({"shape.x": 3, "shape.y": 3, "vector": [0.0, 1.0]}));
        assert!(matches!(a.read_fields(&doc), Err(AttrError::WrongShape { .. })));
        assert_eq!(a.shape(), (2, 2));

        let doc = fields(serde_json::json!({"shape.x": 0, "shape.y": 3, "vector": []}));
        assert!(a.read_fields(&doc).is_err());
    }
}
