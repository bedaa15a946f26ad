//! Multi-component numeric kinds: VecFloat, VecInt, Vec2Float, WaveNumber.

use serde_json::json;

use crate::bounds::BoundsPolicy;
use crate::document::{
    number_array, read_bool, read_f32, read_f32_array, read_f32_vec, read_i32, read_i32_vec, DocNumber, Fields,
};
use crate::error::{AttrError, AttrResult};

// ── VecFloat / VecInt ─────────────────────────────────────────────────────────

/// Non-empty sequence sharing one `[vmin, vmax]` editor range.
#[derive(Debug, Clone, PartialEq)]
pub struct VecAttr<T> {
    values: Vec<T>,
    pub vmin: T,
    pub vmax: T,
    pub bounds: BoundsPolicy,
}

pub type VecFloatAttr = VecAttr<f32>;
pub type VecIntAttr = VecAttr<i32>;

impl<T: DocNumber + PartialOrd> VecAttr<T> {
    pub fn new(values: Vec<T>, vmin: T, vmax: T, bounds: BoundsPolicy) -> AttrResult<Self> {
        if values.is_empty() {
            return Err(AttrError::invalid("vector attribute needs at least one component"));
        }
        Ok(Self { values, vmin, vmax, bounds })
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn set_values(&mut self, values: Vec<T>) -> AttrResult<()> {
        if values.is_empty() {
            return Err(AttrError::invalid("vector attribute needs at least one component"));
        }
        self.values = values;
        Ok(())
    }

    /// Write one component. Returns false when `index` is out of range.
    pub fn set(&mut self, index: usize, value: T) -> bool {
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn push(&mut self, value: T) {
        self.values.push(value);
    }

    /// Remove a component; refuses to remove the last one.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if self.values.len() <= 1 || index >= self.values.len() {
            return None;
        }
        Some(self.values.remove(index))
    }

    pub fn is_within_bounds(&self) -> bool {
        self.values.iter().all(|&v| self.bounds.check(v, self.vmin, self.vmax))
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("value".into(), number_array(&self.values));
        doc.insert("vmin".into(), self.vmin.to_value());
        doc.insert("vmax".into(), self.vmax.to_value());
    }

    fn commit_read(&mut self, values: Vec<T>, vmin: T, vmax: T) -> AttrResult<()> {
        if values.is_empty() {
            return Err(AttrError::shape("value", "non-empty array"));
        }
        self.values = values;
        self.vmin = vmin;
        self.vmax = vmax;
        Ok(())
    }
}

impl VecAttr<f32> {
    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        let values = read_f32_vec(doc, "value")?;
        let vmin = read_f32(doc, "vmin")?;
        let vmax = read_f32(doc, "vmax")?;
        self.commit_read(values, vmin, vmax)
    }
}

impl VecAttr<i32> {
    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        let values = read_i32_vec(doc, "value")?;
        let vmin = read_i32(doc, "vmin")?;
        let vmax = read_i32(doc, "vmax")?;
        self.commit_read(values, vmin, vmax)
    }
}

// ── Vec2Float ─────────────────────────────────────────────────────────────────

/// 2D point with independent per-axis editor ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct Vec2FloatAttr {
    pub value: [f32; 2],
    pub xmin: f32,
    pub xmax: f32,
    pub ymin: f32,
    pub ymax: f32,
}

impl Vec2FloatAttr {
    pub fn new(value: [f32; 2], xmin: f32, xmax: f32, ymin: f32, ymax: f32) -> Self {
        Self { value, xmin, xmax, ymin, ymax }
    }

    pub fn set_value(&mut self, value: [f32; 2]) {
        self.value = value;
    }

    pub fn is_within_bounds(&self) -> bool {
        (self.xmin..=self.xmax).contains(&self.value[0])
            && (self.ymin..=self.ymax).contains(&self.value[1])
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("value".into(), number_array(&self.value));
        doc.insert("xmin".into(), self.xmin.to_value());
        doc.insert("xmax".into(), self.xmax.to_value());
        doc.insert("ymin".into(), self.ymin.to_value());
        doc.insert("ymax".into(), self.ymax.to_value());
    }

    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        self.value = read_f32_array(doc, "value")?;
        self.xmin = read_f32(doc, "xmin")?;
        self.xmax = read_f32(doc, "xmax")?;
        self.ymin = read_f32(doc, "ymin")?;
        self.ymax = read_f32(doc, "ymax")?;
        Ok(())
    }
}

// ── WaveNumber ────────────────────────────────────────────────────────────────

/// Spatial frequency `(kx, ky)`. With `link_xy` every edit mirrors y := x.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveNumberAttr {
    value: [f32; 2],
    pub vmin: f32,
    pub vmax: f32,
    link_xy: bool,
    pub bounds: BoundsPolicy,
}

impl WaveNumberAttr {
    pub fn new(value: [f32; 2], vmin: f32, vmax: f32, link_xy: bool, bounds: BoundsPolicy) -> Self {
        let mut out = Self { value, vmin, vmax, link_xy, bounds };
        out.mirror();
        out
    }

    pub fn value(&self) -> [f32; 2] {
        self.value
    }

    pub fn link_xy(&self) -> bool {
        self.link_xy
    }

    pub fn set_value(&mut self, value: [f32; 2]) {
        self.value = value;
        self.mirror();
    }

    pub fn set_x(&mut self, x: f32) {
        self.value[0] = x;
        self.mirror();
    }

    /// When linked, editing y drives x as well.
    pub fn set_y(&mut self, y: f32) {
        self.value[1] = y;
        if self.link_xy {
            self.value[0] = y;
        }
    }

    pub fn set_link_xy(&mut self, link: bool) {
        self.link_xy = link;
        self.mirror();
    }

    pub fn is_within_bounds(&self) -> bool {
        self.value.iter().all(|&v| self.bounds.check(v, self.vmin, self.vmax))
    }

    fn mirror(&mut self) {
        if self.link_xy {
            self.value[1] = self.value[0];
        }
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("value".into(), number_array(&self.value));
        doc.insert("vmin".into(), self.vmin.to_value());
        doc.insert("vmax".into(), self.vmax.to_value());
        doc.insert("link_xy".into(), json!(self.link_xy));
    }

    /// Loaded verbatim; a stored unlinked pair stays as written.
    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        self.value = read_f32_array(doc, "value")?;
        self.vmin = read_f32(doc, "vmin")?;
        self.vmax = read_f32(doc, "vmax")?;
        self.link_xy = read_bool(doc, "link_xy")?;
        Ok(())
    }
}
