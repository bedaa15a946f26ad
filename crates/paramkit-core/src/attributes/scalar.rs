//! Single-value kinds: Bool, Float, Int, Range, Seed, String.

use serde_json::json;

use crate::bounds::BoundsPolicy;
use crate::document::{
    number_array, read_bool, read_f32, read_f32_array, read_i32, read_string, read_u32, DocNumber, Fields,
};
use crate::error::AttrResult;

// ── Bool ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct BoolAttr {
    pub value: bool,
    /// Editor caption when the value is true (may be empty).
    pub label_true: String,
    pub label_false: String,
}

impl BoolAttr {
    pub fn new(value: bool) -> Self {
        Self::with_labels(value, "", "")
    }

    pub fn with_labels(value: bool, label_true: &str, label_false: &str) -> Self {
        Self {
            value,
            label_true: label_true.to_string(),
            label_false: label_false.to_string(),
        }
    }

    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }

    pub fn toggle(&mut self) {
        self.value = !self.value;
    }

    /// Caption matching the current state.
    pub fn current_label(&self) -> &str {
        if self.value { &self.label_true } else { &self.label_false }
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("value".into(), json!(self.value));
        doc.insert("label_true".into(), json!(self.label_true));
        doc.insert("label_false".into(), json!(self.label_false));
    }

    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        self.value = read_bool(doc, "value")?;
        self.label_true = read_string(doc, "label_true")?;
        self.label_false = read_string(doc, "label_false")?;
        Ok(())
    }
}

// ── Float / Int ───────────────────────────────────────────────────────────────

/// Bounded float. The bounds are advisory: `set_value` stores anything.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatAttr {
    pub value: f32,
    pub vmin: f32,
    pub vmax: f32,
    pub bounds: BoundsPolicy,
}

impl FloatAttr {
    pub fn new(value: f32, vmin: f32, vmax: f32, bounds: BoundsPolicy) -> Self {
        Self { value, vmin, vmax, bounds }
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    pub fn is_within_bounds(&self) -> bool {
        self.bounds.check(self.value, self.vmin, self.vmax)
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("value".into(), self.value.to_value());
        doc.insert("vmin".into(), self.vmin.to_value());
        doc.insert("vmax".into(), self.vmax.to_value());
    }

    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        self.value = read_f32(doc, "value")?;
        self.vmin = read_f32(doc, "vmin")?;
        self.vmax = read_f32(doc, "vmax")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntAttr {
    pub value: i32,
    pub vmin: i32,
    pub vmax: i32,
    pub bounds: BoundsPolicy,
}

impl IntAttr {
    pub fn new(value: i32, vmin: i32, vmax: i32, bounds: BoundsPolicy) -> Self {
        Self { value, vmin, vmax, bounds }
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    pub fn is_within_bounds(&self) -> bool {
        self.bounds.check(self.value, self.vmin, self.vmax)
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("value".into(), json!(self.value));
        doc.insert("vmin".into(), json!(self.vmin));
        doc.insert("vmax".into(), json!(self.vmax));
    }

    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        self.value = read_i32(doc, "value")?;
        self.vmin = read_i32(doc, "vmin")?;
        self.vmax = read_i32(doc, "vmax")?;
        Ok(())
    }
}

// ── Range ─────────────────────────────────────────────────────────────────────

/// `[lo, hi]` interval inside `[vmin, vmax]`. `lo <= hi` is expected, not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeAttr {
    pub value: [f32; 2],
    pub vmin: f32,
    pub vmax: f32,
    pub is_active: bool,
    pub bounds: BoundsPolicy,
}

impl RangeAttr {
    pub fn new(value: [f32; 2], vmin: f32, vmax: f32, bounds: BoundsPolicy) -> Self {
        Self { value, vmin, vmax, is_active: true, bounds }
    }

    pub fn set_value(&mut self, value: [f32; 2]) {
        self.value = value;
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    pub fn center(&self) -> f32 {
        0.5 * (self.value[0] + self.value[1])
    }

    pub fn span(&self) -> f32 {
        self.value[1] - self.value[0]
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("value".into(), number_array(&self.value));
        doc.insert("vmin".into(), self.vmin.to_value());
        doc.insert("vmax".into(), self.vmax.to_value());
        doc.insert("is_active".into(), json!(self.is_active));
    }

    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        self.value = read_f32_array(doc, "value")?;
        self.vmin = read_f32(doc, "vmin")?;
        self.vmax = read_f32(doc, "vmax")?;
        self.is_active = read_bool(doc, "is_active")?;
        Ok(())
    }
}

// ── Seed / String ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SeedAttr {
    pub value: u32,
}

impl SeedAttr {
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn set_value(&mut self, value: u32) {
        self.value = value;
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("value".into(), json!(self.value));
    }

    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        self.value = read_u32(doc, "value")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringAttr {
    pub value: String,
    /// Editor hint only; the core setter still writes.
    pub read_only: bool,
}

impl StringAttr {
    pub fn new(value: &str, read_only: bool) -> Self {
        Self { value: value.to_string(), read_only }
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("value".into(), json!(self.value));
    }

    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        self.value = read_string(doc, "value")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AttrError;
    use serde_json::Value;

    fn fields(v: Value) -> Fields {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn float_setter_does_not_clamp() {
        let mut f = FloatAttr::new(0.5, 0.0, 1.0, BoundsPolicy::Both);
        f.set_value(3.0);
        assert_eq!(f.value, 3.0);
        assert!(!f.is_within_bounds());

        let mut free = FloatAttr::new(0.5, 0.0, 1.0, BoundsPolicy::None);
        free.set_value(-3.0);
        assert!(free.is_within_bounds());
    }

    #[test]
    fn int_bounds_upper_only() {
        let mut i = IntAttr::new(4, 1, 8, BoundsPolicy::UpperOnly);
        i.set_value(-10);
        assert!(i.is_within_bounds());
        i.set_value(9);
        assert!(!i.is_within_bounds());
    }

    #[test]
    fn bool_labels_follow_state() {
        let mut b = BoolAttr::with_labels(false, "on", "off");
        assert_eq!(b.current_label(), "off");
        b.toggle();
        assert_eq!(b.current_label(), "on");
    }

    #[test]
    fn range_helpers() {
        let r = RangeAttr::new([0.2, 0.6], 0.0, 1.0, BoundsPolicy::Both);
        assert!((r.center() - 0.4).abs() < 1e-6);
        assert!((r.span() - 0.4).abs() < 1e-6);
        assert!(r.is_active);
    }

    #[test]
    fn range_read_requires_pair() {
        let mut r = RangeAttr::new([0.2, 0.6], 0.0, 1.0, BoundsPolicy::Both);
        let doc = fields(serde_json::json!({
            "value": [0.1], "vmin": 0.0, "vmax": 1.0, "is_active": false
        }));
        assert!(matches!(r.read_fields(&doc), Err(AttrError::WrongShape { .. })));
    }

    #[test]
    fn seed_rejects_negative() {
        let mut s = SeedAttr::new(1);
        let doc = fields(serde_json::json!({"value": -4}));
        assert!(s.read_fields(&doc).is_err());
        let doc = fields(serde_json::json!({"value": 4_000_000_000u64}));
        s.read_fields(&doc).unwrap();
        assert_eq!(s.value, 4_000_000_000);
    }
}
