//! Color and color-gradient kinds. Channels are conventionally in `[0, 1]`;
//! the range is an editor concern and is not enforced here.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::document::{doc_f32, doc_f32_array, field, number_array, read_f32_array, Fields};
use crate::error::{AttrError, AttrResult};

pub type Rgba = [f32; 4];

#[derive(Debug, Clone, PartialEq)]
pub struct ColorAttr {
    pub value: Rgba,
}

impl ColorAttr {
    pub fn new(value: Rgba) -> Self {
        Self { value }
    }

    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new([r, g, b, 1.0])
    }

    pub fn set_value(&mut self, value: Rgba) {
        self.value = value;
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("value".into(), number_array(&self.value));
    }

    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        self.value = read_f32_array(doc, "value")?;
        Ok(())
    }
}

// ── Gradient ──────────────────────────────────────────────────────────────────

/// One gradient key. Serialised as `{"position": p, "color": [r, g, b, a]}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    #[serde(with = "doc_f32")]
    pub position: f32,
    #[serde(with = "doc_f32_array")]
    pub color: Rgba,
}

impl GradientStop {
    pub fn new(position: f32, color: Rgba) -> Self {
        Self { position, color }
    }
}

/// Ordered stop list. Positions are usually ascending, which is not enforced;
/// the list may be empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorGradientAttr {
    pub stops: Vec<GradientStop>,
    /// Named stop lists offered by the editor. Not part of the document.
    pub presets: IndexMap<String, Vec<GradientStop>>,
}

impl ColorGradientAttr {
    pub fn new(stops: Vec<GradientStop>) -> Self {
        Self { stops, presets: IndexMap::new() }
    }

    pub fn with_presets(mut self, presets: IndexMap<String, Vec<GradientStop>>) -> Self {
        self.presets = presets;
        self
    }

    pub fn set_stops(&mut self, stops: Vec<GradientStop>) {
        self.stops = stops;
    }

    /// Replace the stops with a named preset. Returns false for an unknown name.
    pub fn apply_preset(&mut self, name: &str) -> bool {
        match self.presets.get(name) {
            Some(stops) => {
                self.stops = stops.clone();
                true
            }
            None => false,
        }
    }

    pub fn sorted_stops(&self) -> Vec<GradientStop> {
        let mut stops = self.stops.clone();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        stops
    }

    /// Linear interpolation at `t`, clamped to the end stops.
    /// An empty gradient samples as transparent black.
    pub fn sample(&self, t: f32) -> Rgba {
        let stops = self.sorted_stops();
        let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
            return [0.0; 4];
        };
        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }
        for w in stops.windows(2) {
            let (a, b) = (&w[0], &w[1]);
            if t >= a.position && t <= b.position {
                let span = b.position - a.position;
                let k = if span > 0.0 { (t - a.position) / span } else { 0.0 };
                let mut out = [0.0; 4];
                for (c, o) in out.iter_mut().enumerate() {
                    *o = a.color[c] + (b.color[c] - a.color[c]) * k;
                }
                return out;
            }
        }
        last.color
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("value".into(), json!(self.stops));
    }

    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        let stops: Vec<GradientStop> = serde_json::from_value(field(doc, "value")?.clone())
            .map_err(|e| AttrError::shape("value", format!("array of gradient stops ({e})")))?;
        self.stops = stops;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use serde_json::Value;

    fn fields(v: Value) -> Fields {
        v.as_object().cloned().unwrap()
    }

    fn bw() -> ColorGradientAttr {
        ColorGradientAttr::new(vec![
            GradientStop::new(1.0, [1.0, 1.0, 1.0, 1.0]),
            GradientStop::new(0.0, [0.0, 0.0, 0.0, 1.0]),
        ])
    }

    #[test]
    fn sample_interpolates_unsorted_stops() {
        let g = bw();
        let mid = g.sample(0.25);
        assert_abs_diff_eq!(mid[0], 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(mid[3], 1.0, epsilon = 1e-6);
        assert_eq!(g.sample(-1.0), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(g.sample(2.0), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn empty_gradient_samples_transparent() {
        assert_eq!(ColorGradientAttr::default().sample(0.5), [0.0; 4]);
    }

    #[test]
    fn presets_replace_stops() {
        let mut presets = IndexMap::new();
        presets.insert("red".to_string(), vec![GradientStop::new(0.0, [1.0, 0.0, 0.0, 1.0])]);
        let mut g = bw().with_presets(presets);
        assert!(!g.apply_preset("blue"));
        assert_eq!(g.stops.len(), 2);
        assert!(g.apply_preset("red"));
        assert_eq!(g.stops.len(), 1);
    }

    #[test]
    fn gradient_document_shape() {
        let g = bw();
        let mut doc = Fields::new();
        g.write_fields(&mut doc);
        assert_eq!(doc["value"][0]["position"], 1.0);
        assert_eq!(doc["value"][1]["color"].as_array().unwrap().len(), 4);

        let mut back = ColorGradientAttr::default();
        back.read_fields(&doc).unwrap();
        assert_eq!(back.stops, g.stops);
    }

    #[test]
    fn gradient_keeps_non_finite_positions() {
        let g = ColorGradientAttr::new(vec![GradientStop::new(f32::NEG_INFINITY, [f32::NAN, 0.0, 0.0, 1.0])]);
        let mut doc = Fields::new();
        g.write_fields(&mut doc);
        assert_eq!(doc["value"][0]["position"], "-inf");

        let mut back = ColorGradientAttr::default();
        back.read_fields(&doc).unwrap();
        assert_eq!(back.stops[0].position, f32::NEG_INFINITY);
        assert!(back.stops[0].color[0].is_nan());
    }

    #[test]
    fn gradient_rejects_malformed_stop() {
        let mut g = bw();
        let doc = fields(serde_json::json!({"value": [{"position": 0.5}]}));
        assert!(matches!(g.read_fields(&doc), Err(AttrError::WrongShape { .. })));
        assert_eq!(g.stops.len(), 2);
    }
}
