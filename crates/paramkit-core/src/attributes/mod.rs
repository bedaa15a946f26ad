//! Attribute model: one labelled value of a closed set of kinds, plus its
//! snapshot history.
//!
//! Per-kind payloads live in the submodules. Each payload writes and reads its
//! own document fields; this module adds the shared `type`, `type_string` and
//! `label` fields and routes to the payload with an exhaustive match.

pub mod array;
pub mod choice;
pub mod color;
pub mod filename;
pub mod points;
pub mod resolution;
pub mod scalar;
pub mod vector;

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde_json::{json, Value};

use crate::bounds::BoundsPolicy;
use crate::diagnostics::Diagnostics;
use crate::document::{as_object, Fields};
use crate::error::AttrResult;
use crate::geometry::Point;
use crate::kind::AttrKind;
use crate::snapshot::Snapshots;

pub use array::ArrayAttr;
pub use choice::{ChoiceAttr, EnumAttr};
pub use color::{ColorAttr, ColorGradientAttr, GradientStop, Rgba};
pub use filename::FilenameAttr;
pub use points::{CloudAttr, PathAttr};
pub use resolution::{is_power_of_two, make_power_of_two, ResolutionAttr};
pub use scalar::{BoolAttr, FloatAttr, IntAttr, RangeAttr, SeedAttr, StringAttr};
pub use vector::{Vec2FloatAttr, VecAttr, VecFloatAttr, VecIntAttr, WaveNumberAttr};

/// Payload of an attribute, one variant per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Bool(BoolAttr),
    Choice(ChoiceAttr),
    Color(ColorAttr),
    ColorGradient(ColorGradientAttr),
    Enum(EnumAttr),
    MapEnum(EnumAttr),
    Filename(FilenameAttr),
    Float(FloatAttr),
    Int(IntAttr),
    Range(RangeAttr),
    Resolution(ResolutionAttr),
    Seed(SeedAttr),
    String(StringAttr),
    VecFloat(VecFloatAttr),
    VecInt(VecIntAttr),
    Vec2Float(Vec2FloatAttr),
    WaveNumber(WaveNumberAttr),
    Array(ArrayAttr),
    Cloud(CloudAttr),
    Path(PathAttr),
}

impl AttrValue {
    pub fn kind(&self) -> AttrKind {
        match self {
            AttrValue::Bool(_)          => AttrKind::Bool,
            AttrValue::Choice(_)        => AttrKind::Choice,
            AttrValue::Color(_)         => AttrKind::Color,
            AttrValue::ColorGradient(_) => AttrKind::ColorGradient,
            AttrValue::Enum(_)          => AttrKind::Enum,
            AttrValue::MapEnum(_)       => AttrKind::MapEnum,
            AttrValue::Filename(_)      => AttrKind::Filename,
            AttrValue::Float(_)         => AttrKind::Float,
            AttrValue::Int(_)           => AttrKind::Int,
            AttrValue::Range(_)         => AttrKind::Range,
            AttrValue::Resolution(_)    => AttrKind::Resolution,
            AttrValue::Seed(_)          => AttrKind::Seed,
            AttrValue::String(_)        => AttrKind::String,
            AttrValue::VecFloat(_)      => AttrKind::VecFloat,
            AttrValue::VecInt(_)        => AttrKind::VecInt,
            AttrValue::Vec2Float(_)     => AttrKind::Vec2Float,
            AttrValue::WaveNumber(_)    => AttrKind::WaveNumber,
            AttrValue::Array(_)         => AttrKind::Array,
            AttrValue::Cloud(_)         => AttrKind::Cloud,
            AttrValue::Path(_)          => AttrKind::Path,
        }
    }

    fn write_fields(&self, doc: &mut Fields) {
        match self {
            AttrValue::Bool(a) => a.write_fields(doc),
            AttrValue::Choice(a) => a.write_fields(doc),
            AttrValue::Color(a) => a.write_fields(doc),
            AttrValue::ColorGradient(a) => a.write_fields(doc),
            AttrValue::Enum(a) | AttrValue::MapEnum(a) => a.write_fields(doc),
            AttrValue::Filename(a) => a.write_fields(doc),
            AttrValue::Float(a) => a.write_fields(doc),
            AttrValue::Int(a) => a.write_fields(doc),
            AttrValue::Range(a) => a.write_fields(doc),
            AttrValue::Resolution(a) => a.write_fields(doc),
            AttrValue::Seed(a) => a.write_fields(doc),
            AttrValue::String(a) => a.write_fields(doc),
            AttrValue::VecFloat(a) => a.write_fields(doc),
            AttrValue::VecInt(a) => a.write_fields(doc),
            AttrValue::Vec2Float(a) => a.write_fields(doc),
            AttrValue::WaveNumber(a) => a.write_fields(doc),
            AttrValue::Array(a) => a.write_fields(doc),
            AttrValue::Cloud(a) => a.write_fields(doc),
            AttrValue::Path(a) => a.write_fields(doc),
        }
    }

    fn read_fields(&mut self, doc: &Fields, diag: &mut Diagnostics) -> AttrResult<()> {
        match self {
            AttrValue::Bool(a) => a.read_fields(doc),
            AttrValue::Choice(a) => a.read_fields(doc),
            AttrValue::Color(a) => a.read_fields(doc),
            AttrValue::ColorGradient(a) => a.read_fields(doc),
            AttrValue::Enum(a) | AttrValue::MapEnum(a) => a.read_fields(doc, diag),
            AttrValue::Filename(a) => a.read_fields(doc),
            AttrValue::Float(a) => a.read_fields(doc),
            AttrValue::Int(a) => a.read_fields(doc),
            AttrValue::Range(a) => a.read_fields(doc),
            AttrValue::Resolution(a) => a.read_fields(doc),
            AttrValue::Seed(a) => a.read_fields(doc),
            AttrValue::String(a) => a.read_fields(doc),
            AttrValue::VecFloat(a) => a.read_fields(doc),
            AttrValue::VecInt(a) => a.read_fields(doc),
            AttrValue::Vec2Float(a) => a.read_fields(doc),
            AttrValue::WaveNumber(a) => a.read_fields(doc),
            AttrValue::Array(a) => a.read_fields(doc),
            AttrValue::Cloud(a) => a.read_fields(doc),
            AttrValue::Path(a) => a.read_fields(doc),
        }
    }

    /// Short human-readable rendering of the current value (trace/CLI only).
    pub fn summary(&self) -> String {
        match self {
            AttrValue::Bool(a) => a.value.to_string(),
            AttrValue::Choice(a) => a.value().to_string(),
            AttrValue::Color(a) => format!("{:?}", a.value),
            AttrValue::ColorGradient(a) => format!("{} stops", a.stops.len()),
            AttrValue::Enum(a) | AttrValue::MapEnum(a) => format!("{} ({})", a.choice(), a.value()),
            AttrValue::Filename(a) => a.path.display().to_string(),
            AttrValue::Float(a) => format!("{} in [{}, {}]", a.value, a.vmin, a.vmax),
            AttrValue::Int(a) => format!("{} in [{}, {}]", a.value, a.vmin, a.vmax),
            AttrValue::Range(a) => format!(
                "[{}, {}]{}",
                a.value[0],
                a.value[1],
                if a.is_active { "" } else { " (inactive)" }
            ),
            AttrValue::Resolution(a) => format!("{}x{}", a.width(), a.height()),
            AttrValue::Seed(a) => a.value.to_string(),
            AttrValue::String(a) => format!("{:?}", a.value),
            AttrValue::VecFloat(a) => format!("{:?}", a.values()),
            AttrValue::VecInt(a) => format!("{:?}", a.values()),
            AttrValue::Vec2Float(a) => format!("({}, {})", a.value[0], a.value[1]),
            AttrValue::WaveNumber(a) => {
                let [x, y] = a.value();
                format!("({x}, {y}){}", if a.link_xy() { " linked" } else { "" })
            }
            AttrValue::Array(a) => format!("{}x{} grid", a.shape().0, a.shape().1),
            AttrValue::Cloud(a) => format!("{} points", a.len()),
            AttrValue::Path(a) => format!(
                "{} points{}",
                a.len(),
                if a.closed { ", closed" } else { "" }
            ),
        }
    }
}

/// Typed payload access: `as_<kind>()` / `as_<kind>_mut()`.
macro_rules! payload_accessors {
    ($( $variant:ident => $get:ident, $get_mut:ident : $ty:ty; )*) => {
        impl AttrValue {
            $(
                pub fn $get(&self) -> Option<&$ty> {
                    match self {
                        AttrValue::$variant(a) => Some(a),
                        _ => None,
                    }
                }

                pub fn $get_mut(&mut self) -> Option<&mut $ty> {
                    match self {
                        AttrValue::$variant(a) => Some(a),
                        _ => None,
                    }
                }
            )*
        }
    };
}

payload_accessors! {
    Bool => as_bool, as_bool_mut: BoolAttr;
    Choice => as_choice, as_choice_mut: ChoiceAttr;
    Color => as_color, as_color_mut: ColorAttr;
    ColorGradient => as_color_gradient, as_color_gradient_mut: ColorGradientAttr;
    Filename => as_filename, as_filename_mut: FilenameAttr;
    Float => as_float, as_float_mut: FloatAttr;
    Int => as_int, as_int_mut: IntAttr;
    Range => as_range, as_range_mut: RangeAttr;
    Resolution => as_resolution, as_resolution_mut: ResolutionAttr;
    Seed => as_seed, as_seed_mut: SeedAttr;
    String => as_string, as_string_mut: StringAttr;
    VecFloat => as_vec_float, as_vec_float_mut: VecFloatAttr;
    VecInt => as_vec_int, as_vec_int_mut: VecIntAttr;
    Vec2Float => as_vec2_float, as_vec2_float_mut: Vec2FloatAttr;
    WaveNumber => as_wavenumber, as_wavenumber_mut: WaveNumberAttr;
    Array => as_array, as_array_mut: ArrayAttr;
    Cloud => as_cloud, as_cloud_mut: CloudAttr;
    Path => as_path, as_path_mut: PathAttr;
}

impl AttrValue {
    /// Enum and MapEnum share one payload type.
    pub fn as_enum(&self) -> Option<&EnumAttr> {
        match self {
            AttrValue::Enum(a) | AttrValue::MapEnum(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_enum_mut(&mut self) -> Option<&mut EnumAttr> {
        match self {
            AttrValue::Enum(a) | AttrValue::MapEnum(a) => Some(a),
            _ => None,
        }
    }
}

// ── Attribute ─────────────────────────────────────────────────────────────────

/// A labelled, typed parameter with its `initial` and `saved` snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    label: String,
    description: Option<String>,
    value: AttrValue,
    pub(crate) snapshots: Snapshots,
}

impl Attribute {
    /// Wrap an already-validated payload and capture the initial snapshot.
    pub fn new(label: &str, value: AttrValue) -> Self {
        let mut attr = Self {
            label: label.to_string(),
            description: None,
            value,
            snapshots: Snapshots::default(),
        };
        attr.snapshots.initial = Some(attr.to_document());
        attr
    }

    /// Tooltip text. Not part of the state the snapshots restore.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self.snapshots.initial = Some(self.to_document());
        self
    }

    pub fn kind(&self) -> AttrKind {
        self.value.kind()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut AttrValue {
        &mut self.value
    }

    /// Document with `type`, `type_string`, `label` and the per-kind fields.
    pub fn to_document(&self) -> Value {
        let kind = self.kind();
        let mut doc = Fields::new();
        doc.insert("type".into(), json!(kind.tag()));
        doc.insert("type_string".into(), json!(kind.type_string()));
        doc.insert("label".into(), json!(self.label));
        if let Some(description) = &self.description {
            doc.insert("description".into(), json!(description));
        }
        self.value.write_fields(&mut doc);
        Value::Object(doc)
    }

    /// Load the per-kind fields of `doc`. Label and kind never change.
    ///
    /// The payload is parsed into a copy and committed only if every field
    /// reads cleanly, so an error leaves the attribute untouched.
    pub fn from_document(&mut self, doc: &Value, diag: &mut Diagnostics) -> AttrResult<()> {
        let staged = self.parse_document(doc, diag)?;
        self.value = staged;
        Ok(())
    }

    /// Parse `doc` against this attribute's kind without committing.
    pub(crate) fn parse_document(&self, doc: &Value, diag: &mut Diagnostics) -> AttrResult<AttrValue> {
        let fields = as_object(doc)?;
        let mut staged = self.value.clone();
        staged.read_fields(fields, diag)?;
        Ok(staged)
    }

    pub(crate) fn commit(&mut self, value: AttrValue) {
        self.value = value;
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] = {}", self.label, self.kind(), self.value.summary())
    }
}

// ── Constructors ──────────────────────────────────────────────────────────────

impl Attribute {
    pub fn bool(label: &str, value: bool) -> Self {
        Self::new(label, AttrValue::Bool(BoolAttr::new(value)))
    }

    pub fn bool_labelled(label: &str, value: bool, label_true: &str, label_false: &str) -> Self {
        Self::new(label, AttrValue::Bool(BoolAttr::with_labels(value, label_true, label_false)))
    }

    pub fn choice<S: AsRef<str>>(label: &str, choice_list: &[S], value: &str) -> AttrResult<Self> {
        Ok(Self::new(label, AttrValue::Choice(ChoiceAttr::new(choice_list, value)?)))
    }

    pub fn color(label: &str, value: Rgba) -> Self {
        Self::new(label, AttrValue::Color(ColorAttr::new(value)))
    }

    pub fn color_gradient(label: &str, gradient: ColorGradientAttr) -> Self {
        Self::new(label, AttrValue::ColorGradient(gradient))
    }

    pub fn enumeration(
        label: &str,
        map: BTreeMap<String, i32>,
        choice: &str,
        diag: &mut Diagnostics,
    ) -> AttrResult<Self> {
        Ok(Self::new(label, AttrValue::Enum(EnumAttr::new(map, choice, diag)?)))
    }

    pub fn map_enum(
        label: &str,
        map: BTreeMap<String, i32>,
        choice: &str,
        diag: &mut Diagnostics,
    ) -> AttrResult<Self> {
        Ok(Self::new(label, AttrValue::MapEnum(EnumAttr::new(map, choice, diag)?)))
    }

    pub fn filename(label: &str, path: impl Into<PathBuf>, filter: &str, for_saving: bool) -> Self {
        Self::new(label, AttrValue::Filename(FilenameAttr::new(path, filter, for_saving)))
    }

    pub fn float(label: &str, value: f32, vmin: f32, vmax: f32, bounds: BoundsPolicy) -> Self {
        Self::new(label, AttrValue::Float(FloatAttr::new(value, vmin, vmax, bounds)))
    }

    pub fn int(label: &str, value: i32, vmin: i32, vmax: i32, bounds: BoundsPolicy) -> Self {
        Self::new(label, AttrValue::Int(IntAttr::new(value, vmin, vmax, bounds)))
    }

    pub fn range(label: &str, value: [f32; 2], vmin: f32, vmax: f32, bounds: BoundsPolicy) -> Self {
        Self::new(label, AttrValue::Range(RangeAttr::new(value, vmin, vmax, bounds)))
    }

    pub fn resolution(label: &str, width: i32, height: i32, keep_aspect_ratio: bool, power_of_two: bool) -> Self {
        Self::new(
            label,
            AttrValue::Resolution(ResolutionAttr::new(width, height, keep_aspect_ratio, power_of_two)),
        )
    }

    pub fn seed(label: &str, value: u32) -> Self {
        Self::new(label, AttrValue::Seed(SeedAttr::new(value)))
    }

    pub fn string(label: &str, value: &str, read_only: bool) -> Self {
        Self::new(label, AttrValue::String(StringAttr::new(value, read_only)))
    }

    pub fn vec_float(label: &str, values: Vec<f32>, vmin: f32, vmax: f32, bounds: BoundsPolicy) -> AttrResult<Self> {
        Ok(Self::new(label, AttrValue::VecFloat(VecAttr::new(values, vmin, vmax, bounds)?)))
    }

    pub fn vec_int(label: &str, values: Vec<i32>, vmin: i32, vmax: i32, bounds: BoundsPolicy) -> AttrResult<Self> {
        Ok(Self::new(label, AttrValue::VecInt(VecAttr::new(values, vmin, vmax, bounds)?)))
    }

    pub fn vec2_float(label: &str, value: [f32; 2], xmin: f32, xmax: f32, ymin: f32, ymax: f32) -> Self {
        Self::new(label, AttrValue::Vec2Float(Vec2FloatAttr::new(value, xmin, xmax, ymin, ymax)))
    }

    pub fn wavenumber(
        label: &str,
        value: [f32; 2],
        vmin: f32,
        vmax: f32,
        link_xy: bool,
        bounds: BoundsPolicy,
    ) -> Self {
        Self::new(label, AttrValue::WaveNumber(WaveNumberAttr::new(value, vmin, vmax, link_xy, bounds)))
    }

    pub fn array(label: &str, shape: (i32, i32), values: Vec<f32>) -> AttrResult<Self> {
        Ok(Self::new(label, AttrValue::Array(ArrayAttr::new(shape, values)?)))
    }

    pub fn cloud(label: &str, points: Vec<Point>) -> Self {
        Self::new(label, AttrValue::Cloud(CloudAttr::new(points)))
    }

    pub fn path(label: &str, points: Vec<Point>, closed: bool) -> Self {
        Self::new(label, AttrValue::Path(PathAttr::new(points, closed)))
    }
}
