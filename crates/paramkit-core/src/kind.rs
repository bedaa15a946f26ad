//! Closed set of attribute kinds with their stable document tags.

use std::fmt;

/// Kind tag of an attribute. The integer tag is written to documents as `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrKind {
    Bool,
    Choice,
    Color,
    ColorGradient,
    Enum,
    MapEnum,
    Filename,
    Float,
    Int,
    Range,
    Resolution,
    Seed,
    String,
    VecFloat,
    VecInt,
    Vec2Float,
    WaveNumber,
    Array,
    Cloud,
    Path,
}

impl AttrKind {
    /// Every kind, in tag order.
    pub const ALL: [AttrKind; 20] = [
        AttrKind::Bool,
        AttrKind::Choice,
        AttrKind::Color,
        AttrKind::ColorGradient,
        AttrKind::Enum,
        AttrKind::MapEnum,
        AttrKind::Filename,
        AttrKind::Float,
        AttrKind::Int,
        AttrKind::Range,
        AttrKind::Resolution,
        AttrKind::Seed,
        AttrKind::String,
        AttrKind::VecFloat,
        AttrKind::VecInt,
        AttrKind::Vec2Float,
        AttrKind::WaveNumber,
        AttrKind::Array,
        AttrKind::Cloud,
        AttrKind::Path,
    ];

    pub fn tag(self) -> u32 {
        self as u32
    }

    pub fn from_tag(tag: u32) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }

    /// Human label stored as `type_string`; preset loading matches on it.
    pub fn type_string(self) -> &'static str {
        match self {
            AttrKind::Bool          => "Bool",
            AttrKind::Choice        => "Choice",
            AttrKind::Color         => "Color",
            AttrKind::ColorGradient => "Color gradient",
            AttrKind::Enum          => "Enumeration",
            AttrKind::MapEnum       => "Map enumeration",
            AttrKind::Filename      => "Filename",
            AttrKind::Float         => "Float",
            AttrKind::Int           => "Integer",
            AttrKind::Range         => "Range",
            AttrKind::Resolution    => "Resolution",
            AttrKind::Seed          => "Seed",
            AttrKind::String        => "String",
            AttrKind::VecFloat      => "Vector of floats",
            AttrKind::VecInt        => "Vector of integers",
            AttrKind::Vec2Float     => "2D point",
            AttrKind::WaveNumber    => "Wavenumber",
            AttrKind::Array         => "Array",
            AttrKind::Cloud         => "Cloud",
            AttrKind::Path          => "Path",
        }
    }
}

impl fmt::Display for AttrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_string())
    }
}
