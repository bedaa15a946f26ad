//! Demo attribute set: the parameter panel of a small planet generator.

use std::collections::BTreeMap;

use anyhow::Result;
use indexmap::IndexMap;
use paramkit_core::attributes::{ColorGradientAttr, GradientStop};
use paramkit_core::geometry::random_points;
use paramkit_core::{Attribute, AttributeSet, BoundsPolicy, Diagnostics};

fn terrain_ramp() -> ColorGradientAttr {
    let earth = vec![
        GradientStop::new(0.0, [0.05, 0.12, 0.35, 1.0]),
        GradientStop::new(0.45, [0.20, 0.45, 0.70, 1.0]),
        GradientStop::new(0.5, [0.76, 0.70, 0.50, 1.0]),
        GradientStop::new(0.7, [0.25, 0.50, 0.20, 1.0]),
        GradientStop::new(1.0, [0.95, 0.95, 0.95, 1.0]),
    ];
    let mut presets = IndexMap::new();
    presets.insert("earth".to_string(), earth.clone());
    presets.insert(
        "desert".to_string(),
        vec![
            GradientStop::new(0.0, [0.45, 0.30, 0.15, 1.0]),
            GradientStop::new(1.0, [0.95, 0.80, 0.55, 1.0]),
        ],
    );
    presets.insert(
        "grey".to_string(),
        vec![
            GradientStop::new(0.0, [0.0, 0.0, 0.0, 1.0]),
            GradientStop::new(1.0, [1.0, 1.0, 1.0, 1.0]),
        ],
    );
    ColorGradientAttr::new(earth).with_presets(presets)
}

pub fn planet_attributes(diag: &mut Diagnostics) -> Result<AttributeSet> {
    let noise_basis: BTreeMap<String, i32> = [
        ("perlin".to_string(), 0),
        ("simplex".to_string(), 1),
        ("worley".to_string(), 2),
    ]
    .into();

    let entries = vec![
        ("seed", Attribute::seed("Seed", 42)),
        (
            "tectonic_activity",
            Attribute::float("Tectonic activity", 0.5, 0.0, 1.0, BoundsPolicy::Both)
                .with_description("Plate speed and ridge density"),
        ),
        (
            "water_abundance",
            Attribute::float("Water abundance", 0.55, 0.0, 1.0, BoundsPolicy::Both),
        ),
        (
            "surface_age",
            Attribute::float("Surface age", 0.5, 0.0, 1.0, BoundsPolicy::Both),
        ),
        (
            "climate_diversity",
            Attribute::float("Climate diversity", 0.5, 0.0, 1.0, BoundsPolicy::Both),
        ),
        (
            "glaciation",
            Attribute::float("Glaciation", 0.3, 0.0, 1.0, BoundsPolicy::Both),
        ),
        ("octaves", Attribute::int("Octaves", 8, 1, 16, BoundsPolicy::Both)),
        (
            "noise",
            Attribute::enumeration("Noise basis", noise_basis, "simplex", diag)?,
        ),
        (
            "kw",
            Attribute::wavenumber("Wavenumber", [4.0, 4.0], 0.0, 64.0, true, BoundsPolicy::LowerOnly),
        ),
        (
            "elevation_clamp",
            Attribute::range("Elevation clamp", [0.0, 1.0], 0.0, 1.0, BoundsPolicy::Both),
        ),
        (
            "resolution",
            Attribute::resolution("Resolution", 1024, 512, true, true),
        ),
        (
            "projection",
            Attribute::choice("Projection", &["equirectangular", "cube", "mollweide"], "equirectangular")?,
        ),
        ("ramp", Attribute::color_gradient("Colour ramp", terrain_ramp())),
        (
            "sea_tint",
            Attribute::color("Sea tint", [0.10, 0.25, 0.55, 1.0]),
        ),
        (
            "ridge",
            Attribute::path("Main ridge", random_points(7, 8), false),
        ),
        ("hotspots", Attribute::cloud("Hotspots", random_points(11, 5))),
        (
            "export",
            Attribute::filename("Export", "planet.png", "PNG (*.png)", true),
        ),
        ("name", Attribute::string("Name", "unnamed", false)),
    ];

    let order = [
        "_GROUPBOX_BEGIN_Planet",
        "seed",
        "tectonic_activity",
        "water_abundance",
        "surface_age",
        "climate_diversity",
        "glaciation",
        "_GROUPBOX_END_",
        "_SEPARATOR_TEXT_Relief",
        "octaves",
        "noise",
        "kw",
        "elevation_clamp",
        "ridge",
        "hotspots",
        "_SEPARATOR_TEXT_Output",
        "resolution",
        "projection",
        "ramp",
        "sea_tint",
        "_SEPARATOR_",
        "export",
        "name",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    Ok(AttributeSet::with_order(entries, Some(order))?)
}
