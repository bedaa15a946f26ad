//! Mapping from attribute kinds to the editors a UI layer should build.
//!
//! The core never constructs widgets; it only names which editor fits each kind
//! so any front end (or none) can dispatch on it.

use crate::kind::AttrKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    Checkbox,
    ComboBox,
    ColorPicker,
    GradientEditor,
    FilePicker,
    Slider,
    IntSlider,
    RangeSlider,
    ResolutionPicker,
    SeedPicker,
    TextEdit,
    VectorSliders,
    PointPicker,
    WaveNumberSliders,
    ArrayCanvas,
    CloudCanvas,
    PathCanvas,
}

/// Editor for a kind. Total over the closed kind set.
pub fn editor_for(kind: AttrKind) -> EditorKind {
    match kind {
        AttrKind::Bool          => EditorKind::Checkbox,
        AttrKind::Choice        => EditorKind::ComboBox,
        AttrKind::Enum          => EditorKind::ComboBox,
        AttrKind::MapEnum       => EditorKind::ComboBox,
        AttrKind::Color         => EditorKind::ColorPicker,
        AttrKind::ColorGradient => EditorKind::GradientEditor,
        AttrKind::Filename      => EditorKind::FilePicker,
        AttrKind::Float         => EditorKind::Slider,
        AttrKind::Int           => EditorKind::IntSlider,
        AttrKind::Range         => EditorKind::RangeSlider,
        AttrKind::Resolution    => EditorKind::ResolutionPicker,
        AttrKind::Seed          => EditorKind::SeedPicker,
        AttrKind::String        => EditorKind::TextEdit,
        AttrKind::VecFloat      => EditorKind::VectorSliders,
        AttrKind::VecInt        => EditorKind::VectorSliders,
        AttrKind::Vec2Float     => EditorKind::PointPicker,
        AttrKind::WaveNumber    => EditorKind::WaveNumberSliders,
        AttrKind::Array         => EditorKind::ArrayCanvas,
        AttrKind::Cloud         => EditorKind::CloudCanvas,
        AttrKind::Path          => EditorKind::PathCanvas,
    }
}

/// Editor for a raw document tag; `None` for tags outside the kind set.
pub fn editor_for_tag(tag: u32) -> Option<EditorKind> {
    AttrKind::from_tag(tag).map(editor_for)
}

/// One row of an attribute panel, in display order.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutItem<'a> {
    Attribute { key: &'a str, editor: EditorKind },
    Separator,
    /// Separator with a caption.
    Heading(&'a str),
    Text(&'a str),
    GroupBegin(&'a str),
    GroupEnd,
}

// ── Layout pseudo-keys ────────────────────────────────────────────────────────

pub const SEPARATOR: &str = "_SEPARATOR_";
pub const SEPARATOR_TEXT: &str = "_SEPARATOR_TEXT_";
pub const TEXT: &str = "_TEXT_";
pub const GROUPBOX_BEGIN: &str = "_GROUPBOX_BEGIN_";
pub const GROUPBOX_END: &str = "_GROUPBOX_END_";

/// Layout item for a reserved display-order key, `None` for attribute keys.
pub fn pseudo_item(key: &str) -> Option<LayoutItem<'_>> {
    if key == SEPARATOR {
        Some(LayoutItem::Separator)
    } else if key == GROUPBOX_END {
        Some(LayoutItem::GroupEnd)
    } else if let Some(text) = key.strip_prefix(SEPARATOR_TEXT) {
        Some(LayoutItem::Heading(text))
    } else if let Some(text) = key.strip_prefix(TEXT) {
        Some(LayoutItem::Text(text))
    } else {
        key.strip_prefix(GROUPBOX_BEGIN).map(LayoutItem::GroupBegin)
    }
}

pub fn is_pseudo_key(key: &str) -> bool {
    pseudo_item(key).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pseudo_keys_parse() {
        assert_eq!(pseudo_item("_SEPARATOR_"), Some(LayoutItem::Separator));
        assert_eq!(pseudo_item("_SEPARATOR_TEXT_Erosion"), Some(LayoutItem::Heading("Erosion")));
        assert_eq!(pseudo_item("_TEXT_note"), Some(LayoutItem::Text("note")));
        assert_eq!(pseudo_item("_GROUPBOX_BEGIN_Noise"), Some(LayoutItem::GroupBegin("Noise")));
        assert_eq!(pseudo_item("_GROUPBOX_END_"), Some(LayoutItem::GroupEnd));
        assert!(!is_pseudo_key("seed"));
        assert!(!is_pseudo_key("_private"));
    }

    #[test]
    fn every_tag_has_an_editor() {
        for kind in AttrKind::ALL {
            assert_eq!(editor_for_tag(kind.tag()), Some(editor_for(kind)));
        }
        assert_eq!(editor_for_tag(AttrKind::ALL.len() as u32), None);
    }

    #[test]
    fn enumerations_share_the_combo_box() {
        assert_eq!(editor_for(AttrKind::Enum), editor_for(AttrKind::Choice));
        assert_eq!(editor_for(AttrKind::MapEnum), EditorKind::ComboBox);
    }
}
