//! Keyed, ordered collection of attributes with bulk snapshot and preset ops.
//!
//! The set owns every attribute. Editors borrow them through `get` /
//! `get_mut` for as long as the set lives.
//!
//! Bulk operations run in two phases: every entry is parsed into a staged
//! value first, and nothing is committed unless all of them parsed.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::attributes::{AttrValue, Attribute};
use crate::diagnostics::Diagnostics;
use crate::document::as_object;
use crate::editor::{editor_for, is_pseudo_key, pseudo_item, LayoutItem};
use crate::error::{AttrError, AttrResult};

/// Outcome of a preset load, by attribute key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetReport {
    pub loaded: Vec<String>,
    /// Present in both, skipped because the stored `type_string` differs.
    pub skipped: Vec<String>,
    /// Present in the preset only.
    pub ignored: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Initial,
    Saved,
}

#[derive(Debug, Clone, Default)]
pub struct AttributeSet {
    attrs: IndexMap<String, Attribute>,
    display_order: Option<Vec<String>>,
    diagnostics: Diagnostics,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries, optionally with an explicit display order that may
    /// interleave layout pseudo-keys (`_SEPARATOR_`, `_GROUPBOX_BEGIN_...`).
    pub fn with_order<K: Into<String>>(
        entries: impl IntoIterator<Item = (K, Attribute)>,
        display_order: Option<Vec<String>>,
    ) -> AttrResult<Self> {
        let mut set = Self::new();
        for (key, attr) in entries {
            set.attrs.insert(key.into(), attr);
        }
        if let Some(order) = display_order {
            set.set_display_order(order)?;
        }
        Ok(set)
    }

    /// Replace the display order. Its attribute keys must be exactly the keys
    /// of the set, each once; pseudo-keys are free.
    pub fn set_display_order(&mut self, order: Vec<String>) -> AttrResult<()> {
        let keys: Vec<&String> = order.iter().filter(|k| !is_pseudo_key(k)).collect();
        if keys.len() != self.attrs.len() {
            return Err(AttrError::DisplayOrder {
                expected: self.attrs.len(),
                found: keys.len(),
            });
        }
        if let Some(unknown) = keys.iter().find(|k| !self.attrs.contains_key(k.as_str())) {
            return Err(AttrError::UnknownKey((*unknown).clone()));
        }
        let distinct: HashSet<&String> = keys.iter().copied().collect();
        if distinct.len() != keys.len() {
            return Err(AttrError::DisplayOrder {
                expected: self.attrs.len(),
                found: distinct.len(),
            });
        }
        self.display_order = Some(order);
        Ok(())
    }

    pub fn display_order(&self) -> Option<&[String]> {
        self.display_order.as_deref()
    }

    /// Insert or replace. A new key is appended to the display order, if any.
    pub fn insert(&mut self, key: impl Into<String>, attr: Attribute) -> Option<Attribute> {
        let key = key.into();
        let previous = self.attrs.insert(key.clone(), attr);
        if previous.is_none() {
            if let Some(order) = &mut self.display_order {
                order.push(key);
            }
        }
        previous
    }

    pub fn remove(&mut self, key: &str) -> Option<Attribute> {
        let removed = self.attrs.shift_remove(key)?;
        if let Some(order) = &mut self.display_order {
            order.retain(|k| k != key);
        }
        Some(removed)
    }

    pub fn get(&self, key: &str) -> Option<&Attribute> {
        self.attrs.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Attribute> {
        self.attrs.get_mut(key)
    }

    /// Like `get_mut`, failing with [`AttrError::UnknownKey`].
    pub fn try_get_mut(&mut self, key: &str) -> AttrResult<&mut Attribute> {
        self.attrs
            .get_mut(key)
            .ok_or_else(|| AttrError::UnknownKey(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attrs.iter().map(|(k, a)| (k.as_str(), a))
    }

    /// Entries in display order (insertion order without one), pseudo-keys skipped.
    pub fn iter_display(&self) -> Vec<(&str, &Attribute)> {
        match &self.display_order {
            Some(order) => order
                .iter()
                .filter_map(|k| self.attrs.get_key_value(k.as_str()))
                .map(|(k, a)| (k.as_str(), a))
                .collect(),
            None => self.iter().collect(),
        }
    }

    /// Panel rows in display order, including layout pseudo-keys.
    pub fn editor_layout(&self) -> Vec<LayoutItem<'_>> {
        let keys: Vec<&str> = match &self.display_order {
            Some(order) => order.iter().map(String::as_str).collect(),
            None => self.keys().collect(),
        };
        keys.into_iter()
            .filter_map(|key| match pseudo_item(key) {
                Some(item) => Some(item),
                None => self.attrs.get_key_value(key).map(|(k, a)| LayoutItem::Attribute {
                    key: k.as_str(),
                    editor: editor_for(a.kind()),
                }),
            })
            .collect()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    // ── Bulk snapshot operations ─────────────────────────────────────────────

    pub fn save_all(&mut self) {
        for attr in self.attrs.values_mut() {
            attr.save();
        }
    }

    /// Reset every attribute to its saved state. Attributes never saved are
    /// reported and left alone. Returns how many were restored.
    pub fn restore_all_saved(&mut self) -> AttrResult<usize> {
        self.restore_all(Slot::Saved)
    }

    pub fn restore_all_initial(&mut self) -> AttrResult<usize> {
        self.restore_all(Slot::Initial)
    }

    fn restore_all(&mut self, slot: Slot) -> AttrResult<usize> {
        let mut diag = Diagnostics::new();
        let mut staged: Vec<(usize, AttrValue)> = Vec::with_capacity(self.attrs.len());
        for (index, (key, attr)) in self.attrs.iter().enumerate() {
            let snapshot = match slot {
                Slot::Initial => attr.snapshots().initial(),
                Slot::Saved => attr.snapshots().saved(),
            };
            let Some(doc) = snapshot else {
                diag.scoped(key, |d| d.critical(format!("no {} state to reset to", slot_name(slot))));
                continue;
            };
            let value = diag
                .scoped(key, |d| attr.parse_document(doc, d))
                .map_err(|e| e.in_entry(key.as_str()))?;
            staged.push((index, value));
        }

        let restored = staged.len();
        for (index, value) in staged {
            if let Some((_, attr)) = self.attrs.get_index_mut(index) {
                attr.commit(value);
            }
        }
        self.diagnostics.append(&mut diag);
        Ok(restored)
    }

    // ── Presets ──────────────────────────────────────────────────────────────

    /// `{ key: attribute_document, ... }` in insertion order.
    pub fn save_preset(&self) -> Value {
        let mut out = Map::new();
        for (key, attr) in &self.attrs {
            out.insert(key.clone(), attr.to_document());
        }
        Value::Object(out)
    }

    /// Apply a preset document.
    ///
    /// Keys missing from the set are ignored, keys whose stored `type_string`
    /// differs from the attribute's are skipped with a warning. A structural
    /// error in any matching entry aborts the whole load before anything is
    /// committed.
    pub fn load_preset(&mut self, preset: &Value) -> AttrResult<PresetReport> {
        let entries = as_object(preset)?;
        let mut report = PresetReport::default();
        let mut staged: Vec<(String, AttrValue)> = Vec::new();
        // Records reach the set only once the load commits.
        let mut diag = Diagnostics::new();

        for (key, entry) in entries {
            let Some(attr) = self.attrs.get(key) else {
                log::debug!("preset key '{key}' has no matching attribute");
                report.ignored.push(key.clone());
                continue;
            };

            let expected = attr.kind().type_string();
            let stored = entry.get("type_string").and_then(Value::as_str);
            if stored != Some(expected) {
                diag.scoped(key, |d| {
                    d.warn(format!(
                        "type mismatch (preset has {}, attribute is {expected}), skipped",
                        stored.unwrap_or("no type")
                    ))
                });
                report.skipped.push(key.clone());
                continue;
            }

            let value = diag
                .scoped(key, |d| attr.parse_document(entry, d))
                .map_err(|e| e.in_entry(key.as_str()))?;
            staged.push((key.clone(), value));
        }

        for (key, value) in staged {
            if let Some(attr) = self.attrs.get_mut(&key) {
                attr.commit(value);
            }
            report.loaded.push(key);
        }
        self.diagnostics.append(&mut diag);
        log::info!(
            "preset applied: {} loaded, {} skipped, {} ignored",
            report.loaded.len(),
            report.skipped.len(),
            report.ignored.len()
        );
        Ok(report)
    }

    pub fn save_preset_file(&self, path: impl AsRef<Path>) -> AttrResult<()> {
        let text = serde_json::to_string_pretty(&self.save_preset())?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn load_preset_file(&mut self, path: impl AsRef<Path>) -> AttrResult<PresetReport> {
        let text = fs::read_to_string(path)?;
        let preset: Value = serde_json::from_str(&text)?;
        self.load_preset(&preset)
    }
}

fn slot_name(slot: Slot) -> &'static str {
    match slot {
        Slot::Initial => "initial",
        Slot::Saved => "saved",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundsPolicy;
    use crate::diagnostics::Severity;
    use crate::editor::EditorKind;
    use serde_json::json;

    fn terrain_set() -> AttributeSet {
        AttributeSet::with_order(
            [
                ("seed", Attribute::seed("Seed", 42)),
                ("octaves", Attribute::int("Octaves", 8, 1, 16, BoundsPolicy::Both)),
                ("gain", Attribute::float("Gain", 0.5, 0.0, 1.0, BoundsPolicy::Both)),
                ("mode", Attribute::choice("Mode", &["fbm", "ridged"], "fbm").unwrap()),
            ],
            None,
        )
        .unwrap()
    }

    fn set_gain(set: &mut AttributeSet, v: f32) {
        set.get_mut("gain").unwrap().value_mut().as_float_mut().unwrap().set_value(v);
    }

    fn gain(set: &AttributeSet) -> f32 {
        set.get("gain").unwrap().value().as_float().unwrap().value
    }

    #[test]
    fn display_order_must_cover_every_key() {
        let entries = || {
            vec![
                ("a", Attribute::bool("A", true)),
                ("b", Attribute::bool("B", false)),
            ]
        };
        let ok = AttributeSet::with_order(
            entries(),
            Some(vec!["_GROUPBOX_BEGIN_Main".into(), "b".into(), "_SEPARATOR_".into(), "a".into(), "_GROUPBOX_END_".into()]),
        )
        .unwrap();
        let keys: Vec<&str> = ok.iter_display().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);

        let short = AttributeSet::with_order(entries(), Some(vec!["a".into()]));
        assert!(matches!(short, Err(AttrError::DisplayOrder { expected: 2, found: 1 })));

        let unknown = AttributeSet::with_order(entries(), Some(vec!["a".into(), "z".into()]));
        assert!(matches!(unknown, Err(AttrError::UnknownKey(ref k)) if k == "z"));

        let duplicate = AttributeSet::with_order(entries(), Some(vec!["a".into(), "a".into()]));
        assert!(matches!(duplicate, Err(AttrError::DisplayOrder { .. })));
    }

    #[test]
    fn insert_and_remove_track_display_order() {
        let mut set = AttributeSet::with_order(
            [("a", Attribute::bool("A", true))],
            Some(vec!["_TEXT_hello".into(), "a".into()]),
        )
        .unwrap();
        set.insert("b", Attribute::seed("B", 1));
        assert_eq!(set.display_order().unwrap().last().unwrap(), "b");
        assert!(set.insert("b", Attribute::seed("B", 2)).is_some());
        assert_eq!(set.display_order().unwrap().len(), 3);
        set.remove("a");
        assert_eq!(set.display_order().unwrap(), ["_TEXT_hello", "b"]);
        assert!(set.remove("a").is_none());
    }

    #[test]
    fn editor_layout_follows_display_order() {
        let set = AttributeSet::with_order(
            [("gain", Attribute::float("Gain", 0.5, 0.0, 1.0, BoundsPolicy::Both)), ("seed", Attribute::seed("Seed", 1))],
            Some(vec!["seed".into(), "_SEPARATOR_TEXT_Shape".into(), "gain".into()]),
        )
        .unwrap();
        assert_eq!(
            set.editor_layout(),
            vec![
                LayoutItem::Attribute { key: "seed", editor: EditorKind::SeedPicker },
                LayoutItem::Heading("Shape"),
                LayoutItem::Attribute { key: "gain", editor: EditorKind::Slider },
            ]
        );
    }

    #[test]
    fn save_all_then_restore() {
        let mut set = terrain_set();
        set_gain(&mut set, 0.8);
        set.save_all();
        set_gain(&mut set, 0.1);
        assert_eq!(set.restore_all_saved().unwrap(), 4);
        assert_eq!(gain(&set), 0.8);

        assert_eq!(set.restore_all_initial().unwrap(), 4);
        assert_eq!(gain(&set), 0.5);
        assert!(set.diagnostics().is_empty());
    }

    #[test]
    fn restore_without_save_reports_each_key() {
        let mut set = terrain_set();
        set.get_mut("seed").unwrap().save();
        assert_eq!(set.restore_all_saved().unwrap(), 1);
        let critical: Vec<_> = set
            .diagnostics()
            .records()
            .iter()
            .filter(|d| d.severity == Severity::Critical)
            .filter_map(|d| d.key.clone())
            .collect();
        assert_eq!(critical, vec!["octaves", "gain", "mode"]);
    }

    #[test]
    fn preset_round_trip() {
        let mut source = terrain_set();
        set_gain(&mut source, 0.9);
        source.get_mut("mode").unwrap().value_mut().as_choice_mut().unwrap().set_value("ridged").unwrap();
        let preset = source.save_preset();

        let mut target = terrain_set();
        let report = target.load_preset(&preset).unwrap();
        assert_eq!(report.loaded, vec!["seed", "octaves", "gain", "mode"]);
        assert!(report.skipped.is_empty() && report.ignored.is_empty());
        assert_eq!(target.save_preset(), preset);
    }

    #[test]
    fn preset_type_mismatch_is_skipped() {
        let mut set = terrain_set();
        let preset = json!({
            "gain": {"type": 8, "type_string": "Integer", "label": "Gain", "value": 3, "vmin": 0, "vmax": 5},
            "octaves": {"type": 8, "type_string": "Integer", "label": "Octaves", "value": 3, "vmin": 1, "vmax": 16},
            "unknown": {"type": 11, "type_string": "Seed", "label": "X", "value": 1},
        });
        let report = set.load_preset(&preset).unwrap();
        assert_eq!(report.loaded, vec!["octaves"]);
        assert_eq!(report.skipped, vec!["gain"]);
        assert_eq!(report.ignored, vec!["unknown"]);
        assert_eq!(gain(&set), 0.5);
        assert_eq!(set.get("octaves").unwrap().value().as_int().unwrap().value, 3);

        let warning = set.diagnostics().warnings().next().unwrap();
        assert_eq!(warning.key.as_deref(), Some("gain"));
    }

    #[test]
    fn preset_structural_error_commits_nothing() {
        let mut set = terrain_set();
        let before = set.save_preset();
        let preset = json!({
            "gain": {"type_string": "Float", "value": 0.9, "vmin": 0.0, "vmax": 1.0},
            "octaves": {"type_string": "Integer", "value": 3, "vmin": 1},
        });
        let err = set.load_preset(&preset).unwrap_err();
        assert!(err.is_structural());
        assert!(matches!(err, AttrError::Entry { ref key, .. } if key == "octaves"));
        assert_eq!(set.save_preset(), before);

        assert!(matches!(set.load_preset(&json!([1, 2])), Err(AttrError::NotAnObject)));
    }

    #[test]
    fn aborted_preset_leaves_no_diagnostics() {
        let mut diag = Diagnostics::new();
        let basis: std::collections::BTreeMap<String, i32> =
            [("perlin".to_string(), 0), ("worley".to_string(), 1)].into();
        let mut set = AttributeSet::with_order(
            [
                ("basis", Attribute::enumeration("Basis", basis, "worley", &mut diag).unwrap()),
                ("gain", Attribute::float("Gain", 0.5, 0.0, 1.0, BoundsPolicy::Both)),
            ],
            None,
        )
        .unwrap();
        let preset = json!({
            "basis": {"type_string": "Enumeration", "value": 7, "choice": "simplex"},
            "gain": {"type_string": "Float", "value": 0.9},
        });
        assert!(set.load_preset(&preset).is_err());
        assert!(set.diagnostics().is_empty());
        assert_eq!(set.get("basis").unwrap().value().as_enum().unwrap().choice(), "worley");

        let preset = json!({"basis": {"type_string": "Enumeration", "value": 7, "choice": "simplex"}});
        set.load_preset(&preset).unwrap();
        assert_eq!(set.diagnostics().warnings().count(), 1);
        assert_eq!(set.get("basis").unwrap().value().as_enum().unwrap().choice(), "perlin");
    }

    #[test]
    fn preset_with_non_finite_values_reloads() {
        let mut set = terrain_set();
        set_gain(&mut set, f32::NEG_INFINITY);
        let preset = set.save_preset();
        set_gain(&mut set, 0.5);
        set.load_preset(&preset).unwrap();
        assert_eq!(gain(&set), f32::NEG_INFINITY);
    }

    #[test]
    fn preset_file_round_trip() {
        let path = std::env::temp_dir().join(format!("paramkit-preset-{}.json", std::process::id()));
        let mut source = terrain_set();
        set_gain(&mut source, 0.25);
        source.save_preset_file(&path).unwrap();

        let mut target = terrain_set();
        let report = target.load_preset_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(report.loaded.len(), 4);
        assert_eq!(gain(&target), 0.25);
    }

    #[test]
    fn missing_preset_file_is_io_error() {
        let mut set = terrain_set();
        let path = std::env::temp_dir().join("paramkit-definitely-missing/preset.json");
        assert!(matches!(set.load_preset_file(path), Err(AttrError::Io(_))));
    }
}
