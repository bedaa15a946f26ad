//! Discrete-selection kinds.
//!
//! Choice rejects bad input outright. Enum / MapEnum recover from an unknown
//! choice by falling back to the first map entry and reporting a warning.

use std::collections::BTreeMap;

use serde_json::json;

use crate::diagnostics::Diagnostics;
use crate::document::{read_i32, read_string, read_string_vec, Fields};
use crate::error::{AttrError, AttrResult};

// ── Choice ────────────────────────────────────────────────────────────────────

/// One string out of an ordered candidate list. `value ∈ choice_list` always.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceAttr {
    value: String,
    choice_list: Vec<String>,
}

impl ChoiceAttr {
    /// Fails on an empty list or when `value` is not a candidate.
    /// Duplicate candidates are dropped, keeping the first occurrence.
    pub fn new<S: AsRef<str>>(choice_list: &[S], value: &str) -> AttrResult<Self> {
        let choice_list = dedup(choice_list);
        if choice_list.is_empty() {
            return Err(AttrError::invalid("choice list is empty"));
        }
        if !choice_list.iter().any(|c| c == value) {
            return Err(AttrError::invalid(format!(
                "'{value}' is not one of {choice_list:?}"
            )));
        }
        Ok(Self { value: value.to_string(), choice_list })
    }

    /// Same as [`ChoiceAttr::new`], selecting the first candidate.
    pub fn first_of<S: AsRef<str>>(choice_list: &[S]) -> AttrResult<Self> {
        let first = choice_list
            .first()
            .map(|s| s.as_ref().to_string())
            .ok_or_else(|| AttrError::invalid("choice list is empty"))?;
        Self::new(choice_list, &first)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn choice_list(&self) -> &[String] {
        &self.choice_list
    }

    pub fn index(&self) -> usize {
        self.choice_list
            .iter()
            .position(|c| *c == self.value)
            .unwrap_or(0)
    }

    /// Rejects non-members; the state is unchanged on error.
    pub fn set_value(&mut self, value: &str) -> AttrResult<()> {
        if !self.choice_list.iter().any(|c| c == value) {
            return Err(AttrError::invalid(format!(
                "'{value}' is not one of {:?}",
                self.choice_list
            )));
        }
        self.value = value.to_string();
        Ok(())
    }

    /// Replace the candidates. The value is kept when still a member,
    /// otherwise it moves to the first candidate.
    pub fn set_choice_list<S: AsRef<str>>(&mut self, choice_list: &[S]) -> AttrResult<()> {
        let list = dedup(choice_list);
        let Some(first) = list.first().cloned() else {
            return Err(AttrError::invalid("choice list is empty"));
        };
        if !list.contains(&self.value) {
            self.value = first;
        }
        self.choice_list = list;
        Ok(())
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("value".into(), json!(self.value));
        doc.insert("choice_list".into(), json!(self.choice_list));
    }

    /// Stored documents are trusted: membership is not re-checked on load.
    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        let value = read_string(doc, "value")?;
        let list = read_string_vec(doc, "choice_list")?;
        self.value = value;
        self.choice_list = list;
        Ok(())
    }
}

fn dedup<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for s in items {
        let s = s.as_ref();
        if !out.iter().any(|o| o == s) {
            out.push(s.to_string());
        }
    }
    out
}

// ── Enum / MapEnum ────────────────────────────────────────────────────────────

/// Named choice mapped to an integer. Shared payload of the Enum and MapEnum kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumAttr {
    map: BTreeMap<String, i32>,
    choice: String,
    value: i32,
}

impl EnumAttr {
    /// An unknown `choice` falls back to the first entry (map order) with a
    /// warning. Only an empty map is an error.
    pub fn new(map: BTreeMap<String, i32>, choice: &str, diag: &mut Diagnostics) -> AttrResult<Self> {
        let Some((first, &first_value)) = map.iter().next() else {
            return Err(AttrError::invalid("enumeration map is empty"));
        };
        let (choice, value) = match map.get(choice) {
            Some(&v) => (choice.to_string(), v),
            None => {
                diag.warn(format!("unknown choice '{choice}', falling back to '{first}'"));
                (first.clone(), first_value)
            }
        };
        Ok(Self { map, choice, value })
    }

    /// Convenience constructor from `(name, value)` pairs.
    pub fn from_pairs<S: AsRef<str>>(
        pairs: &[(S, i32)],
        choice: &str,
        diag: &mut Diagnostics,
    ) -> AttrResult<Self> {
        let map = pairs.iter().map(|(k, v)| (k.as_ref().to_string(), *v)).collect();
        Self::new(map, choice, diag)
    }

    pub fn choice(&self) -> &str {
        &self.choice
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn map(&self) -> &BTreeMap<String, i32> {
        &self.map
    }

    pub fn set_choice(&mut self, choice: &str) -> AttrResult<()> {
        let value = *self
            .map
            .get(choice)
            .ok_or_else(|| AttrError::invalid(format!("unknown choice '{choice}'")))?;
        self.choice = choice.to_string();
        self.value = value;
        Ok(())
    }

    /// Select the first choice mapped to `value`.
    pub fn set_value(&mut self, value: i32) -> AttrResult<()> {
        let choice = self
            .map
            .iter()
            .find(|&(_, &v)| v == value)
            .map(|(k, _)| k.clone())
            .ok_or_else(|| AttrError::invalid(format!("no choice maps to {value}")))?;
        self.choice = choice;
        self.value = value;
        Ok(())
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("value".into(), json!(self.value));
        doc.insert("choice".into(), json!(self.choice));
    }

    /// The choice string is authoritative; the stored integer is re-derived from
    /// the map so both stay consistent.
    pub(crate) fn read_fields(&mut self, doc: &Fields, diag: &mut Diagnostics) -> AttrResult<()> {
        // Both fields must be present even though only the choice is used.
        read_i32(doc, "value")?;
        let choice = read_string(doc, "choice")?;
        match self.map.get(&choice) {
            Some(&v) => {
                self.choice = choice;
                self.value = v;
            }
            None => {
                if let Some((first, &v)) = self.map.iter().next() {
                    diag.warn(format!("unknown choice '{choice}', falling back to '{first}'"));
                    self.choice = first.clone();
                    self.value = v;
                }
            }
        }
        Ok(())
    }
}
