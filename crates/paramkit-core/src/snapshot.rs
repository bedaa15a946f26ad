//! Initial / saved state checkpoints held by each attribute.
//!
//! Both slots store the attribute's own document. `initial` is filled by every
//! constructor; `saved` only on request.

use serde_json::Value;

use crate::attributes::Attribute;
use crate::diagnostics::Diagnostics;
use crate::error::AttrResult;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshots {
    pub(crate) initial: Option<Value>,
    pub(crate) saved: Option<Value>,
}

impl Snapshots {
    pub fn initial(&self) -> Option<&Value> {
        self.initial.as_ref()
    }

    pub fn saved(&self) -> Option<&Value> {
        self.saved.as_ref()
    }
}

impl Attribute {
    pub fn snapshots(&self) -> &Snapshots {
        &self.snapshots
    }

    /// Re-capture the initial state. Constructors already do this once; a
    /// second call overwrites the earlier capture.
    pub fn save_initial(&mut self) {
        if self.snapshots.initial.is_some() {
            log::debug!("re-capturing initial state of '{}'", self.label());
        }
        self.snapshots.initial = Some(self.to_document());
    }

    /// Capture the current state into the saved slot, replacing any earlier save.
    pub fn save(&mut self) {
        self.snapshots.saved = Some(self.to_document());
    }

    pub fn has_saved(&self) -> bool {
        self.snapshots.saved.is_some()
    }

    /// Restore the last `save()`.
    ///
    /// Returns `Ok(false)` after a critical diagnostic when nothing was saved
    /// yet; the current state is left as is.
    pub fn reset_to_saved(&mut self, diag: &mut Diagnostics) -> AttrResult<bool> {
        let Some(doc) = self.snapshots.saved.clone() else {
            diag.critical(format!("'{}': no saved state to reset to", self.label()));
            return Ok(false);
        };
        self.from_document(&doc, diag)?;
        Ok(true)
    }

    /// Restore the state captured at construction (or by `save_initial`).
    pub fn reset_to_initial(&mut self, diag: &mut Diagnostics) -> AttrResult<bool> {
        let Some(doc) = self.snapshots.initial.clone() else {
            diag.critical(format!("'{}': no initial state to reset to", self.label()));
            return Ok(false);
        };
        self.from_document(&doc, diag)?;
        Ok(true)
    }

    /// Whether the current state differs from the saved one, or from the
    /// initial one when nothing was saved.
    pub fn is_modified(&self) -> bool {
        match self.snapshots.saved.as_ref().or(self.snapshots.initial.as_ref()) {
            Some(reference) => *reference != self.to_document(),
            None => true,
        }
    }
}
