//! Typed, serializable parameter model for procedural generators.
//!
//! An [`Attribute`] is one labelled value of a closed set of kinds. An
//! [`AttributeSet`] keys them, orders them for display, and saves or applies
//! presets as JSON documents.

pub mod attributes;
pub mod bounds;
pub mod diagnostics;
pub mod document;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod kind;
pub mod set;
pub mod snapshot;

pub use attributes::{AttrValue, Attribute};
pub use bounds::BoundsPolicy;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use editor::{EditorKind, LayoutItem};
pub use error::{AttrError, AttrResult};
pub use geometry::Point;
pub use kind::AttrKind;
pub use set::{AttributeSet, PresetReport};
pub use snapshot::Snapshots;
