use std::path::{Path, PathBuf};

use serde_json::json;

use crate::document::{read_string, Fields};
use crate::error::AttrResult;

/// File path with a dialog filter such as `"Preset (*.json)"`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilenameAttr {
    pub path: PathBuf,
    pub filter: String,
    /// Editor opens a save dialog rather than an open dialog. Not serialised.
    pub for_saving: bool,
}

impl FilenameAttr {
    pub fn new(path: impl Into<PathBuf>, filter: &str, for_saving: bool) -> Self {
        Self { path: path.into(), filter: filter.to_string(), for_saving }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("value".into(), json!(self.path.to_string_lossy()));
        doc.insert("filter".into(), json!(self.filter));
    }

    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        let path = read_string(doc, "value")?;
        let filter = read_string(doc, "filter")?;
        self.path = PathBuf::from(path);
        self.filter = filter;
        Ok(())
    }
}
