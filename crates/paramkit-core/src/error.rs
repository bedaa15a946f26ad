//! Error taxonomy shared by every attribute operation.

/// Convenience result type used across the crate.
pub type AttrResult<T> = Result<T, AttrError>;

/// Fatal conditions raised to the caller.
///
/// Soft conditions (enum fallback, preset key mismatch, missing snapshot) never
/// surface here; they go through [`crate::diagnostics::Diagnostics`].
#[derive(thiserror::Error, Debug)]
pub enum AttrError {
    /// Construction or setter input rejected by a kind's validation rules.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A document lacks a field the kind requires.
    #[error("missing document field '{field}'")]
    MissingField { field: String },

    /// A document field exists but has the wrong JSON type or size.
    #[error("document field '{field}' has the wrong shape (expected {expected})")]
    WrongShape { field: String, expected: String },

    /// A document or preset was expected to be a JSON object.
    #[error("document is not a JSON object")]
    NotAnObject,

    /// Explicit display order disagrees with the attributes actually present.
    #[error("display order lists {found} attribute keys, set holds {expected}")]
    DisplayOrder { expected: usize, found: usize },

    /// Structural failure inside one entry of a preset or bulk restore.
    #[error("entry '{key}': {source}")]
    Entry {
        key: String,
        #[source]
        source: Box<AttrError>,
    },

    /// Key not present in the attribute set.
    #[error("unknown attribute key '{0}'")]
    UnknownKey(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AttrError {
    /// Build an [`AttrError::InvalidArgument`] value.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build an [`AttrError::MissingField`] value.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField { field: field.into() }
    }

    /// Build an [`AttrError::WrongShape`] value.
    pub fn shape(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::WrongShape {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Attach the attribute key an error belongs to.
    pub fn in_entry(self, key: impl Into<String>) -> Self {
        Self::Entry {
            key: key.into(),
            source: Box::new(self),
        }
    }

    /// True for errors raised while reading a document.
    pub fn is_structural(&self) -> bool {
        match self {
            Self::MissingField { .. } | Self::WrongShape { .. } | Self::NotAnObject => true,
            Self::Entry { source, .. } => source.is_structural(),
            _ => false,
        }
    }
}
