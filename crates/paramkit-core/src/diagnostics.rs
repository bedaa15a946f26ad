//! Structured channel for non-fatal conditions.
//!
//! Every record is forwarded to the `log` facade and also kept in memory so a
//! host (or a test) can inspect what degraded during an operation.

use std::fmt;

/// How bad a non-fatal condition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Recovered automatically (enum fallback, skipped preset key).
    Warning,
    /// Requested operation did nothing (reset without a snapshot).
    Critical,
}

/// One reported condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Attribute key, when the condition concerns a keyed attribute.
    pub key: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Warning => "warn",
            Severity::Critical => "critical",
        };
        match &self.key {
            Some(key) => write!(f, "[{tag}] {key}: {}", self.message),
            None => write!(f, "[{tag}] {}", self.message),
        }
    }
}

/// Collecting diagnostics sink.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
    /// Key attached to records emitted while it is set.
    scope: Option<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message.into());
    }

    pub fn critical(&mut self, message: impl Into<String>) {
        self.push(Severity::Critical, message.into());
    }

    /// Run `f` with every record it emits tagged with `key`.
    pub fn scoped<T>(&mut self, key: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = self.scope.replace(key.to_string());
        let out = f(self);
        self.scope = previous;
        out
    }

    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_critical(&self) -> bool {
        self.records.iter().any(|d| d.severity == Severity::Critical)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Move every record of `other` into this sink. The records were already
    /// logged when `other` collected them.
    pub fn append(&mut self, other: &mut Diagnostics) {
        self.records.append(&mut other.records);
    }

    /// Drain all collected records.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.records)
    }

    fn push(&mut self, severity: Severity, message: String) {
        let record = Diagnostic {
            severity,
            key: self.scope.clone(),
            message,
        };
        match severity {
            Severity::Warning => log::warn!("{record}"),
            Severity::Critical => log::error!("{record}"),
        }
        self.records.push(record);
    }
}
