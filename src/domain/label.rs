//! Node labels: a single-character prefix followed by the decimal id

use crate::domain::DomainError;

/// Default prefix used by downstream fixtures (`C0`, `C1`, ...).
pub const DEFAULT_PREFIX: char = 'C';

/// Turns numeric node ids into CSV-safe labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLabeler {
    prefix: char,
}

impl NodeLabeler {
    /// Create a labeler, rejecting prefixes that would break a CSV row.
    pub fn new(prefix: char) -> Result<Self, DomainError> {
        if prefix == ',' || prefix == '"' || prefix.is_whitespace() || prefix.is_control() {
            return Err(DomainError::InvalidPrefix(prefix));
        }
        Ok(Self { prefix })
    }

    pub fn label(&self, id: u64) -> String {
        format!("{}{}", self.prefix, id)
    }
}

impl Default for NodeLabeler {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX,
        }
    }
}
