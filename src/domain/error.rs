//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid forest parameters or values.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid label prefix {0:?}: must not be a CSV delimiter, quote or whitespace")]
    InvalidPrefix(char),

    #[error("ownership out of range: {0} steps (max {max})", max = crate::domain::Ownership::STEPS)]
    OwnershipOutOfRange(u16),

    #[error("forest too large: {0}")]
    ShapeOverflow(String),
}
