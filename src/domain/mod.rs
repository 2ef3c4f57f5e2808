//! Domain layer: forest shape, node labels and ownership values
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod label;
pub mod ownership;
pub mod shape;

pub use error::DomainError;
pub use label::NodeLabeler;
pub use ownership::{Ownership, OwnershipFormat};
pub use shape::ForestShape;
