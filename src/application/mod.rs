//! Application layer: the generation pass and its file target
//!
//! This layer drives domain logic over injected writers and random sources.

pub mod error;
pub mod error_ext;
pub mod generator;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use generator::{ForestGenerator, GenerationStats, CSV_HEADER, DEFAULT_SEED};
