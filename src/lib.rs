//! Deterministic generator of CSV forests with weighted ownership edges.
//!
//! A forest of `trees` complete trees with branching factor `degree` and
//! `depth` levels is written breadth-first as `parent,child,ownership` rows.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
