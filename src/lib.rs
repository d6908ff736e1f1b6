//! Tomino (workspace facade crate).
//!
//! Re-exports the member crates as `tomino::{core, input, term, types}` and
//! hosts the environment-driven [`config`] used by the terminal binary.

pub mod config;

pub use tomino_core as core;
pub use tomino_input as input;
pub use tomino_term as term;
pub use tomino_types as types;
