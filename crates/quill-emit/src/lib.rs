//! Per-target text writers and import synthesis.
//!
//! Emission drives resolution: a refkey is looked up the first time a writer
//! prints it, and the per-target [`imports`] policy decides what a
//! cross-module use looks like in the output.

pub mod error;
pub mod graphql;
pub mod imports;
pub mod python;
pub mod thrift;

pub use error::EmitError;
pub use imports::{ImportLines, ImportTable, IncludeTable, NoImports};
