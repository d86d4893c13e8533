//! Deferred validations: checks that only make sense once the whole
//! declaration graph exists, run strictly after the declare and emit passes.

pub mod cycle;
pub mod error;
pub mod registry;

pub use cycle::implements_closure;
pub use error::ValidateError;
pub use registry::{ValidationRegistry, ValidationTask};
