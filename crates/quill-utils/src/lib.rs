pub mod bimap;
pub mod errors;
pub mod id;
pub mod interner;
pub mod report;
pub mod visit;
