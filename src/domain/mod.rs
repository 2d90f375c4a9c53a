//! Canonical domain model - the format-agnostic representation every adapter
//! produces and every generator consumes

pub mod model;
pub mod types;

pub use model::*;
