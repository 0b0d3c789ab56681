//! Structural comparison of subnet documents.

pub mod engine;
pub mod result;

pub use engine::{diff_subnets, diff_values, DiffOptions};
pub use result::DiffEntry;
