//! CLI command implementations

pub mod batch;
pub mod check;
pub mod inspect;
pub mod json_output;
pub mod slice;

mod reporting;
