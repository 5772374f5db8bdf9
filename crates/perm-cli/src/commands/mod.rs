//! CLI command implementations

pub mod extend;
pub mod merge;
pub mod minimize;
