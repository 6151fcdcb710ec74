//! CLI command implementations

pub mod common;
pub mod run;
