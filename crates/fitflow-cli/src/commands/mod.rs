//! CLI command implementations.

pub mod flows;
pub mod serve;
