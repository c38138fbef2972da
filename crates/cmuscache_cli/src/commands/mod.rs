//! CLI command implementations.

pub mod dump;
